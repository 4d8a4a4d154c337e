use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One rejected input as reported by the film service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub location: String,
    pub param: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FailureEntry {
    pub fn new(location: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            param: param.into(),
            msg: None,
            value: None,
        }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn is_email_header(&self) -> bool {
        self.location == "headers" && self.param == "email"
    }
}

/// Body of a non-2xx `/films` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFailure {
    pub errors: Vec<FailureEntry>,
}

impl StructuredFailure {
    pub fn requires_auth(&self) -> bool {
        self.errors.iter().any(FailureEntry::is_email_header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkFailureKind {
    Unreachable,
    Slow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFailure {
    pub kind: NetworkFailureKind,
    pub message: String,
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("{message}")]
    AuthRequired { message: String },
    #[error("{0}")]
    Generic(String),
    #[error("{0}")]
    Network(NetworkFailure),
}

impl ClassifiedError {
    pub fn auth_required() -> Self {
        Self::AuthRequired {
            message: "invalid email".to_string(),
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }

    pub fn network_unreachable() -> Self {
        Self::Network(NetworkFailure {
            kind: NetworkFailureKind::Unreachable,
            message: "network problem".to_string(),
        })
    }

    pub fn network_slow() -> Self {
        Self::Network(NetworkFailure {
            kind: NetworkFailureKind::Slow,
            message: "slow network connection".to_string(),
        })
    }

    pub fn network_kind(&self) -> Option<NetworkFailureKind> {
        match self {
            Self::Network(failure) => Some(failure.kind),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::AuthRequired { message } | Self::Generic(message) => message,
            Self::Network(failure) => &failure.message,
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
