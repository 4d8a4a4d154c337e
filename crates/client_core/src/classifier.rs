use serde::Deserialize;
use serde_json::Value;
use shared::{
    domain::Film,
    error::{ClassifiedError, FailureEntry, StructuredFailure},
};

use crate::transport::RawResponse;

pub const DEFAULT_FAILURE_MESSAGE: &str = "failed to load films";
pub const UNEXPECTED_PAYLOAD_MESSAGE: &str = "unexpected film list payload";

/// `None` means success: the body is the film list.
pub fn classify(status_ok: bool, body: &Value) -> Option<ClassifiedError> {
    if status_ok {
        return None;
    }

    let Ok(failure) = StructuredFailure::deserialize(body) else {
        return Some(ClassifiedError::generic(DEFAULT_FAILURE_MESSAGE));
    };

    if failure.requires_auth() {
        return Some(ClassifiedError::auth_required());
    }

    Some(ClassifiedError::generic(describe_failure(&failure)))
}

/// Status check, classification and film decoding in one step.
pub fn interpret(raw: RawResponse) -> Result<Vec<Film>, ClassifiedError> {
    if let Some(err) = classify(raw.is_success(), &raw.body) {
        return Err(err);
    }

    serde_json::from_value(raw.body)
        .map_err(|_| ClassifiedError::generic(UNEXPECTED_PAYLOAD_MESSAGE))
}

fn describe_failure(failure: &StructuredFailure) -> String {
    if failure.errors.is_empty() {
        return DEFAULT_FAILURE_MESSAGE.to_string();
    }

    failure
        .errors
        .iter()
        .map(describe_entry)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_entry(entry: &FailureEntry) -> String {
    let msg = entry.msg.as_deref().unwrap_or("invalid value");
    format!("{} in {}: {msg}", entry.param, entry.location)
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
