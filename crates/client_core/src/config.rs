use std::time::Duration;

use shared::protocol::DEFAULT_BASE_URL;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub probe_interval: Duration,
    /// Successful probes slower than this are reported as a slow network.
    /// Disabled when `None`.
    pub slow_probe_threshold: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            probe_interval: DEFAULT_PROBE_INTERVAL,
            slow_probe_threshold: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_probe_interval(mut self, probe_interval: Duration) -> Self {
        self.probe_interval = probe_interval;
        self
    }

    pub fn with_slow_probe_threshold(mut self, threshold: Option<Duration>) -> Self {
        self.slow_probe_threshold = threshold;
        self
    }

    /// Base URL without a trailing slash, ready for `format!("{base}{route}")`.
    pub fn service_base(&self) -> Result<String, ConfigError> {
        let raw = self.base_url.trim();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".into()));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}
