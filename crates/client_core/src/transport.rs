use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{header::HeaderValue, Client};
use serde_json::Value;
use shared::{
    domain::Identity,
    protocol::{EMAIL_HEADER, FILMS_ROUTE, PING_ROUTE},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::{ConfigError, TransportError},
};

/// A completed `/films` call, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// `Value::Null` when the body was empty or not JSON.
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub elapsed: Duration,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Any completed response counts as reachable; the status is not inspected.
    async fn probe_connectivity(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ProbeOutcome, TransportError>;

    async fn fetch_items(&self, identity: Option<&Identity>)
        -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn probe_connectivity(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ProbeOutcome, TransportError> {
        (**self).probe_connectivity(cancel).await
    }

    async fn fetch_items(
        &self,
        identity: Option<&Identity>,
    ) -> Result<RawResponse, TransportError> {
        (**self).fetch_items(identity).await
    }
}

pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http: Client::new(),
            base_url: config.service_base()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn probe_connectivity(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ProbeOutcome, TransportError> {
        let url = self.endpoint(PING_ROUTE);
        let started = Instant::now();
        let request = self.http.post(&url).send();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            result = request => {
                let response = result.map_err(|e| TransportError::request(url, e))?;
                let elapsed = started.elapsed();
                debug!(
                    status = response.status().as_u16(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "probe: completed"
                );
                Ok(ProbeOutcome { elapsed })
            }
        }
    }

    async fn fetch_items(
        &self,
        identity: Option<&Identity>,
    ) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(FILMS_ROUTE);
        let mut request = self.http.get(&url);
        if let Some(identity) = identity {
            request = request.header(EMAIL_HEADER, HeaderValue::from_str(identity.email())?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request(url.as_str(), e))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::request(url.as_str(), e))?;

        let body = serde_json::from_slice(&bytes).unwrap_or_else(|error| {
            debug!(status, %error, "films: response body is not json");
            Value::Null
        });

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
