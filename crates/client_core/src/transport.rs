use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiErrorBody,
    protocol::{FormPayload, ResponsePayload, ANALYSIS_ENDPOINT},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::{SubmitError, TransportError};

/// One-shot delivery of a form payload to the analysis backend.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, payload: FormPayload) -> Result<ResponsePayload, SubmitError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_endpoint(server_url, ANALYSIS_ENDPOINT)
    }

    pub fn with_endpoint(server_url: &str, endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(server_url)
            .and_then(|base| base.join(endpoint))
            .map_err(|source| TransportError::InvalidUrl {
                url: server_url.to_string(),
                source,
            })?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, payload: FormPayload) -> Result<ResponsePayload, SubmitError> {
        debug!(endpoint = %self.endpoint, fields = payload.len(), "posting analysis request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                warn!(endpoint = %self.endpoint, "analysis request failed to send: {err}");
                SubmitError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_else(|err| {
                debug!("failed to read failure body: {err}");
                Default::default()
            });
            let message = ApiErrorBody::from_slice_lossy(&body).message_or_unknown();
            warn!(status = status.as_u16(), reason = %message, "analysis request rejected");
            return Err(SubmitError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| SubmitError::Schema(format!("malformed response body: {err}")))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
