//! HTTP client for the collaborator endpoints.

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::models::PatientRecord;

use super::types::{Ack, AckReply, EmailRequest, StopReply, Transcript};
use super::{BackendError, CareBackend};

/// Reqwest-backed `CareBackend` speaking JSON to the configured base
/// URL with a per-request deadline.
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    /// Backend at the address the environment configures.
    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }

    /// Backend at the default local development address.
    pub fn default_local() -> Self {
        Self::new(BackendConfig::default_local())
    }

    fn transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout(self.config.timeout_secs())
        } else {
            BackendError::Connection(self.config.base_url().to_string())
        }
    }
}

fn rejection(error: Option<String>) -> BackendError {
    BackendError::Rejected(error.unwrap_or_else(|| "backend reported failure".to_string()))
}

/// Map a non-2xx reply. The collaborator pairs every handled failure
/// with a 500 status and a `{"success": false, "error": ..}` body, so
/// the body is decoded first; anything else keeps the raw status + body.
fn status_error(status: reqwest::StatusCode, body: String) -> BackendError {
    if let Ok(reply) = serde_json::from_str::<AckReply>(&body) {
        if !reply.success {
            return rejection(reply.error);
        }
    }
    BackendError::Http { status: status.as_u16(), body }
}

#[async_trait]
impl CareBackend for HttpBackend {
    async fn start_recording(&self) -> Result<Ack, BackendError> {
        let url = self.config.route("start_recording");
        tracing::debug!(%url, "starting recording");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let reply: AckReply = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        if !reply.success {
            return Err(rejection(reply.error));
        }
        Ok(Ack { message: reply.message })
    }

    async fn stop_recording(&self, record: &PatientRecord) -> Result<Transcript, BackendError> {
        let url = self.config.route("stop_recording");
        tracing::debug!(%url, patient = %record.name, "stopping recording");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let reply: StopReply = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        if !reply.success {
            return Err(rejection(reply.error));
        }
        let summary = reply
            .summary
            .ok_or_else(|| BackendError::Decode("reply missing 'summary'".to_string()))?;
        Ok(Transcript { summary, pdf_path: reply.pdf_path })
    }

    async fn send_email(&self, request: &EmailRequest) -> Result<Ack, BackendError> {
        let url = self.config.route("send_email");
        tracing::debug!(%url, to = %request.email, "sending visit summary email");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let reply: AckReply = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        if !reply.success {
            return Err(rejection(reply.error));
        }
        Ok(Ack { message: reply.message })
    }
}
