//! Collaborator backends.
//!
//! The visit-capture service (recording, transcription, summary
//! composition, PDF archiving) and the email-delivery service sit
//! behind three HTTP endpoints. `CareBackend` is the crate's seam to
//! them: `HttpBackend` speaks the real wire contract, `MockBackend`
//! replays configured outcomes for tests and offline demos. Remote
//! rejections (`success: false`) and transport failures surface
//! through the same error type, so callers degrade identically.

mod http;
mod mock;
mod types;

pub use http::HttpBackend;
pub use mock::{BackendCall, MockBackend};
pub use types::{Ack, EmailRequest, Transcript};

use async_trait::async_trait;

use crate::models::PatientRecord;

/// Errors from collaborator calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// Could not reach the collaborator at all.
    #[error("could not reach the backend at {0}")]
    Connection(String),
    /// The request ran past the configured deadline.
    #[error("backend request timed out after {0}s")]
    Timeout(u64),
    /// A non-success status whose body carried no reported failure
    /// (handled failures arrive as a 500 + `{"success": false, ..}`
    /// body and surface as `Rejected`).
    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// A 2xx reply whose body did not parse as the expected shape.
    #[error("could not decode backend reply: {0}")]
    Decode(String),
    /// The collaborator processed the request and reported failure.
    #[error("{0}")]
    Rejected(String),
}

/// Client side of the collaborator contract.
#[async_trait]
pub trait CareBackend: Send + Sync {
    /// Ask the collaborator to start capturing the visit audio.
    async fn start_recording(&self) -> Result<Ack, BackendError>;

    /// Stop the capture. The full record travels with the request so
    /// the collaborator can compose and archive the visit summary.
    async fn stop_recording(&self, record: &PatientRecord) -> Result<Transcript, BackendError>;

    /// Deliver the committed summary to the patient's contact address.
    async fn send_email(&self, request: &EmailRequest) -> Result<Ack, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_the_remote_message() {
        let err = BackendError::Rejected("No active recording".to_string());
        assert_eq!(err.to_string(), "No active recording");
    }

    #[test]
    fn transport_errors_name_the_endpoint_or_deadline() {
        assert_eq!(
            BackendError::Connection("http://127.0.0.1:5000".to_string()).to_string(),
            "could not reach the backend at http://127.0.0.1:5000"
        );
        assert_eq!(
            BackendError::Timeout(120).to_string(),
            "backend request timed out after 120s"
        );
        assert_eq!(
            BackendError::Http { status: 502, body: "bad gateway".to_string() }.to_string(),
            "backend returned HTTP 502: bad gateway"
        );
    }
}
