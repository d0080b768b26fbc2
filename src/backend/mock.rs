//! Configurable in-memory backend for tests and offline demos.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::PatientRecord;

use super::types::{Ack, EmailRequest, Transcript};
use super::{BackendError, CareBackend};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    StartRecording,
    /// The record POSTed with the stop request.
    StopRecording(PatientRecord),
    /// The projection POSTed with the email request.
    SendEmail(EmailRequest),
}

/// `CareBackend` that replays configured outcomes and records every
/// call, in order, for assertions.
pub struct MockBackend {
    start: Result<Ack, BackendError>,
    stop: Result<Transcript, BackendError>,
    email: Result<Ack, BackendError>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockBackend {
    /// A backend on which everything succeeds.
    pub fn new() -> Self {
        Self {
            start: Ok(Ack { message: Some("Recording started".to_string()) }),
            stop: Ok(Transcript {
                summary: "Transcribed visit summary.".to_string(),
                pdf_path: None,
            }),
            email: Ok(Ack { message: Some("Email sent".to_string()) }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_start(mut self, outcome: Result<Ack, BackendError>) -> Self {
        self.start = outcome;
        self
    }

    pub fn with_stop(mut self, outcome: Result<Transcript, BackendError>) -> Self {
        self.stop = outcome;
        self
    }

    /// Shorthand: stop-recording succeeds with this transcript text.
    pub fn with_transcript(mut self, summary: &str) -> Self {
        self.stop = Ok(Transcript { summary: summary.to_string(), pdf_path: None });
        self
    }

    pub fn with_email(mut self, outcome: Result<Ack, BackendError>) -> Self {
        self.email = outcome;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// The email requests handed over so far, in order.
    pub fn sent_emails(&self) -> Vec<EmailRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::SendEmail(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record_call(&self, call: BackendCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CareBackend for MockBackend {
    async fn start_recording(&self) -> Result<Ack, BackendError> {
        self.record_call(BackendCall::StartRecording);
        self.start.clone()
    }

    async fn stop_recording(&self, record: &PatientRecord) -> Result<Transcript, BackendError> {
        self.record_call(BackendCall::StopRecording(record.clone()));
        self.stop.clone()
    }

    async fn send_email(&self, request: &EmailRequest) -> Result<Ack, BackendError> {
        self.record_call(BackendCall::SendEmail(request.clone()));
        self.email.clone()
    }
}
