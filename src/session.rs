//! Session facade: the operations a UI shell invokes.
//!
//! `VisitSession` ties the store, the derivation engine, the update bus,
//! and a collaborator backend together. Every method returns either a
//! typed receipt or a `VisitError`; nothing here panics, and a backend
//! failure never leaves the store half-written.
//!
//! Commit pipeline, in order: trim and write the note, derive the three
//! audience texts, stamp the commit time, publish the change, dispatch
//! the summary email. The email is informational; its failure is
//! reported in the receipt and rolls nothing back.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::backend::{CareBackend, EmailRequest};
use crate::error::VisitError;
use crate::models::Role;
use crate::orders::{self, SelectionView};
use crate::state::VisitState;
use crate::summary;
use crate::view::RoleView;

// ---------------------------------------------------------------------------
// Notices and receipts
// ---------------------------------------------------------------------------

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A line for the shell to surface (status bar, toast, alert box).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// How the post-commit email dispatch went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmailOutcome {
    Sent {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Failed(Notice),
}

/// Receipt for one committed visit summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReceipt {
    pub index: usize,
    /// RFC 3339 commit time, also stamped on the record.
    pub committed_at: String,
    pub email: EmailOutcome,
    pub notice: Notice,
}

/// Receipt for one accepted stop-recording exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopReceipt {
    pub index: usize,
    /// The transcript now sitting in the editable note.
    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<String>,
    pub notice: Notice,
}

// ---------------------------------------------------------------------------
// VisitSession
// ---------------------------------------------------------------------------

/// One clinic session: shared state plus a collaborator backend.
pub struct VisitSession<B> {
    state: Arc<VisitState>,
    backend: B,
}

impl<B: CareBackend> VisitSession<B> {
    pub fn new(state: Arc<VisitState>, backend: B) -> Self {
        Self { state, backend }
    }

    /// Session over the compiled-in demo roster.
    pub fn with_demo_roster(backend: B) -> Self {
        Self::new(Arc::new(VisitState::new()), backend)
    }

    pub fn state(&self) -> &VisitState {
        &self.state
    }

    /// Shared handle to the store, for shells that hold it elsewhere.
    pub fn shared_state(&self) -> Arc<VisitState> {
        Arc::clone(&self.state)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open a role screen (subscribes it to commit notifications and
    /// auto-selects the first record).
    pub fn open_view(&self, role: Role) -> Result<RoleView, VisitError> {
        RoleView::open(role, &self.state)
    }

    // ── Doctor: note and test selection ─────────────────────

    /// Order a test for the doctor's active record.
    pub fn order_test(&self, name: &str) -> Result<SelectionView, VisitError> {
        let index = self.active_doctor()?;
        orders::add_test(&self.state, index, name)
    }

    /// Cancel an ordered test on the doctor's active record.
    pub fn cancel_test(&self, name: &str) -> Result<SelectionView, VisitError> {
        let index = self.active_doctor()?;
        orders::remove_test(&self.state, index, name)
    }

    /// Save the editable note without committing: no derivation, no
    /// broadcast, no email.
    pub fn save_note(&self, note: &str) -> Result<(), VisitError> {
        let index = self.active_doctor()?;
        let trimmed = note.trim().to_string();
        self.state.update(index, |record| {
            record.summaries.doctor = trimmed;
        })?;
        tracing::debug!(index, "doctor note saved");
        Ok(())
    }

    /// Commit the visit summary for the doctor's active record.
    ///
    /// Refused before anything is written when no record is selected or
    /// the record has no contact address.
    pub async fn commit(&self, note: &str) -> Result<CommitReceipt, VisitError> {
        let index = self.active_doctor()?;
        let contact = self.state.record(index)?.email;
        if contact.is_empty() {
            return Err(VisitError::MissingContact);
        }

        let trimmed = note.trim().to_string();
        let committed_at = Utc::now().to_rfc3339();
        let email_request = self.state.update(index, |record| {
            record.summaries.doctor = trimmed;
            let derived = summary::audience_summaries(record, index);
            record.summaries.patient = derived.patient_text;
            record.summaries.nurse = derived.nurse_text;
            record.summaries.student = derived.student_text;
            record.summaries.committed_at = Some(committed_at.clone());
            EmailRequest {
                email: record.email.clone(),
                name: record.name.clone(),
                summary: record.summaries.doctor.clone(),
                tests: record.tests.clone(),
            }
        })?;

        let reached = self.state.publish_update(index);
        tracing::info!(index, reached, "visit summary committed");

        let email = match self.backend.send_email(&email_request).await {
            Ok(ack) => EmailOutcome::Sent { message: ack.message },
            Err(err) => {
                tracing::warn!(index, error = %err, "summary email failed");
                EmailOutcome::Failed(Notice::error(format!("Email failed: {err}")))
            }
        };

        Ok(CommitReceipt {
            index,
            committed_at,
            email,
            notice: Notice::info(format!(
                "Summary + tests sent to {} and synced to Nurse / Student views.",
                email_request.email
            )),
        })
    }

    // ── Doctor: live capture ────────────────────────────────

    /// Start capturing the visit. The store records the association
    /// only after the collaborator accepts. Starting again while
    /// another record is still associated re-targets the capture and
    /// returns a warning notice instead of the plain acknowledgement.
    pub async fn start_recording(&self) -> Result<Notice, VisitError> {
        let index = self.active_doctor()?;
        let ack = self.backend.start_recording().await?;
        let displaced = self.state.begin_recording(index)?;
        tracing::info!(index, "recording started");
        Ok(match displaced {
            Some(previous) if previous != index => {
                Notice::warning("Recording switched to the selected patient.")
            }
            _ => Notice::info(
                ack.message.unwrap_or_else(|| "Recording in progress...".to_string()),
            ),
        })
    }

    /// Stop the capture and write the transcript into the editable note.
    ///
    /// The association is cleared up front and the write targets the
    /// record that was being recorded, even if the doctor's selection
    /// has moved since. On failure the note keeps its pre-call value.
    pub async fn stop_recording(&self) -> Result<StopReceipt, VisitError> {
        let bound = self.state.finish_recording()?;
        let index = match bound {
            Some(index) => index,
            // Stop without a start: the collaborator still gets asked,
            // against the doctor's current record.
            None => self.active_doctor()?,
        };
        let record = self.state.record(index)?;

        let transcript = self.backend.stop_recording(&record).await?;
        self.state.update(index, |record| {
            record.summaries.doctor = transcript.summary.clone();
        })?;
        tracing::info!(index, "transcript written to the editable note");

        Ok(StopReceipt {
            index,
            transcript: transcript.summary,
            pdf_path: transcript.pdf_path,
            notice: Notice::info("Summary generated and PDF created!"),
        })
    }

    fn active_doctor(&self) -> Result<usize, VisitError> {
        self.state
            .active(Role::Doctor)?
            .ok_or(VisitError::NoSelection { role: Role::Doctor })
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
