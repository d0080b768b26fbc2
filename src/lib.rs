//! Carelens — the state core of a clinic-visit companion.
//!
//! One in-memory patient roster is viewed through three role lenses:
//! the doctor edits a visit note and orders tests, the nurse reads a
//! handoff sheet, the student reads a de-identified teaching case. A
//! commit derives the audience texts from the note, publishes a typed
//! change event, and emails the summary to the patient. Views pull
//! fresh state when they react, so nothing renders stale data.
//!
//! The rendering shell is out of scope: every screen is exposed as
//! plain view models (`view`), every user action as a `VisitSession`
//! method, and the recording/transcription and email collaborators sit
//! behind the `backend::CareBackend` seam.

pub mod backend;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod models;
pub mod orders;
pub mod seed;
pub mod session;
pub mod state;
pub mod summary;
pub mod view;

pub use backend::{
    Ack, BackendError, CareBackend, EmailRequest, HttpBackend, MockBackend, Transcript,
};
pub use broadcast::{Drained, PatientUpdated, UpdateBus, UpdateReceiver};
pub use error::VisitError;
pub use models::{PatientRecord, Role, SummarySet};
pub use orders::SelectionView;
pub use session::{CommitReceipt, EmailOutcome, Notice, NoticeLevel, StopReceipt, VisitSession};
pub use state::VisitState;
pub use summary::{audience_summaries, AudienceSummaries};
pub use view::{Panel, RenderPass, RoleView, RosterCard, ViewState};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a shell embedding this crate.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate's
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
