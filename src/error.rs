//! Crate-wide error taxonomy.
//!
//! Nothing here is fatal: every failure degrades to a user-visible notice
//! and leaves the store in its pre-operation state, so the triggering
//! action can simply be retried.

use crate::backend::BackendError;
use crate::models::Role;

/// Errors surfaced by store, view, and session operations.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// An index outside the roster. Selection and per-record operations
    /// report this instead of silently ignoring the request.
    #[error("no patient at roster index {index}")]
    RecordNotFound { index: usize },

    /// The operation needs an active record for `role` but none is
    /// selected yet.
    #[error("no patient selected on the {role} screen")]
    NoSelection { role: Role },

    /// Commit refused: the record carries no contact address to send
    /// the visit summary to.
    #[error("patient has no contact email")]
    MissingContact,

    /// A store lock was poisoned by a panicking writer.
    #[error("internal lock error")]
    LockPoisoned,

    /// A collaborator call failed (transport or remote-reported).
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl VisitError {
    /// Whether retrying the same action without changing anything could
    /// succeed (true only for collaborator failures).
    pub fn is_retryable(&self) -> bool {
        matches!(self, VisitError::Backend(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_names_the_index() {
        let err = VisitError::RecordNotFound { index: 7 };
        assert_eq!(err.to_string(), "no patient at roster index 7");
        assert!(!err.is_retryable());
    }

    #[test]
    fn no_selection_names_the_role() {
        let err = VisitError::NoSelection { role: Role::Nurse };
        assert_eq!(err.to_string(), "no patient selected on the nurse screen");
    }

    #[test]
    fn backend_errors_are_retryable() {
        let err: VisitError = BackendError::Rejected("mic unavailable".into()).into();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "mic unavailable");
    }
}
