//! Patient roster records and their per-audience summary texts.
//!
//! A `PatientRecord` is index-addressed in the roster and lives for the
//! whole session; demographics never change after seeding, only `tests`
//! and `summaries` mutate. The serde shape is wire-exact: the full record
//! is what `/stop_recording` receives as its JSON body.

use serde::{Deserialize, Serialize};

/// One roster entry. Index-addressed; the index is stable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    /// Years, non-negative.
    pub age: u32,
    /// Kilograms, positive.
    pub weight: f64,
    /// Reason for the visit, free text.
    pub reason: String,
    /// Contact address for the visit summary email.
    pub email: String,
    pub summaries: SummarySet,
    /// Ordered tests, duplicate-free under exact string match.
    pub tests: Vec<String>,
}

/// The four summary texts attached to a record.
///
/// `doctor` is the only human-edited field (the editable note). The other
/// three are machine-derived from `doctor` + `tests` at commit time and
/// stay empty until the first commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySet {
    pub doctor: String,
    pub patient: String,
    pub nurse: String,
    pub student: String,
    /// RFC 3339 timestamp of the last commit. `None` until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<String>,
}

impl PatientRecord {
    /// A fresh record with empty summaries and no ordered tests.
    pub fn new(name: &str, age: u32, weight: f64, reason: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            weight,
            reason: reason.to_string(),
            email: email.to_string(),
            summaries: SummarySet::default(),
            tests: Vec::new(),
        }
    }

    /// Whether any derived summary has ever been generated.
    pub fn has_derived_summaries(&self) -> bool {
        self.summaries.committed_at.is_some()
    }
}
