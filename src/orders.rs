//! Test-selection subsystem.
//!
//! Ordered tests are plain strings on the record: a built-in panel of
//! common tests plus free-text custom entries. Adds and removals are
//! idempotent and never touch the derived summaries or the update bus;
//! other roles pick up test changes on their next selection- or
//! commit-driven render.

use serde::{Deserialize, Serialize};

use crate::error::VisitError;
use crate::seed::BUILTIN_TESTS;
use crate::state::VisitState;

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// One checkbox row of the built-in panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    pub name: String,
    pub checked: bool,
}

/// What the ordering screen re-renders after a change: the chip list in
/// insertion order, and the checkbox state of the built-in panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionView {
    pub chips: Vec<String>,
    pub panel: Vec<PanelEntry>,
}

impl SelectionView {
    /// Build from a record's current test list.
    pub fn of(tests: &[String]) -> Self {
        Self {
            chips: tests.to_vec(),
            panel: BUILTIN_TESTS
                .iter()
                .map(|&name| PanelEntry {
                    name: name.to_string(),
                    checked: tests.iter().any(|t| t == name),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Order a test for the record at `index`.
///
/// The name is trimmed; a whitespace-only name or an exact duplicate of
/// an already-ordered test leaves the list unchanged. New names append
/// at the end, so chips keep first-insertion order.
pub fn add_test(state: &VisitState, index: usize, name: &str) -> Result<SelectionView, VisitError> {
    let trimmed = name.trim();
    let tests = state.update(index, |record| {
        if !trimmed.is_empty() && !record.tests.iter().any(|t| t == trimmed) {
            record.tests.push(trimmed.to_string());
            tracing::debug!(index, test = trimmed, "test ordered");
        }
        record.tests.clone()
    })?;
    Ok(SelectionView::of(&tests))
}

/// Cancel an ordered test for the record at `index`.
///
/// A name that is not on the list is a no-op; removal preserves the
/// relative order of the remaining chips. Matching is exact, since the
/// name comes from a chip or checkbox the shell already renders.
pub fn remove_test(
    state: &VisitState,
    index: usize,
    name: &str,
) -> Result<SelectionView, VisitError> {
    let tests = state.update(index, |record| {
        if let Some(pos) = record.tests.iter().position(|t| t == name) {
            record.tests.remove(pos);
            tracing::debug!(index, test = name, "test cancelled");
        }
        record.tests.clone()
    })?;
    Ok(SelectionView::of(&tests))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_lists_every_builtin_unchecked() {
        let view = SelectionView::of(&[]);
        assert_eq!(view.panel.len(), BUILTIN_TESTS.len());
        assert_eq!(view.panel[0].name, "CBC");
        assert!(view.panel.iter().all(|entry| !entry.checked));
        assert!(view.chips.is_empty());
    }

    #[test]
    fn add_appends_chip_and_checks_builtin() {
        let state = VisitState::new();
        let view = add_test(&state, 0, "ECG").unwrap();
        assert_eq!(view.chips, vec!["ECG"]);
        let ecg = view.panel.iter().find(|e| e.name == "ECG").unwrap();
        assert!(ecg.checked);
    }

    #[test]
    fn add_trims_the_name() {
        let state = VisitState::new();
        let view = add_test(&state, 0, "  MRI  ").unwrap();
        assert_eq!(view.chips, vec!["MRI"]);
    }

    #[test]
    fn whitespace_only_name_is_a_no_op() {
        let state = VisitState::new();
        let view = add_test(&state, 0, "   ").unwrap();
        assert!(view.chips.is_empty());
    }

    #[test]
    fn duplicate_add_keeps_one_entry_at_first_position() {
        let state = VisitState::new();
        add_test(&state, 2, "CBC").unwrap();
        add_test(&state, 2, "ECG").unwrap();
        let view = add_test(&state, 2, "CBC").unwrap();
        assert_eq!(view.chips, vec!["CBC", "ECG"]);
    }

    #[test]
    fn custom_name_shows_as_chip_but_not_panel_row() {
        let state = VisitState::new();
        let view = add_test(&state, 0, "Troponin").unwrap();
        assert_eq!(view.chips, vec!["Troponin"]);
        assert!(view.panel.iter().all(|e| e.name != "Troponin"));
    }

    #[test]
    fn remove_preserves_relative_order() {
        let state = VisitState::new();
        add_test(&state, 1, "CBC").unwrap();
        add_test(&state, 1, "CMP").unwrap();
        add_test(&state, 1, "ECG").unwrap();
        let view = remove_test(&state, 1, "CMP").unwrap();
        assert_eq!(view.chips, vec!["CBC", "ECG"]);
    }

    #[test]
    fn remove_of_absent_name_is_a_no_op() {
        let state = VisitState::new();
        add_test(&state, 1, "CBC").unwrap();
        let view = remove_test(&state, 1, "MRI").unwrap();
        assert_eq!(view.chips, vec!["CBC"]);
        let again = remove_test(&state, 1, "MRI").unwrap();
        assert_eq!(again.chips, vec!["CBC"]);
    }

    #[test]
    fn remove_unchecks_the_builtin_row() {
        let state = VisitState::new();
        add_test(&state, 0, "HbA1c").unwrap();
        let view = remove_test(&state, 0, "HbA1c").unwrap();
        let row = view.panel.iter().find(|e| e.name == "HbA1c").unwrap();
        assert!(!row.checked);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let state = VisitState::new();
        assert!(matches!(
            add_test(&state, 17, "CBC"),
            Err(VisitError::RecordNotFound { index: 17 })
        ));
    }

    #[test]
    fn changes_publish_nothing_on_the_bus() {
        let state = VisitState::new();
        let mut rx = state.subscribe();
        add_test(&state, 0, "CBC").unwrap();
        remove_test(&state, 0, "CBC").unwrap();
        assert!(rx.drain().updates.is_empty());
    }
}
