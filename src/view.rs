//! Role view synchronization.
//!
//! Each role screen owns a `RoleView`: a small selection state machine
//! plus a bus receiver. The shell calls `select` on clicks and `pump`
//! after commits; both return plain view models to repaint, so the
//! whole synchronization story is testable without any rendering layer.
//!
//! Pull model: bus events carry only the roster index. Every panel and
//! preview is rebuilt from current store state at render time, so a
//! view that misses events can always recover by repainting.

use serde::Serialize;

use crate::broadcast::UpdateReceiver;
use crate::error::VisitError;
use crate::models::{PatientRecord, Role};
use crate::orders::SelectionView;
use crate::state::VisitState;
use crate::summary::deidentified_label;

/// Nurse detail body before any summary has arrived.
const NURSE_DETAIL_FALLBACK: &str = "No summary received yet.";

/// Nurse roster-card preview before any summary has arrived.
const NURSE_PREVIEW_FALLBACK: &str = "No summary yet.";

/// Student detail body before any summary has arrived.
const STUDENT_DETAIL_FALLBACK: &str = "Teaching summary will appear here.";

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// One roster card. `headline` is the patient name, except on the
/// student screen where it is the de-identified label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterCard {
    pub index: usize,
    pub headline: String,
    pub age: u32,
    pub weight: f64,
    /// Visit reason (the "Case" line on the student screen).
    pub case_line: String,
    /// One-line handoff excerpt; nurse cards only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub active: bool,
}

/// Doctor detail panel: the editable visit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorPanel {
    pub index: usize,
    pub name: String,
    pub age: u32,
    pub weight: f64,
    pub reason: String,
    pub email: String,
    /// The editable note: last saved or transcribed text.
    pub note: String,
    pub selection: SelectionView,
    pub recording: bool,
}

/// Nurse detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NursePanel {
    pub index: usize,
    /// `"{name} — {reason}"`.
    pub header: String,
    pub handoff: String,
    pub tests: Vec<String>,
}

/// Student detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentPanel {
    pub index: usize,
    /// `"Patient {n} — {reason}"`; never the name.
    pub header: String,
    pub case_text: String,
    pub tests: Vec<String>,
}

/// Detail panel for whichever role the view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Panel {
    Doctor(DoctorPanel),
    Nurse(NursePanel),
    Student(StudentPanel),
}

/// A nurse roster-card preview to swap in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewUpdate {
    pub index: usize,
    pub text: String,
}

/// What one pump pass asks the shell to repaint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderPass {
    /// Fresh detail panel, when the committed record is the one on
    /// screen (or the receiver lagged and everything is repainted).
    pub panel: Option<Panel>,
    /// Card previews to swap; nurse views only.
    pub previews: Vec<PreviewUpdate>,
}

// ---------------------------------------------------------------------------
// Selection state machine
// ---------------------------------------------------------------------------

/// Selection state of one role screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Screen not on a record yet.
    Unselected,
    /// Showing the record at this roster index.
    Viewing(usize),
}

/// One role screen: selection state plus a bus subscription.
pub struct RoleView {
    role: Role,
    state: ViewState,
    receiver: UpdateReceiver,
}

impl RoleView {
    /// Open the screen for `role`. Subscribes to commit notifications
    /// and auto-selects the first record when the roster is non-empty.
    pub fn open(role: Role, visit: &VisitState) -> Result<Self, VisitError> {
        let mut view = Self {
            role,
            state: ViewState::Unselected,
            receiver: visit.subscribe(),
        };
        if !visit.is_empty() {
            view.select(visit, 0)?;
        }
        Ok(view)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn current(&self) -> ViewState {
        self.state
    }

    /// Put the record at `index` on screen. Updates this role's store
    /// selection only; other roles keep theirs.
    pub fn select(&mut self, visit: &VisitState, index: usize) -> Result<Panel, VisitError> {
        visit.set_active(self.role, index)?;
        self.state = ViewState::Viewing(index);
        tracing::debug!(role = %self.role, index, "view selection changed");
        self.build_panel(visit, index)
    }

    /// Render the current detail panel, `None` while unselected.
    pub fn panel(&self, visit: &VisitState) -> Result<Option<Panel>, VisitError> {
        match self.state {
            ViewState::Unselected => Ok(None),
            ViewState::Viewing(index) => self.build_panel(visit, index).map(Some),
        }
    }

    /// Render the roster cards for this screen.
    pub fn cards(&self, visit: &VisitState) -> Result<Vec<RosterCard>, VisitError> {
        let roster = visit.roster()?;
        Ok(roster
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let headline = match self.role {
                    Role::Student => deidentified_label(index),
                    _ => record.name.clone(),
                };
                RosterCard {
                    index,
                    headline,
                    age: record.age,
                    weight: record.weight,
                    case_line: record.reason.clone(),
                    preview: (self.role == Role::Nurse).then(|| nurse_preview(record)),
                    active: self.state == ViewState::Viewing(index),
                }
            })
            .collect())
    }

    /// Apply everything published since the last pass.
    ///
    /// A commit for the record on screen re-renders the detail panel;
    /// commits for other records leave it untouched. Nurse views also
    /// refresh the card preview of every committed record, whether or
    /// not it is the one on screen. A lagged receiver degrades to a
    /// full repaint from current state.
    pub fn pump(&mut self, visit: &VisitState) -> Result<RenderPass, VisitError> {
        let drained = self.receiver.drain();
        let mut pass = RenderPass::default();

        if drained.lagged {
            pass.panel = self.panel(visit)?;
            if self.role == Role::Nurse {
                for (index, record) in visit.roster()?.iter().enumerate() {
                    pass.previews.push(PreviewUpdate {
                        index,
                        text: nurse_preview(record),
                    });
                }
            }
            return Ok(pass);
        }

        for update in &drained.updates {
            if self.role == Role::Nurse && !pass.previews.iter().any(|p| p.index == update.index) {
                let record = visit.record(update.index)?;
                pass.previews.push(PreviewUpdate {
                    index: update.index,
                    text: nurse_preview(&record),
                });
            }
            if self.state == ViewState::Viewing(update.index) {
                pass.panel = self.panel(visit)?;
            }
        }
        Ok(pass)
    }

    fn build_panel(&self, visit: &VisitState, index: usize) -> Result<Panel, VisitError> {
        let record = visit.record(index)?;
        let panel = match self.role {
            Role::Doctor => Panel::Doctor(DoctorPanel {
                index,
                name: record.name.clone(),
                age: record.age,
                weight: record.weight,
                reason: record.reason.clone(),
                email: record.email.clone(),
                note: record.summaries.doctor.clone(),
                selection: SelectionView::of(&record.tests),
                recording: visit.is_recording(index),
            }),
            Role::Nurse => Panel::Nurse(NursePanel {
                index,
                header: format!("{} — {}", record.name, record.reason),
                handoff: or_fallback(&record.summaries.nurse, NURSE_DETAIL_FALLBACK),
                tests: record.tests.clone(),
            }),
            Role::Student => Panel::Student(StudentPanel {
                index,
                header: format!("{} — {}", deidentified_label(index), record.reason),
                case_text: or_fallback(&record.summaries.student, STUDENT_DETAIL_FALLBACK),
                tests: record.tests.clone(),
            }),
        };
        Ok(panel)
    }
}

fn or_fallback(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// First line of the nurse handoff text, or the empty-state literal.
fn nurse_preview(record: &PatientRecord) -> String {
    let text = record.summaries.nurse.as_str();
    match text.lines().next() {
        Some(line) if !line.is_empty() => line.to_string(),
        _ => NURSE_PREVIEW_FALLBACK.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_nurse_text(visit: &VisitState, index: usize, text: &str) {
        visit
            .update(index, |record| {
                record.summaries.nurse = text.to_string();
            })
            .unwrap();
        visit.publish_update(index);
    }

    #[test]
    fn open_on_empty_roster_stays_unselected() {
        let visit = VisitState::with_roster(Vec::new());
        let view = RoleView::open(Role::Doctor, &visit).unwrap();
        assert_eq!(view.current(), ViewState::Unselected);
        assert!(view.panel(&visit).unwrap().is_none());
    }

    #[test]
    fn open_auto_selects_the_first_record() {
        let visit = VisitState::new();
        let view = RoleView::open(Role::Nurse, &visit).unwrap();
        assert_eq!(view.current(), ViewState::Viewing(0));
        assert_eq!(visit.active(Role::Nurse).unwrap(), Some(0));
    }

    #[test]
    fn select_out_of_range_keeps_the_old_selection() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Doctor, &visit).unwrap();
        assert!(matches!(
            view.select(&visit, 11),
            Err(VisitError::RecordNotFound { index: 11 })
        ));
        assert_eq!(view.current(), ViewState::Viewing(0));
    }

    #[test]
    fn selecting_one_role_leaves_the_others_alone() {
        let visit = VisitState::new();
        let mut doctor = RoleView::open(Role::Doctor, &visit).unwrap();
        doctor.select(&visit, 2).unwrap();

        let student = RoleView::open(Role::Student, &visit).unwrap();
        assert_eq!(student.current(), ViewState::Viewing(0));
        assert_eq!(visit.active(Role::Doctor).unwrap(), Some(2));
        assert_eq!(visit.active(Role::Student).unwrap(), Some(0));
    }

    #[test]
    fn doctor_panel_mirrors_the_record() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Doctor, &visit).unwrap();
        let panel = view.select(&visit, 1).unwrap();
        match panel {
            Panel::Doctor(p) => {
                assert_eq!(p.index, 1);
                assert_eq!(p.name, "Rahul Bose");
                assert_eq!(p.reason, "Headache");
                assert_eq!(p.note, "");
                assert!(!p.recording);
                assert!(p.selection.chips.is_empty());
            }
            other => panic!("expected a doctor panel, got: {other:?}"),
        }
    }

    #[test]
    fn doctor_panel_reflects_a_live_recording() {
        let visit = VisitState::new();
        visit.begin_recording(0).unwrap();
        let view = RoleView::open(Role::Doctor, &visit).unwrap();
        match view.panel(&visit).unwrap() {
            Some(Panel::Doctor(p)) => assert!(p.recording),
            other => panic!("expected a doctor panel, got: {other:?}"),
        }
    }

    #[test]
    fn nurse_panel_uses_the_empty_state_literal() {
        let visit = VisitState::new();
        let view = RoleView::open(Role::Nurse, &visit).unwrap();
        match view.panel(&visit).unwrap() {
            Some(Panel::Nurse(p)) => {
                assert_eq!(p.header, "Meera Krishnan — Chest Pain");
                assert_eq!(p.handoff, "No summary received yet.");
            }
            other => panic!("expected a nurse panel, got: {other:?}"),
        }
    }

    #[test]
    fn student_panel_is_deidentified() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Student, &visit).unwrap();
        let panel = view.select(&visit, 2).unwrap();
        match panel {
            Panel::Student(p) => {
                assert_eq!(p.header, "Patient 3 — Fever");
                assert_eq!(p.case_text, "Teaching summary will appear here.");
            }
            other => panic!("expected a student panel, got: {other:?}"),
        }
    }

    #[test]
    fn student_cards_never_show_the_name() {
        let visit = VisitState::new();
        let view = RoleView::open(Role::Student, &visit).unwrap();
        let cards = view.cards(&visit).unwrap();
        assert_eq!(cards[0].headline, "Patient 1");
        assert_eq!(cards[0].case_line, "Chest Pain");
        assert!(cards.iter().all(|c| !c.headline.contains("Meera")));
        assert!(cards[0].active);
    }

    #[test]
    fn nurse_cards_carry_the_preview_fallback() {
        let visit = VisitState::new();
        let view = RoleView::open(Role::Nurse, &visit).unwrap();
        let cards = view.cards(&visit).unwrap();
        assert_eq!(cards[3].preview.as_deref(), Some("No summary yet."));
        assert!(!cards[3].active);
    }

    #[test]
    fn doctor_cards_have_no_preview() {
        let visit = VisitState::new();
        let view = RoleView::open(Role::Doctor, &visit).unwrap();
        let cards = view.cards(&visit).unwrap();
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.preview.is_none()));
    }

    #[test]
    fn pump_refreshes_the_panel_for_the_viewed_record() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Nurse, &visit).unwrap();
        commit_nurse_text(&visit, 0, "Meera Krishnan (Age 50) — Chest Pain\nHandoff notes:");

        let pass = view.pump(&visit).unwrap();
        match pass.panel {
            Some(Panel::Nurse(p)) => assert!(p.handoff.starts_with("Meera Krishnan")),
            other => panic!("expected a nurse panel, got: {other:?}"),
        }
        assert_eq!(
            pass.previews,
            vec![PreviewUpdate {
                index: 0,
                text: "Meera Krishnan (Age 50) — Chest Pain".to_string(),
            }]
        );
    }

    #[test]
    fn pump_for_another_record_leaves_the_panel_untouched() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Nurse, &visit).unwrap();
        commit_nurse_text(&visit, 2, "Lena Fischer (Age 29) — Fever\nHandoff notes:");

        let pass = view.pump(&visit).unwrap();
        assert!(pass.panel.is_none());
        assert_eq!(pass.previews.len(), 1);
        assert_eq!(pass.previews[0].index, 2);
    }

    #[test]
    fn doctor_pump_never_produces_previews() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Doctor, &visit).unwrap();
        commit_nurse_text(&visit, 0, "text");
        let pass = view.pump(&visit).unwrap();
        assert!(pass.previews.is_empty());
        assert!(pass.panel.is_some());
    }

    #[test]
    fn lagged_receiver_repaints_from_fresh_state() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Nurse, &visit).unwrap();
        visit
            .update(1, |record| {
                record.summaries.nurse = "Rahul Bose (Age 35) — Headache".to_string();
            })
            .unwrap();
        // Far more events than the bus buffers.
        for _ in 0..100 {
            visit.publish_update(1);
        }

        let pass = view.pump(&visit).unwrap();
        assert!(pass.panel.is_some());
        assert_eq!(pass.previews.len(), 5);
        assert_eq!(pass.previews[1].text, "Rahul Bose (Age 35) — Headache");
        assert_eq!(pass.previews[0].text, "No summary yet.");
    }

    #[test]
    fn repeated_commits_produce_one_preview_per_record() {
        let visit = VisitState::new();
        let mut view = RoleView::open(Role::Nurse, &visit).unwrap();
        commit_nurse_text(&visit, 1, "first");
        commit_nurse_text(&visit, 1, "second");

        let pass = view.pump(&visit).unwrap();
        assert_eq!(pass.previews.len(), 1);
        assert_eq!(pass.previews[0].text, "second");
    }
}
