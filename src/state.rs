//! Shared visit-session state.
//!
//! `VisitState` is the authoritative store for one clinic session: the
//! seeded patient roster, each role screen's active selection, and the
//! at-most-one live-capture association. Wrapped in `Arc` by the shell
//! so every surface reads the same instance. Uses `RwLock` for the
//! roster to allow concurrent reads (most operations) while blocking
//! only on field-level writes.

use std::sync::{Mutex, RwLock};

use crate::broadcast::{PatientUpdated, UpdateBus, UpdateReceiver};
use crate::error::VisitError;
use crate::models::{PatientRecord, Role};
use crate::seed;

// ═══════════════════════════════════════════════════════════
// VisitState — shared by every role view and the session facade
// ═══════════════════════════════════════════════════════════

pub struct VisitState {
    /// In-memory roster. A record's index is its identity for the
    /// session; records are never created or deleted at runtime.
    roster: RwLock<Vec<PatientRecord>>,
    /// Active roster index per role screen, indexed by `Role::slot()`.
    /// `None` until that role's screen first selects.
    active: RwLock<[Option<usize>; 3]>,
    /// Roster index the live capture is bound to, when one is running.
    recording: Mutex<Option<usize>>,
    /// Commit-notification channel shared with every role view.
    bus: UpdateBus,
}

impl VisitState {
    /// Session state seeded with the demo roster.
    pub fn new() -> Self {
        Self::with_roster(seed::demo_roster())
    }

    /// Session state over a caller-supplied roster.
    pub fn with_roster(roster: Vec<PatientRecord>) -> Self {
        Self {
            roster: RwLock::new(roster),
            active: RwLock::new([None; 3]),
            recording: Mutex::new(None),
            bus: UpdateBus::new(),
        }
    }

    // ── Roster access (read path) ───────────────────────────

    pub fn len(&self) -> usize {
        self.roster.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone out one record. Out-of-range indices are reported, never
    /// silently ignored.
    pub fn record(&self, index: usize) -> Result<PatientRecord, VisitError> {
        let roster = self.roster.read().map_err(|_| VisitError::LockPoisoned)?;
        roster
            .get(index)
            .cloned()
            .ok_or(VisitError::RecordNotFound { index })
    }

    /// Snapshot of the whole roster, for card lists.
    pub fn roster(&self) -> Result<Vec<PatientRecord>, VisitError> {
        let roster = self.roster.read().map_err(|_| VisitError::LockPoisoned)?;
        Ok(roster.clone())
    }

    // ── Per-role selection ──────────────────────────────────

    /// Make `index` the active record for `role`'s screen. Other roles'
    /// selections are untouched; selecting never derives or publishes.
    pub fn set_active(&self, role: Role, index: usize) -> Result<(), VisitError> {
        {
            let roster = self.roster.read().map_err(|_| VisitError::LockPoisoned)?;
            if index >= roster.len() {
                return Err(VisitError::RecordNotFound { index });
            }
        }
        let mut active = self.active.write().map_err(|_| VisitError::LockPoisoned)?;
        active[role.slot()] = Some(index);
        tracing::debug!(%role, index, "active record changed");
        Ok(())
    }

    /// The record `role`'s screen is on, if it has selected one yet.
    pub fn active(&self, role: Role) -> Result<Option<usize>, VisitError> {
        let active = self.active.read().map_err(|_| VisitError::LockPoisoned)?;
        Ok(active[role.slot()])
    }

    // ── Live-capture association ────────────────────────────

    /// Bind the live capture to `index`, returning the index it was
    /// bound to before, if any. At most one record is bound at a time;
    /// starting again while another record is bound re-targets the
    /// association (the doctor switched patients between start and
    /// stop) and logs a warning.
    pub fn begin_recording(&self, index: usize) -> Result<Option<usize>, VisitError> {
        {
            let roster = self.roster.read().map_err(|_| VisitError::LockPoisoned)?;
            if index >= roster.len() {
                return Err(VisitError::RecordNotFound { index });
            }
        }
        let mut recording = self.recording.lock().map_err(|_| VisitError::LockPoisoned)?;
        let previous = recording.replace(index);
        if let Some(previous) = previous {
            if previous != index {
                tracing::warn!(previous, index, "live capture re-targeted to a different record");
            }
        }
        Ok(previous)
    }

    /// Clear the association, returning the record it was bound to.
    pub fn finish_recording(&self) -> Result<Option<usize>, VisitError> {
        let mut recording = self.recording.lock().map_err(|_| VisitError::LockPoisoned)?;
        Ok(recording.take())
    }

    /// Whether the live capture is currently bound to `index` (drives
    /// the doctor view's recording indicator).
    pub fn is_recording(&self, index: usize) -> bool {
        self.recording
            .lock()
            .map(|bound| *bound == Some(index))
            .unwrap_or(false)
    }

    // ── Controlled mutation + notifications ─────────────────

    /// Field-level mutation of one record. `f` runs under the write
    /// lock; keep it free of I/O and `.await`.
    pub(crate) fn update<F, T>(&self, index: usize, f: F) -> Result<T, VisitError>
    where
        F: FnOnce(&mut PatientRecord) -> T,
    {
        let mut roster = self.roster.write().map_err(|_| VisitError::LockPoisoned)?;
        let record = roster
            .get_mut(index)
            .ok_or(VisitError::RecordNotFound { index })?;
        Ok(f(record))
    }

    /// Subscribe a view to commit notifications.
    pub fn subscribe(&self) -> UpdateReceiver {
        self.bus.subscribe()
    }

    /// Announce that the record at `index` was committed. Returns how
    /// many subscribers the event reached.
    pub(crate) fn publish_update(&self, index: usize) -> usize {
        self.bus.publish(PatientUpdated { index })
    }
}

impl Default for VisitState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
