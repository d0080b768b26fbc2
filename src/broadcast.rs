//! Typed change-notification channel between the store and role views.
//!
//! One bus per session. A commit publishes `PatientUpdated { index }` and
//! nothing else — the event never carries record data. Subscribers pull
//! fresh state from the store when they react, so delivery order and
//! ring-buffer overwrites cannot leave a view rendering stale payloads.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Ring-buffer depth per subscriber. A shell that pumps its views once
/// per interaction never gets near this; a stalled subscriber lags and
/// re-renders from fresh state instead of replaying.
const BUS_CAPACITY: usize = 32;

/// Change notification: the record at `index` was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatientUpdated {
    pub index: usize,
}

/// The session-wide mutation-notification channel.
pub struct UpdateBus {
    tx: broadcast::Sender<PatientUpdated>,
}

impl UpdateBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Hand out an independent receiver. Each view subscribes once and
    /// keeps its receiver for the life of the screen.
    pub fn subscribe(&self) -> UpdateReceiver {
        UpdateReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Publish a change. Returns how many subscribers it reached; zero
    /// (no view open yet) is not an error.
    pub fn publish(&self, update: PatientUpdated) -> usize {
        match self.tx.send(update) {
            Ok(reached) => reached,
            Err(_) => {
                tracing::debug!(index = update.index, "patient update published with no subscribers");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one drain pass observed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Drained {
    /// Updates in publish order.
    pub updates: Vec<PatientUpdated>,
    /// The subscriber fell behind and missed some updates. Callers
    /// should re-render from current store state rather than replay.
    pub lagged: bool,
}

/// One view's end of the bus.
pub struct UpdateReceiver {
    rx: broadcast::Receiver<PatientUpdated>,
}

impl UpdateReceiver {
    /// Non-blocking: collect everything published since the last pass.
    pub fn drain(&mut self) -> Drained {
        let mut out = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(update) => out.updates.push(update),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "update receiver lagged behind the bus");
                    out.lagged = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        out
    }

    /// Await the next update (for async shells). `None` once the bus is
    /// dropped. A lag is skipped over: the next delivered update plus
    /// pull-model reads already yield current state.
    pub async fn updated(&mut self) -> Option<PatientUpdated> {
        loop {
            match self.rx.recv().await {
                Ok(update) => return Some(update),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "update receiver lagged behind the bus");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
