use crate::{
    differentiation::differentiator::{DeltaError, Differentiator},
    history::{HistoryError, SnapshotHistory},
    types::Tick,
};

/// Incoming half of a snapshot stream: rebuilds full snapshots from deltas and
/// keeps the recent ones for fitting.
pub struct SnapshotReceiver<S, D> {
    differentiator: Box<dyn Differentiator<S, D>>,
    history: SnapshotHistory<S>,
    latest: Option<S>,
}

impl<S: Clone, D> SnapshotReceiver<S, D> {
    pub fn new(differentiator: Box<dyn Differentiator<S, D>>, history: SnapshotHistory<S>) -> Self {
        Self {
            differentiator,
            history,
            latest: None,
        }
    }

    /// Rebuilds the full snapshot against the latest one received, which it
    /// then replaces
    pub fn apply(&mut self, delta: D) -> Result<S, DeltaError> {
        let snapshot = self
            .differentiator
            .consume_delta(delta, self.latest.as_ref())?;
        self.latest = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Files a rebuilt snapshot under the tick it was sent at and the local
    /// time it arrived at
    pub fn record(&mut self, tick: Tick, time: f64, snapshot: S) -> Result<(), HistoryError> {
        self.history.push(tick, time, snapshot)
    }

    pub fn latest(&self) -> Option<&S> {
        self.latest.as_ref()
    }

    pub fn history(&self) -> &SnapshotHistory<S> {
        &self.history
    }
}
