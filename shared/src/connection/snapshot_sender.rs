use crate::differentiation::differentiator::Differentiator;

/// Outgoing half of a snapshot stream. Remembers the last snapshot the remote
/// side was sent, so each new one only costs what changed.
pub struct SnapshotSender<S, D> {
    differentiator: Box<dyn Differentiator<S, D>>,
    last_sent: Option<S>,
}

impl<S, D> SnapshotSender<S, D> {
    pub fn new(differentiator: Box<dyn Differentiator<S, D>>) -> Self {
        Self {
            differentiator,
            last_sent: None,
        }
    }

    /// The delta to send for `current`, or `None` if there is nothing new
    pub fn delta(&self, current: &S) -> Option<D> {
        self.differentiator
            .create_delta(current, self.last_sent.as_ref())
    }

    /// Makes `snapshot` the baseline for the next delta. Call only once the
    /// transport has taken the message.
    pub fn mark_sent(&mut self, snapshot: S) {
        self.last_sent = Some(snapshot);
    }

    pub fn last_sent(&self) -> Option<&S> {
        self.last_sent.as_ref()
    }
}
