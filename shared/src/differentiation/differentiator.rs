use thiserror::Error;

/// Errors raised while rebuilding a snapshot from a delta
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    /// The delta left a field out, but there is no baseline to take it from
    #[error("Delta omits `{field}` but no baseline is available to fill it in")]
    MissingBaseline { field: &'static str },
}

/// Turns full snapshots into deltas against a baseline, and back.
///
/// For every snapshot `s` and optional baseline `b`:
/// `consume_delta(create_delta(s, b).unwrap_or(full_delta(s)), b) == s`
pub trait Differentiator<S, D>: Send + Sync {
    /// Returns `None` when there is a baseline and nothing changed.
    /// Without a baseline the delta carries the full snapshot.
    fn create_delta(&self, current: &S, baseline: Option<&S>) -> Option<D>;

    /// Rebuilds the full snapshot. Without a baseline, every field must be in
    /// the delta.
    fn consume_delta(&self, delta: D, baseline: Option<&S>) -> Result<S, DeltaError>;

    /// A delta carrying every field of `current`
    fn full_delta(&self, current: &S) -> D;
}
