use crate::{
    differentiation::differentiator::{DeltaError, Differentiator},
    snapshot::{
        body::{BodySnapshot, DeltaBodySnapshot},
        transform::Transform,
    },
};

/// Field-by-field differentiator for body (input) snapshots
#[derive(Clone, Copy, Default)]
pub struct BodyDifferentiator;

fn changed(current: &Transform, baseline: Option<&Transform>) -> Option<Transform> {
    match baseline {
        Some(baseline) if baseline.bitwise_eq(current) => None,
        _ => Some(*current),
    }
}

fn resolve(
    field: &'static str,
    delta: Option<Transform>,
    baseline: Option<&Transform>,
) -> Result<Transform, DeltaError> {
    match (delta, baseline) {
        (Some(value), _) => Ok(value),
        (None, Some(baseline)) => Ok(*baseline),
        (None, None) => Err(DeltaError::MissingBaseline { field }),
    }
}

impl Differentiator<BodySnapshot, DeltaBodySnapshot> for BodyDifferentiator {
    fn create_delta(
        &self,
        current: &BodySnapshot,
        baseline: Option<&BodySnapshot>,
    ) -> Option<DeltaBodySnapshot> {
        let delta = DeltaBodySnapshot {
            head: changed(&current.head, baseline.map(|b| &b.head)),
            left_hand: changed(&current.left_hand, baseline.map(|b| &b.left_hand)),
            right_hand: changed(&current.right_hand, baseline.map(|b| &b.right_hand)),
        };

        if delta.is_empty() {
            None
        } else {
            Some(delta)
        }
    }

    fn consume_delta(
        &self,
        delta: DeltaBodySnapshot,
        baseline: Option<&BodySnapshot>,
    ) -> Result<BodySnapshot, DeltaError> {
        Ok(BodySnapshot {
            head: resolve("head", delta.head, baseline.map(|b| &b.head))?,
            left_hand: resolve("left_hand", delta.left_hand, baseline.map(|b| &b.left_hand))?,
            right_hand: resolve("right_hand", delta.right_hand, baseline.map(|b| &b.right_hand))?,
        })
    }

    fn full_delta(&self, current: &BodySnapshot) -> DeltaBodySnapshot {
        DeltaBodySnapshot {
            head: Some(current.head),
            left_hand: Some(current.left_hand),
            right_hand: Some(current.right_hand),
        }
    }
}
