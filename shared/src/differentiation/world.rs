use std::collections::BTreeMap;

use crate::{
    differentiation::{
        body::BodyDifferentiator,
        differentiator::{DeltaError, Differentiator},
    },
    snapshot::world::{DeltaWorldSnapshot, PlayerDelta, WorldSnapshot},
};

/// Differentiates world snapshots player by player.
///
/// * a player in both snapshots gets a body delta, or nothing if unchanged
/// * a player new since the baseline gets a full body delta
/// * a player gone since the baseline is marked `Removed`
#[derive(Clone, Copy, Default)]
pub struct WorldDifferentiator {
    body: BodyDifferentiator,
}

impl WorldDifferentiator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Differentiator<WorldSnapshot, DeltaWorldSnapshot> for WorldDifferentiator {
    fn create_delta(
        &self,
        current: &WorldSnapshot,
        baseline: Option<&WorldSnapshot>,
    ) -> Option<DeltaWorldSnapshot> {
        let Some(baseline) = baseline else {
            return Some(self.full_delta(current));
        };

        let mut players = BTreeMap::new();

        for (id, body) in &current.players {
            if let Some(delta) = self.body.create_delta(body, baseline.players.get(id)) {
                players.insert(*id, PlayerDelta::Updated(delta));
            }
        }

        for id in baseline.players.keys() {
            if !current.players.contains_key(id) {
                players.insert(*id, PlayerDelta::Removed);
            }
        }

        if players.is_empty() {
            None
        } else {
            Some(DeltaWorldSnapshot { players })
        }
    }

    fn consume_delta(
        &self,
        delta: DeltaWorldSnapshot,
        baseline: Option<&WorldSnapshot>,
    ) -> Result<WorldSnapshot, DeltaError> {
        let mut players = baseline
            .map(|baseline| baseline.players.clone())
            .unwrap_or_default();

        for (id, player_delta) in delta.players {
            match player_delta {
                PlayerDelta::Removed => {
                    players.remove(&id);
                }
                PlayerDelta::Updated(body_delta) => {
                    let body = self.body.consume_delta(body_delta, players.get(&id))?;
                    players.insert(id, body);
                }
            }
        }

        Ok(WorldSnapshot { players })
    }

    fn full_delta(&self, current: &WorldSnapshot) -> DeltaWorldSnapshot {
        DeltaWorldSnapshot {
            players: current
                .players
                .iter()
                .map(|(id, body)| (*id, PlayerDelta::Updated(self.body.full_delta(body))))
                .collect(),
        }
    }
}
