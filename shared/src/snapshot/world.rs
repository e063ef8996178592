use std::collections::BTreeMap;

use crate::types::PlayerId;

use super::body::{BodySnapshot, DeltaBodySnapshot};

/// Authoritative state of every connected player at one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    pub players: BTreeMap<PlayerId, BodySnapshot>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, id: PlayerId, body: BodySnapshot) -> Self {
        self.players.insert(id, body);
        self
    }
}

/// Change to a single player slot
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerDelta {
    /// The player is present; only the changed body fields are carried
    Updated(DeltaBodySnapshot),
    /// The player was present in the baseline and has since left
    Removed,
}

/// Per-player changes relative to a baseline `WorldSnapshot`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaWorldSnapshot {
    pub players: BTreeMap<PlayerId, PlayerDelta>,
}

impl DeltaWorldSnapshot {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
