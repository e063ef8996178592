use std::collections::BTreeMap;

use snapsync_serde::{bits_required, BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    serialization::serializer::{SerdeSerializer, Serializer},
    snapshot::{
        body::DeltaBodySnapshot,
        world::{DeltaWorldSnapshot, PlayerDelta},
    },
    types::PlayerId,
};

pub type DeltaBodySnapshotSerializer = SerdeSerializer<DeltaBodySnapshot>;

/// Encodes a `DeltaWorldSnapshot` using as few bits for player ids and the
/// entry count as `max_players` allows:
///
/// `[count][id][removed: bit][DeltaBodySnapshot]? ...`
pub struct DeltaWorldSnapshotSerializer {
    max_players: PlayerId,
    count_bits: u8,
    id_bits: u8,
    body: DeltaBodySnapshotSerializer,
}

impl DeltaWorldSnapshotSerializer {
    pub fn new(max_players: PlayerId) -> Self {
        Self {
            max_players,
            count_bits: bits_required(u64::from(max_players)),
            id_bits: bits_required(u64::from(max_players.saturating_sub(1))),
            body: SerdeSerializer::new(),
        }
    }

    pub fn max_players(&self) -> PlayerId {
        self.max_players
    }
}

impl Serializer<DeltaWorldSnapshot> for DeltaWorldSnapshotSerializer {
    fn ser(&self, value: &DeltaWorldSnapshot, writer: &mut dyn BitWrite) {
        debug_assert!(value.players.len() <= self.max_players as usize);
        debug_assert!(value.players.keys().all(|id| *id < self.max_players));

        writer.write_bits(value.players.len() as u64, self.count_bits);

        for (id, delta) in &value.players {
            writer.write_bits(u64::from(*id), self.id_bits);
            match delta {
                PlayerDelta::Removed => {
                    writer.write_bit(true);
                }
                PlayerDelta::Updated(body) => {
                    writer.write_bit(false);
                    self.body.ser(body, writer);
                }
            }
        }
    }

    fn de(&self, reader: &mut BitReader) -> Result<DeltaWorldSnapshot, SerdeErr> {
        let count = reader.read_bits(self.count_bits)?;
        if count > u64::from(self.max_players) {
            return Err(SerdeErr::malformed("more players than max_players"));
        }

        let mut players = BTreeMap::new();
        let mut last_id: Option<PlayerId> = None;
        for _ in 0..count {
            let id = reader.read_bits(self.id_bits)?;
            if id >= u64::from(self.max_players) {
                return Err(SerdeErr::malformed("player id out of range"));
            }
            let id = id as PlayerId;
            // the writer emits ids in ascending order; anything else is a duplicate or garbage
            if last_id.is_some_and(|last| id <= last) {
                return Err(SerdeErr::malformed("player ids not ascending"));
            }
            last_id = Some(id);

            let delta = if reader.read_bit()? {
                PlayerDelta::Removed
            } else {
                PlayerDelta::Updated(self.body.de(reader)?)
            };
            players.insert(id, delta);
        }

        Ok(DeltaWorldSnapshot { players })
    }
}
