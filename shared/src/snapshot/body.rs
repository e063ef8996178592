use snapsync_serde::{BitReader, BitWrite, Serde, SerdeErr};

use super::transform::Transform;

/// Tracked points of a player body at one tick.
///
/// This is also what a client sends upstream each tick, see `InputSnapshot`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodySnapshot {
    pub head: Transform,
    pub left_hand: Transform,
    pub right_hand: Transform,
}

/// Snapshot a client produces locally and sends to the server
pub type InputSnapshot = BodySnapshot;

/// The fields of a `BodySnapshot` that changed relative to a baseline.
/// With no baseline every field is present.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeltaBodySnapshot {
    pub head: Option<Transform>,
    pub left_hand: Option<Transform>,
    pub right_hand: Option<Transform>,
}

pub type DeltaInputSnapshot = DeltaBodySnapshot;

impl DeltaBodySnapshot {
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.left_hand.is_none() && self.right_hand.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.head.is_some() && self.left_hand.is_some() && self.right_hand.is_some()
    }
}

impl Serde for DeltaBodySnapshot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.head.ser(writer);
        self.left_hand.ser(writer);
        self.right_hand.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            head: Serde::de(reader)?,
            left_hand: Serde::de(reader)?,
            right_hand: Serde::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.head.bit_length() + self.left_hand.bit_length() + self.right_hand.bit_length()
    }
}
