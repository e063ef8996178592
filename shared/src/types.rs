use std::fmt;

/// A discrete simulation step, counted by each host at a fixed rate
pub type Tick = u32;
/// Index of a logically independent delivery channel on the transport
pub type ChannelIndex = u8;
/// Slot a connected player occupies in the world, always `< max_players`
pub type PlayerId = u8;

/// Identifies one remote connection on the server side of a transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserKey(pub u64);

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}
