use snapsync_shared::{
    BufferInfo, DeltaWorldSnapshot, DisconnectReason, RejectReason, Tick, WorldSnapshot,
};

use crate::ClientError;

/// Everything `Client::receive` observed, in the order it happened
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// The server accepted the connection
    Connected,
    /// The server turned the connection down. No further events follow.
    Rejected(RejectReason),
    /// A world update arrived, as sent
    DeltaReceived {
        buffer: Option<BufferInfo>,
        sent_tick: Tick,
        delta: DeltaWorldSnapshot,
    },
    /// The world snapshot rebuilt from the preceding `DeltaReceived`
    SnapshotUpdated {
        buffer: Option<BufferInfo>,
        sent_tick: Tick,
        snapshot: WorldSnapshot,
    },
    Error(ClientError),
    /// The connection is gone. No further events follow.
    Disconnected(DisconnectReason),
}
