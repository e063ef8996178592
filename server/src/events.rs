use snapsync_shared::{
    BodySnapshot, DeltaBodySnapshot, DisconnectReason, PlayerId, RejectReason, Tick, UserKey,
};

use crate::ServerError;

/// Everything the server observed, in the order it happened
#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    /// A user was accepted and given a player slot. `payload` is whatever the
    /// client attached to its connection request.
    Connect {
        user_key: UserKey,
        player_id: PlayerId,
        payload: Vec<u8>,
    },
    /// A connection request was turned down
    Reject {
        user_key: UserKey,
        reason: RejectReason,
    },
    /// An input update arrived, as sent
    InputReceived {
        user_key: UserKey,
        tick: Tick,
        delta: DeltaBodySnapshot,
    },
    /// The input snapshot rebuilt from the preceding `InputReceived`
    InputUpdated {
        user_key: UserKey,
        tick: Tick,
        snapshot: BodySnapshot,
    },
    /// `user_key` is `None` for failures not tied to one user
    Error {
        user_key: Option<UserKey>,
        error: ServerError,
    },
    Disconnect {
        user_key: UserKey,
        player_id: PlayerId,
        reason: DisconnectReason,
    },
}
