//! The packet transport is supplied by the caller. These traits are the whole
//! of what the peers need from it: a handshake, channelled payload delivery,
//! and notification of connection changes.

mod error;

pub use error::{RecvError, SendError};

use crate::types::{ChannelIndex, UserKey};

/// Delivery guarantee requested for a payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    Unreliable,
    /// Unreliable, but stale payloads are dropped
    Sequenced,
    ReliableUnordered,
    ReliableOrdered,
}

/// Why a connection attempt was turned down
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The connection request could not be decoded
    Malformed,
    /// Major or minor protocol version differs
    VersionMismatch,
    /// Every player slot is taken
    ServerFull,
}

/// Why an established connection ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Closed deliberately by the local side
    Requested,
    /// Closed by the remote side
    Remote,
    /// The remote side sent something that could not be decoded
    ProtocolViolation,
    /// The transport stopped hearing from the remote side
    TimedOut,
    /// The connection was never established
    Rejected(RejectReason),
}

/// Something that happened on a client's connection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Accepted,
    Rejected(RejectReason),
    Payload(Vec<u8>),
    Disconnected(DisconnectReason),
}

/// Something that happened on one of a server's connections
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerTransportEvent {
    /// A remote host asks to connect. `request` is the raw handshake payload.
    ConnectionRequest { user_key: UserKey, request: Vec<u8> },
    Payload { user_key: UserKey, payload: Vec<u8> },
    Disconnected { user_key: UserKey, reason: DisconnectReason },
}

pub trait ClientTransport: Send {
    /// Starts connecting, carrying `request` to the server as the handshake
    fn connect(&mut self, request: &[u8]) -> Result<(), SendError>;

    fn send(
        &mut self,
        channel: ChannelIndex,
        mode: DeliveryMode,
        payload: &[u8],
    ) -> Result<(), SendError>;

    /// Next pending event, if any. Never blocks.
    fn receive(&mut self) -> Result<Option<TransportEvent>, RecvError>;

    fn disconnect(&mut self, reason: DisconnectReason);
}

pub trait ServerTransport: Send {
    fn accept(&mut self, user_key: &UserKey) -> Result<(), SendError>;

    fn reject(&mut self, user_key: &UserKey, reason: RejectReason) -> Result<(), SendError>;

    fn send(
        &mut self,
        user_key: &UserKey,
        channel: ChannelIndex,
        mode: DeliveryMode,
        payload: &[u8],
    ) -> Result<(), SendError>;

    /// Next pending event, if any. Never blocks.
    fn receive(&mut self) -> Result<Option<ServerTransportEvent>, RecvError>;

    fn disconnect(&mut self, user_key: &UserKey, reason: DisconnectReason);
}
