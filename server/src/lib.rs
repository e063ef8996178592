//! # Snapsync Server
//! An authoritative server that accepts snapsync clients over a
//! caller-supplied transport, streams world snapshots to each of them as
//! deltas and rebuilds the input snapshots they send.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use snapsync_shared::{
        BodySnapshot, BufferInfo, DeliveryMode, DeltaBodySnapshot, DisconnectReason, FitError,
        PlayerId, ProtocolVersion, RecvError, RejectReason, SendError, ServerTransport,
        ServerTransportEvent, SnapshotHistory, SyncConfig, Tick, Transform, UserKey,
        WorldSnapshot,
    };
}

mod error;
mod events;
mod server;
mod server_config;
mod user;

pub use error::ServerError;
pub use events::ServerEvent;
pub use server::{Server, WORLD_CHANNEL};
pub use server_config::ServerConfig;
