//! # Snapsync Client
//! A client that connects to a snapsync server over a caller-supplied
//! transport, streams its input snapshots as deltas and rebuilds the world
//! snapshots the server streams back.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use snapsync_shared::{
        BodySnapshot, BufferInfo, ClientTransport, DeliveryMode, DeltaWorldSnapshot,
        DisconnectReason, FitError, HistoryError, InputSnapshot, ProtocolVersion, RecvError,
        RejectReason, SendError, SnapshotHistory, SyncConfig, Tick, Transform, TransportEvent,
        WorldSnapshot,
    };
}

mod client;
mod client_config;
mod connection;
mod error;
mod events;

pub use client::{Client, ClientState, INPUT_CHANNEL};
pub use client_config::ClientConfig;
pub use error::ClientError;
pub use events::ClientEvent;
