//! # Snapsync Shared
//! Common functionality shared between snapsync-server & snapsync-client
//! crates: message envelopes, snapshot kinds and their differentiators, tick
//! synchronization, snapshot history and fitting, and the transport seam.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use snapsync_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SignedInteger,
    SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};

mod config;
mod connection;
mod differentiation;
mod fitting;
mod handshake;
mod history;
mod local_time;
mod serialization;
mod snapshot;
mod time_sync;
mod transport;
mod types;
mod wrapping_tick;

pub use config::{history_capacity, ConfigError, SyncConfig, HISTORY_SECONDS};
pub use connection::{snapshot_receiver::SnapshotReceiver, snapshot_sender::SnapshotSender};
pub use differentiation::{
    body::BodyDifferentiator,
    differentiator::{DeltaError, Differentiator},
    world::WorldDifferentiator,
};
pub use fitting::{
    data_set_fitter::{DataSetFitter, FitError},
    fitter::{Fitter, InverseFitter, TickInverseFitter, TimeInverseFitter},
    snapshot_fitters::{BodyFitter, TransformFitter, WorldFitter},
};
pub use handshake::{ConnectionRequest, ConnectionRequestSerializer, ProtocolVersion};
pub use history::{HistoryError, SnapshotHistory};
pub use local_time::LocalClock;
pub use serialization::{
    serializer::{read_message, write_message, SerdeSerializer, Serializer},
    snapshot_serializers::{DeltaBodySnapshotSerializer, DeltaWorldSnapshotSerializer},
    tickstamped::{
        BufferInfo, ResponseTickstamped, ResponseTickstampedSerializer, Tickstamped,
        TickstampedSerializer,
    },
};
pub use snapshot::{
    body::{BodySnapshot, DeltaBodySnapshot, DeltaInputSnapshot, InputSnapshot},
    transform::Transform,
    world::{DeltaWorldSnapshot, PlayerDelta, WorldSnapshot},
};
pub use time_sync::TickSynchronizer;
pub use transport::{
    ClientTransport, DeliveryMode, DisconnectReason, RecvError, RejectReason, SendError,
    ServerTransport, ServerTransportEvent, TransportEvent,
};
pub use types::{ChannelIndex, PlayerId, Tick, UserKey};
pub use wrapping_tick::{sequence_greater_than, sequence_less_than, wrapping_diff};
