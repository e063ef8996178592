use thiserror::Error;

use crate::types::{ChannelIndex, UserKey};

/// Errors reported by a transport when handing it a payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// There is no open connection to send on
    #[error("Cannot send, the connection is not open")]
    NotConnected,

    /// The channel index is outside the configured channel count
    #[error("Channel {channel} does not exist on this transport")]
    InvalidChannel { channel: ChannelIndex },

    /// The server has no connection for this user
    #[error("No connection exists for {user_key}")]
    UnknownUser { user_key: UserKey },

    /// Any other transport-specific failure
    #[error("Transport failed to send: {reason}")]
    Failed { reason: String },
}

/// Errors reported by a transport while polling for events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecvError {
    #[error("Transport failed to receive: {reason}")]
    Failed { reason: String },
}
