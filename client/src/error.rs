use thiserror::Error;

use snapsync_shared::{ConfigError, DeltaError, HistoryError, RecvError, SendError, SerdeErr};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The server sent bytes that don't decode as a world update
    #[error("Malformed message from server: {0}")]
    MalformedMessage(#[from] SerdeErr),

    /// The update decoded, but could not be applied to the current world
    #[error("Invalid delta from server: {0}")]
    InvalidDelta(#[from] DeltaError),

    /// The update was applied, but could not be filed in the history
    #[error("Snapshot history rejected an update: {0}")]
    History(#[from] HistoryError),

    #[error("Transport failed to send: {0}")]
    Send(#[from] SendError),

    #[error("Transport failed to receive: {0}")]
    Receive(#[from] RecvError),

    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),
}
