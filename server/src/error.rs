use thiserror::Error;

use snapsync_shared::{
    ConfigError, DeltaError, FitError, HistoryError, PlayerId, RecvError, SendError, SerdeErr, UserKey,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServerError {
    /// A client sent bytes that don't decode as an input update
    #[error("Malformed message from client: {0}")]
    MalformedMessage(#[from] SerdeErr),

    /// The update decoded, but could not be applied to the client's input
    #[error("Invalid delta from client: {0}")]
    InvalidDelta(#[from] DeltaError),

    /// The update was applied, but could not be filed in the input history
    #[error("Input history rejected an update: {0}")]
    History(#[from] HistoryError),

    #[error("Transport failed to send: {0}")]
    Send(#[from] SendError),

    #[error("Transport failed to receive: {0}")]
    Receive(#[from] RecvError),

    #[error("Invalid server configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot fit input: {0}")]
    Fit(#[from] FitError),

    /// No connected user has this key
    #[error("No connected user for {user_key}")]
    UnknownUser { user_key: UserKey },

    /// The world holds a player id the wire format has no room for
    #[error("World contains player {player_id}, but ids must be below max_players ({max_players})")]
    InvalidWorld {
        player_id: PlayerId,
        max_players: PlayerId,
    },
}
