use std::default::Default;

use snapsync_shared::{ProtocolVersion, SyncConfig};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Tick rate, channel count and player limit. `max_players` also caps the
    /// number of connected users.
    pub sync: SyncConfig,
    /// Clients must match its major and minor version to connect
    pub protocol_version: ProtocolVersion,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            protocol_version: ProtocolVersion::CURRENT,
        }
    }
}
