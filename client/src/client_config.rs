use std::default::Default;

use snapsync_shared::{ProtocolVersion, SyncConfig};

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Tick rate, channel count and player limit, which must match the server
    pub sync: SyncConfig,
    /// Sent in the connection request. The server rejects a different major
    /// or minor version.
    pub protocol_version: ProtocolVersion,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            protocol_version: ProtocolVersion::CURRENT,
        }
    }
}
