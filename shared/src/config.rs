use thiserror::Error;

use crate::types::{ChannelIndex, PlayerId};

/// Seconds of snapshots a history keeps around
pub const HISTORY_SECONDS: f64 = 5.0;

/// Errors found while validating a `SyncConfig`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Tick step must be a positive, finite number of seconds
    #[error("Invalid tick step {tick_step}s. Tick step must be a positive, finite number of seconds")]
    InvalidTickStep { tick_step: f64 },

    /// At least one delivery channel is required
    #[error("Channel count must be at least 1")]
    NoChannels,

    /// At least one player slot is required
    #[error("Max players must be at least 1")]
    NoPlayerSlots,
}

/// Options both peers must agree on
#[derive(Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Seconds per simulation tick. Determines history capacity.
    pub tick_step: f64,
    /// Number of logically independent delivery channels
    pub channel_count: ChannelIndex,
    /// Upper bound on players in a world snapshot, bounds payload sizing
    pub max_players: PlayerId,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tick_step: 1.0 / 60.0,
            channel_count: 1,
            max_players: 16,
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_step.is_finite() && self.tick_step > 0.0) {
            return Err(ConfigError::InvalidTickStep {
                tick_step: self.tick_step,
            });
        }
        if self.channel_count == 0 {
            return Err(ConfigError::NoChannels);
        }
        if self.max_players == 0 {
            return Err(ConfigError::NoPlayerSlots);
        }
        Ok(())
    }

    /// Number of snapshots needed to cover `HISTORY_SECONDS`
    pub fn history_capacity(&self) -> usize {
        history_capacity(self.tick_step)
    }
}

/// `ceil(HISTORY_SECONDS / tick_step)`, never less than one
pub fn history_capacity(tick_step: f64) -> usize {
    let capacity = (HISTORY_SECONDS / tick_step).ceil();
    if capacity.is_finite() && capacity >= 1.0 {
        capacity as usize
    } else {
        1
    }
}
