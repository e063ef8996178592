use log::trace;

use crate::{serialization::tickstamped::BufferInfo, types::Tick};

/// Running estimate of `remote tick - local tick`, refined on every
/// authoritative message.
///
/// Until the first message arrives there is no estimate, and so no offset
/// tick to stamp outgoing messages with.
#[derive(Clone, Debug, Default)]
pub struct TickSynchronizer {
    offset: Option<i64>,
}

impl TickSynchronizer {
    pub fn new() -> Self {
        Self { offset: None }
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// `local_tick + offset`, wrapped into the tick range
    pub fn offset_tick(&self, local_tick: Tick) -> Option<Tick> {
        self.offset
            .map(|offset| (i64::from(local_tick) + offset) as Tick)
    }

    /// Folds one received message into the estimate.
    ///
    /// With a `BufferInfo`, the sample `queued - received` is taken outright
    /// the first time, and approached by a damped step afterwards. Without
    /// one, the offset is reset to `sent_tick - local_tick`.
    pub fn update(&mut self, sent_tick: Tick, local_tick: Tick, buffer: Option<&BufferInfo>) {
        let new_offset = match (buffer, self.offset) {
            (Some(buffer), Some(offset)) => {
                let adjustment = buffer.offset() - offset;
                // Only positive steps above one are halved. Negative steps are
                // applied in full.
                let damped = if adjustment > 1 {
                    adjustment / 2
                } else {
                    adjustment
                };
                offset + damped
            }
            (Some(buffer), None) => buffer.offset(),
            (None, _) => i64::from(sent_tick) - i64::from(local_tick),
        };

        trace!(
            "tick offset {:?} -> {} (sent tick {}, local tick {}, buffer {:?})",
            self.offset,
            new_offset,
            sent_tick,
            local_tick,
            buffer
        );

        self.offset = Some(new_offset);
    }

    pub fn reset(&mut self) {
        self.offset = None;
    }
}
