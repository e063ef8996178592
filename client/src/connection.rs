use log::debug;

use snapsync_shared::{
    read_message, write_message, BodyDifferentiator, BodySnapshot, BufferInfo,
    DeltaBodySnapshot, DeltaBodySnapshotSerializer, DeltaWorldSnapshot,
    DeltaWorldSnapshotSerializer, HistoryError, ResponseTickstamped,
    ResponseTickstampedSerializer, Serializer, SnapshotHistory, SnapshotReceiver, SnapshotSender,
    SyncConfig, Tick, TickSynchronizer, Tickstamped, TickstampedSerializer, WorldDifferentiator,
    WorldSnapshot,
};

use crate::ClientError;

/// One world update from the server, decoded and applied
pub struct WorldUpdate {
    pub sent_tick: Tick,
    pub buffer: Option<BufferInfo>,
    pub delta: DeltaWorldSnapshot,
    pub snapshot: WorldSnapshot,
    /// Set when the snapshot could not be filed in the history
    pub history_error: Option<HistoryError>,
}

/// Session state of an accepted connection to the server
pub struct ServerConnection {
    time_sync: TickSynchronizer,
    world_receiver: SnapshotReceiver<WorldSnapshot, DeltaWorldSnapshot>,
    input_sender: SnapshotSender<BodySnapshot, DeltaBodySnapshot>,
    world_serializer: Box<dyn Serializer<ResponseTickstamped<DeltaWorldSnapshot>>>,
    input_serializer: Box<dyn Serializer<Tickstamped<DeltaBodySnapshot>>>,
}

impl ServerConnection {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            time_sync: TickSynchronizer::new(),
            world_receiver: SnapshotReceiver::new(
                Box::new(WorldDifferentiator::new()),
                SnapshotHistory::new(config.tick_step),
            ),
            input_sender: SnapshotSender::new(Box::new(BodyDifferentiator)),
            world_serializer: Box::new(ResponseTickstampedSerializer::new(
                DeltaWorldSnapshotSerializer::new(config.max_players),
            )),
            input_serializer: Box::new(TickstampedSerializer::new(
                DeltaBodySnapshotSerializer::new(),
            )),
        }
    }

    /// Decodes a world update and applies it. Any error means the server can
    /// no longer be trusted to stay in step with us.
    pub fn receive_world(
        &mut self,
        payload: &[u8],
        local_tick: Tick,
        now: f64,
    ) -> Result<WorldUpdate, ClientError> {
        let ResponseTickstamped {
            tick: sent_tick,
            buffer,
            content: delta,
        } = read_message(self.world_serializer.as_ref(), payload)?;

        let snapshot = self.world_receiver.apply(delta.clone())?;
        let history_error = self
            .world_receiver
            .record(sent_tick, now, snapshot.clone())
            .err();

        self.time_sync.update(sent_tick, local_tick, buffer.as_ref());

        Ok(WorldUpdate {
            sent_tick,
            buffer,
            delta,
            snapshot,
            history_error,
        })
    }

    /// The encoded input message for `snapshot`, if there is anything to send
    /// and a tick to stamp it with
    pub fn input_message(&self, local_tick: Tick, snapshot: &BodySnapshot) -> Option<Vec<u8>> {
        let Some(tick) = self.time_sync.offset_tick(local_tick) else {
            debug!("Not sending input: no tick offset yet");
            return None;
        };
        let content = self.input_sender.delta(snapshot)?;

        Some(write_message(
            self.input_serializer.as_ref(),
            &Tickstamped { tick, content },
        ))
    }

    pub fn mark_input_sent(&mut self, snapshot: BodySnapshot) {
        self.input_sender.mark_sent(snapshot);
    }

    pub fn offset_tick(&self, local_tick: Tick) -> Option<Tick> {
        self.time_sync.offset_tick(local_tick)
    }

    pub fn tick_offset(&self) -> Option<i64> {
        self.time_sync.offset()
    }

    pub fn history(&self) -> &SnapshotHistory<WorldSnapshot> {
        self.world_receiver.history()
    }
}
