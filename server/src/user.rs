use snapsync_shared::{
    BodyDifferentiator, BodySnapshot, DeltaBodySnapshot, DeltaError,
    DeltaWorldSnapshot, HistoryError, PlayerId, SnapshotHistory, SnapshotReceiver,
    SnapshotSender, SyncConfig, Tick, WorldDifferentiator, WorldSnapshot,
};

/// Session state the server keeps for one connected client
pub struct User {
    player_id: PlayerId,
    input_receiver: SnapshotReceiver<BodySnapshot, DeltaBodySnapshot>,
    world_sender: SnapshotSender<WorldSnapshot, DeltaWorldSnapshot>,
    last_received_tick: Option<Tick>,
}

impl User {
    pub fn new(player_id: PlayerId, config: &SyncConfig) -> Self {
        Self {
            player_id,
            input_receiver: SnapshotReceiver::new(
                Box::new(BodyDifferentiator),
                SnapshotHistory::new(config.tick_step),
            ),
            world_sender: SnapshotSender::new(Box::new(WorldDifferentiator::new())),
            last_received_tick: None,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Rebuilds the input sent at `tick`. A failed rebuild leaves the user
    /// untouched. A history rejection does not undo the rebuild.
    pub fn receive_input(
        &mut self,
        tick: Tick,
        now: f64,
        delta: DeltaBodySnapshot,
    ) -> Result<(BodySnapshot, Option<HistoryError>), DeltaError> {
        let snapshot = self.input_receiver.apply(delta)?;
        self.last_received_tick = Some(tick);
        let history_error = self.input_receiver.record(tick, now, snapshot).err();
        Ok((snapshot, history_error))
    }

    pub fn last_received_tick(&self) -> Option<Tick> {
        self.last_received_tick
    }

    pub fn world_delta(&self, world: &WorldSnapshot) -> Option<DeltaWorldSnapshot> {
        self.world_sender.delta(world)
    }

    pub fn mark_world_sent(&mut self, world: WorldSnapshot) {
        self.world_sender.mark_sent(world);
    }

    pub fn latest_input(&self) -> Option<&BodySnapshot> {
        self.input_receiver.latest()
    }

    pub fn input_history(&self) -> &SnapshotHistory<BodySnapshot> {
        self.input_receiver.history()
    }
}
