use std::{collections::BTreeMap, mem};

use log::{debug, info, warn};

use snapsync_shared::{
    read_message, write_message, BodyFitter, BodySnapshot, ChannelIndex,
    ConnectionRequestSerializer, DeliveryMode, DeltaBodySnapshot, DeltaBodySnapshotSerializer,
    DeltaWorldSnapshot, DeltaWorldSnapshotSerializer, DisconnectReason, PlayerId, RejectReason,
    ResponseTickstamped, ResponseTickstampedSerializer, Serializer, ServerTransport,
    ServerTransportEvent, Tick, Tickstamped, TickstampedSerializer, UserKey, WorldSnapshot,
};

use crate::{user::User, ServerConfig, ServerError, ServerEvent};

/// Channel world snapshots are sent on
pub const WORLD_CHANNEL: ChannelIndex = 0;

/// Authoritative peer. Hosts one session per connected client, streams the
/// world to each and rebuilds each client's input.
pub struct Server {
    config: ServerConfig,
    transport: Box<dyn ServerTransport>,
    server_tick: Tick,
    users: BTreeMap<UserKey, User>,
    input_serializer: Box<dyn Serializer<Tickstamped<DeltaBodySnapshot>>>,
    world_serializer: Box<dyn Serializer<ResponseTickstamped<DeltaWorldSnapshot>>>,
    fitter: BodyFitter,
    /// Raised outside of `receive`, handed out by the next call to it
    pending_events: Vec<ServerEvent>,
}

impl Server {
    pub fn new(
        config: ServerConfig,
        transport: Box<dyn ServerTransport>,
    ) -> Result<Self, ServerError> {
        config.sync.validate()?;

        let max_players = config.sync.max_players;
        info!(
            "Server listening with protocol version {}, {} player slots",
            config.protocol_version, max_players
        );

        Ok(Self {
            config,
            transport,
            server_tick: 0,
            users: BTreeMap::new(),
            input_serializer: Box::new(TickstampedSerializer::new(
                DeltaBodySnapshotSerializer::new(),
            )),
            world_serializer: Box::new(ResponseTickstampedSerializer::new(
                DeltaWorldSnapshotSerializer::new(max_players),
            )),
            fitter: BodyFitter::default(),
            pending_events: Vec::new(),
        })
    }

    /// Processes every pending transport event. `now` is the local time in
    /// seconds, used to key the time-indexed input histories.
    pub fn receive(&mut self, now: f64) -> Vec<ServerEvent> {
        let mut events = mem::take(&mut self.pending_events);

        loop {
            match self.transport.receive() {
                Ok(Some(ServerTransportEvent::ConnectionRequest { user_key, request })) => {
                    self.handle_request(user_key, &request, &mut events);
                }
                Ok(Some(ServerTransportEvent::Payload { user_key, payload })) => {
                    self.handle_payload(user_key, &payload, now, &mut events);
                }
                Ok(Some(ServerTransportEvent::Disconnected { user_key, reason })) => {
                    if let Some(user) = self.users.remove(&user_key) {
                        info!("Server: {} disconnected: {:?}", user_key, reason);
                        events.push(ServerEvent::Disconnect {
                            user_key,
                            player_id: user.player_id(),
                            reason,
                        });
                    }
                }
                Ok(None) => {
                    // No more events, break loop
                    break;
                }
                Err(error) => {
                    warn!("Server Error: transport failed to receive: {}", error);
                    events.push(ServerEvent::Error {
                        user_key: None,
                        error: error.into(),
                    });
                    break;
                }
            }
        }

        events
    }

    /// Sends `world` to every user as a delta against what that user was last
    /// sent. Users that already have this world are skipped. Returns the
    /// number of messages sent.
    ///
    /// A world holding a player id at or above `max_players` is refused and
    /// nothing is sent.
    pub fn send_world(&mut self, world: &WorldSnapshot) -> Result<usize, ServerError> {
        let max_players = self.config.sync.max_players;
        if let Some(player_id) = world.players.keys().find(|id| **id >= max_players) {
            warn!(
                "Server Error: not sending world with player {}, max_players is {}",
                player_id, max_players
            );
            return Err(ServerError::InvalidWorld {
                player_id: *player_id,
                max_players,
            });
        }

        let mut sent = 0;

        for (user_key, user) in self.users.iter_mut() {
            let Some(content) = user.world_delta(world) else {
                continue;
            };
            let message = ResponseTickstamped {
                tick: self.server_tick,
                buffer: None,
                content,
            };
            let payload = write_message(self.world_serializer.as_ref(), &message);

            match self
                .transport
                .send(user_key, WORLD_CHANNEL, DeliveryMode::ReliableOrdered, &payload)
            {
                Ok(()) => {
                    user.mark_world_sent(world.clone());
                    sent += 1;
                }
                Err(error) => {
                    warn!("Server Error: cannot send world to {}: {}", user_key, error);
                    self.pending_events.push(ServerEvent::Error {
                        user_key: Some(*user_key),
                        error: error.into(),
                    });
                }
            }
        }

        Ok(sent)
    }

    /// Advances the server tick by one
    pub fn tick(&mut self) {
        self.server_tick = self.server_tick.wrapping_add(1);
    }

    pub fn server_tick(&self) -> Tick {
        self.server_tick
    }

    pub fn user_keys(&self) -> Vec<UserKey> {
        self.users.keys().copied().collect()
    }

    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    pub fn player_id(&self, user_key: &UserKey) -> Option<PlayerId> {
        self.users.get(user_key).map(User::player_id)
    }

    /// The most recent input rebuilt for this user
    pub fn user_input(&self, user_key: &UserKey) -> Option<&BodySnapshot> {
        self.users.get(user_key).and_then(User::latest_input)
    }

    /// Tick stamped on the most recent input from this user
    pub fn last_input_tick(&self, user_key: &UserKey) -> Option<Tick> {
        self.users.get(user_key).and_then(User::last_received_tick)
    }

    /// The user's input as of server tick `tick`, fitted from their history
    pub fn fit_user_input(
        &self,
        user_key: &UserKey,
        tick: Tick,
    ) -> Result<BodySnapshot, ServerError> {
        let user = self
            .users
            .get(user_key)
            .ok_or(ServerError::UnknownUser { user_key: *user_key })?;
        Ok(user.input_history().fit_tick(&self.fitter, tick)?)
    }

    /// Closes the user's connection and drops their session. The matching
    /// `Disconnect` event comes out of the next `receive`.
    pub fn disconnect_user(&mut self, user_key: &UserKey) {
        let reason = DisconnectReason::Requested;
        if let Some(event) = self.drop_user(user_key, reason) {
            self.pending_events.push(event);
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    // Private methods

    fn drop_user(&mut self, user_key: &UserKey, reason: DisconnectReason) -> Option<ServerEvent> {
        let user = self.users.remove(user_key)?;
        info!("Server: disconnecting {}: {:?}", user_key, reason);
        self.transport.disconnect(user_key, reason.clone());
        Some(ServerEvent::Disconnect {
            user_key: *user_key,
            player_id: user.player_id(),
            reason,
        })
    }

    fn lowest_free_player_id(&self) -> Option<PlayerId> {
        (0..self.config.sync.max_players)
            .find(|id| !self.users.values().any(|user| user.player_id() == *id))
    }

    fn handle_request(
        &mut self,
        user_key: UserKey,
        request: &[u8],
        events: &mut Vec<ServerEvent>,
    ) {
        if self.users.contains_key(&user_key) {
            warn!("Server Error: {} is already connected", user_key);
            return;
        }

        let request = match read_message(&ConnectionRequestSerializer, request) {
            Ok(request) => request,
            Err(error) => {
                debug!("Malformed connection request from {}: {}", user_key, error);
                self.reject(user_key, RejectReason::Malformed, events);
                return;
            }
        };

        if !request.version.is_compatible_with(&self.config.protocol_version) {
            info!(
                "Server: {} uses protocol version {}, expected {}",
                user_key, request.version, self.config.protocol_version
            );
            self.reject(user_key, RejectReason::VersionMismatch, events);
            return;
        }

        let Some(player_id) = self.lowest_free_player_id() else {
            self.reject(user_key, RejectReason::ServerFull, events);
            return;
        };

        if let Err(error) = self.transport.accept(&user_key) {
            warn!("Server Error: cannot accept {}: {}", user_key, error);
            events.push(ServerEvent::Error {
                user_key: Some(user_key),
                error: error.into(),
            });
            return;
        }

        info!("Server: {} connected as player {}", user_key, player_id);
        self.users
            .insert(user_key, User::new(player_id, &self.config.sync));
        events.push(ServerEvent::Connect {
            user_key,
            player_id,
            payload: request.payload,
        });
    }

    fn reject(&mut self, user_key: UserKey, reason: RejectReason, events: &mut Vec<ServerEvent>) {
        info!("Server: rejecting {}: {:?}", user_key, reason);
        if let Err(error) = self.transport.reject(&user_key, reason.clone()) {
            warn!("Server Error: cannot reject {}: {}", user_key, error);
        }
        events.push(ServerEvent::Reject { user_key, reason });
    }

    fn handle_payload(
        &mut self,
        user_key: UserKey,
        payload: &[u8],
        now: f64,
        events: &mut Vec<ServerEvent>,
    ) {
        let Some(user) = self.users.get_mut(&user_key) else {
            debug!("Server dropping payload from unknown {}", user_key);
            return;
        };

        let result = read_message(self.input_serializer.as_ref(), payload)
            .map_err(ServerError::from)
            .and_then(|Tickstamped { tick, content }| {
                user.receive_input(tick, now, content)
                    .map(|(snapshot, history_error)| (tick, content, snapshot, history_error))
                    .map_err(ServerError::from)
            });

        match result {
            Ok((tick, delta, snapshot, history_error)) => {
                events.push(ServerEvent::InputReceived {
                    user_key,
                    tick,
                    delta,
                });
                events.push(ServerEvent::InputUpdated {
                    user_key,
                    tick,
                    snapshot,
                });
                if let Some(error) = history_error {
                    warn!("Server Error: {}: {}", user_key, error);
                    events.push(ServerEvent::Error {
                        user_key: Some(user_key),
                        error: error.into(),
                    });
                }
            }
            Err(error) => {
                info!("Server received a malformed message from {}, disconnecting", user_key);
                debug!("Malformed message: {}", error);

                events.push(ServerEvent::Error {
                    user_key: Some(user_key),
                    error,
                });
                let reason = DisconnectReason::ProtocolViolation;
                if let Some(event) = self.drop_user(&user_key, reason) {
                    events.push(event);
                }
            }
        }
    }
}
