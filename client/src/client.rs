use log::{debug, info, warn};

use snapsync_shared::{
    write_message, BodySnapshot, ChannelIndex, ClientTransport, ConnectionRequest,
    ConnectionRequestSerializer, DeliveryMode, DisconnectReason, FitError, SnapshotHistory, Tick,
    TransportEvent, WorldFitter, WorldSnapshot,
};

use crate::{
    connection::{ServerConnection, WorldUpdate},
    ClientConfig, ClientError, ClientEvent,
};

/// Channel input snapshots are sent on
pub const INPUT_CHANNEL: ChannelIndex = 0;

/// Lifecycle of a Client. `Disconnected` is terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientState {
    Connecting,
    Connected,
    Disconnected(DisconnectReason),
}

/// Client peer: streams local input snapshots to the server and rebuilds the
/// world snapshots the server streams back.
pub struct Client {
    config: ClientConfig,
    transport: Box<dyn ClientTransport>,
    state: ClientState,
    local_tick: Tick,
    connection: Option<ServerConnection>,
    fitter: WorldFitter,
}

impl Client {
    /// Validates the config and sends the connection request, carrying the
    /// protocol version followed by `payload`
    pub fn connect(
        config: ClientConfig,
        mut transport: Box<dyn ClientTransport>,
        payload: Option<Vec<u8>>,
    ) -> Result<Self, ClientError> {
        config.sync.validate()?;

        let request = ConnectionRequest::new(config.protocol_version, payload);
        transport.connect(&write_message(&ConnectionRequestSerializer, &request))?;
        info!(
            "Client connecting with protocol version {}",
            config.protocol_version
        );

        Ok(Self {
            config,
            transport,
            state: ClientState::Connecting,
            local_tick: 0,
            connection: None,
            fitter: WorldFitter::default(),
        })
    }

    /// Processes every pending transport event. `now` is the local time in
    /// seconds, used to key the time-indexed history.
    pub fn receive(&mut self, now: f64) -> Vec<ClientEvent> {
        let mut events = Vec::new();

        while !self.is_disconnected() {
            match self.transport.receive() {
                Ok(Some(event)) => self.handle_event(event, now, &mut events),
                Ok(None) => {
                    // No more events, break loop
                    break;
                }
                Err(error) => {
                    warn!("Client Error: transport failed to receive: {}", error);
                    events.push(ClientEvent::Error(error.into()));
                    break;
                }
            }
        }

        events
    }

    /// Sends `snapshot` to the server as a delta against the last input sent.
    ///
    /// Returns `Ok(false)` without sending when not connected, when the tick
    /// offset is still unknown, or when nothing changed.
    pub fn send_input(&mut self, snapshot: &BodySnapshot) -> Result<bool, ClientError> {
        let Some(connection) = self.connection.as_mut() else {
            debug!("Not sending input: not connected");
            return Ok(false);
        };
        let Some(payload) = connection.input_message(self.local_tick, snapshot) else {
            return Ok(false);
        };

        if let Err(error) =
            self.transport
                .send(INPUT_CHANNEL, DeliveryMode::ReliableOrdered, &payload)
        {
            warn!("Client Error: cannot send input: {}", error);
            return Err(error.into());
        }

        connection.mark_input_sent(*snapshot);
        Ok(true)
    }

    /// Advances the local tick counter by one
    pub fn tick(&mut self) {
        self.local_tick = self.local_tick.wrapping_add(1);
    }

    pub fn local_tick(&self) -> Tick {
        self.local_tick
    }

    /// The local tick translated into the server's tick space
    pub fn offset_tick(&self) -> Option<Tick> {
        self.connection
            .as_ref()
            .and_then(|connection| connection.offset_tick(self.local_tick))
    }

    /// Estimated `server tick - local tick`
    pub fn server_tick_offset(&self) -> Option<i64> {
        self.connection
            .as_ref()
            .and_then(|connection| connection.tick_offset())
    }

    pub fn history(&self) -> Option<&SnapshotHistory<WorldSnapshot>> {
        self.connection.as_ref().map(|connection| connection.history())
    }

    /// The world as of server tick `tick`, fitted from the history
    pub fn fit_tick(&self, tick: Tick) -> Result<WorldSnapshot, FitError> {
        self.history()
            .ok_or(FitError::NoData)?
            .fit_tick(&self.fitter, tick)
    }

    /// The world as of local time `time`, fitted from the history
    pub fn fit_time(&self, time: f64) -> Result<WorldSnapshot, FitError> {
        self.history()
            .ok_or(FitError::NoData)?
            .fit_time(&self.fitter, time)
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Closes the connection and drops all session state
    pub fn disconnect(&mut self) {
        if self.is_disconnected() {
            return;
        }
        info!("Client disconnecting");
        self.transport.disconnect(DisconnectReason::Requested);
        self.teardown(DisconnectReason::Requested);
    }

    // Private methods

    fn is_disconnected(&self) -> bool {
        matches!(self.state, ClientState::Disconnected(_))
    }

    fn teardown(&mut self, reason: DisconnectReason) {
        self.connection = None;
        self.state = ClientState::Disconnected(reason);
    }

    fn handle_event(&mut self, event: TransportEvent, now: f64, events: &mut Vec<ClientEvent>) {
        match event {
            TransportEvent::Accepted => {
                if self.state != ClientState::Connecting {
                    warn!("Client Error: connection accepted twice");
                    return;
                }
                info!("Client connected");
                self.connection = Some(ServerConnection::new(&self.config.sync));
                self.state = ClientState::Connected;
                events.push(ClientEvent::Connected);
            }
            TransportEvent::Rejected(reason) => {
                info!("Client connection rejected: {:?}", reason);
                self.teardown(DisconnectReason::Rejected(reason.clone()));
                events.push(ClientEvent::Rejected(reason));
            }
            TransportEvent::Payload(payload) => self.receive_payload(&payload, now, events),
            TransportEvent::Disconnected(reason) => {
                info!("Client disconnected: {:?}", reason);
                self.teardown(reason.clone());
                events.push(ClientEvent::Disconnected(reason));
            }
        }
    }

    fn receive_payload(&mut self, payload: &[u8], now: f64, events: &mut Vec<ClientEvent>) {
        let Some(connection) = self.connection.as_mut() else {
            debug!("Client dropping payload received before connecting");
            return;
        };

        match connection.receive_world(payload, self.local_tick, now) {
            Ok(WorldUpdate {
                sent_tick,
                buffer,
                delta,
                snapshot,
                history_error,
            }) => {
                events.push(ClientEvent::DeltaReceived {
                    buffer,
                    sent_tick,
                    delta,
                });
                events.push(ClientEvent::SnapshotUpdated {
                    buffer,
                    sent_tick,
                    snapshot,
                });
                if let Some(error) = history_error {
                    warn!("Client Error: {}", error);
                    events.push(ClientEvent::Error(error.into()));
                }
            }
            Err(error) => {
                info!("Client received a malformed message from the server, disconnecting");
                debug!("Malformed message: {}", error);

                let reason = DisconnectReason::ProtocolViolation;
                self.transport.disconnect(reason.clone());
                self.teardown(reason.clone());
                events.push(ClientEvent::Error(error));
                events.push(ClientEvent::Disconnected(reason));
            }
        }
    }
}
