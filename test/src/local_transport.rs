/// In-memory transport for E2E testing
/// Routes handshakes and payloads between one server and any number of
/// clients without network I/O. Every channel is reliable and ordered.
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use snapsync_shared::{
    ChannelIndex, ClientTransport, DeliveryMode, DisconnectReason, RecvError, RejectReason,
    SendError, ServerTransport, ServerTransportEvent, TransportEvent, UserKey,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LinkState {
    Idle,
    Requested,
    Open,
    Closed,
}

struct ClientLink {
    state: LinkState,
    events: VecDeque<TransportEvent>,
}

/// A payload as it crossed the hub
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPayload {
    pub user_key: UserKey,
    pub channel: ChannelIndex,
    pub mode: DeliveryMode,
    pub payload: Vec<u8>,
}

struct HubState {
    channel_count: ChannelIndex,
    next_user_key: u64,
    clients: HashMap<UserKey, ClientLink>,
    server_events: VecDeque<ServerTransportEvent>,
    to_server: Vec<SentPayload>,
    to_clients: Vec<SentPayload>,
}

/// Shared switchboard connecting a `LocalServerTransport` with any number of
/// `LocalClientTransport`s
#[derive(Clone)]
pub struct LocalTransportHub {
    state: Arc<Mutex<HubState>>,
}

impl LocalTransportHub {
    pub fn new(channel_count: ChannelIndex) -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState {
                channel_count,
                next_user_key: 0,
                clients: HashMap::new(),
                server_events: VecDeque::new(),
                to_server: Vec::new(),
                to_clients: Vec::new(),
            })),
        }
    }

    pub fn server_transport(&self) -> LocalServerTransport {
        LocalServerTransport { hub: self.clone() }
    }

    /// A new client endpoint, with its own user key
    pub fn client_transport(&self) -> LocalClientTransport {
        let mut state = self.lock();
        let user_key = UserKey(state.next_user_key);
        state.next_user_key += 1;
        state.clients.insert(
            user_key,
            ClientLink {
                state: LinkState::Idle,
                events: VecDeque::new(),
            },
        );
        LocalClientTransport {
            hub: self.clone(),
            user_key,
        }
    }

    /// Every payload clients have sent so far
    pub fn sent_to_server(&self) -> Vec<SentPayload> {
        self.lock().to_server.clone()
    }

    /// Every payload the server has sent so far
    pub fn sent_to_clients(&self) -> Vec<SentPayload> {
        self.lock().to_clients.clone()
    }

    /// Delivers raw bytes to the server as if `user_key` had sent them
    pub fn inject_to_server(&self, user_key: UserKey, payload: Vec<u8>) {
        self.lock()
            .server_events
            .push_back(ServerTransportEvent::Payload { user_key, payload });
    }

    /// Delivers raw bytes to a client as if the server had sent them
    pub fn inject_to_client(&self, user_key: UserKey, payload: Vec<u8>) {
        if let Some(link) = self.lock().clients.get_mut(&user_key) {
            link.events.push_back(TransportEvent::Payload(payload));
        }
    }

    /// Drops the connection as if the network went quiet
    pub fn time_out(&self, user_key: UserKey) {
        let mut state = self.lock();
        if let Some(link) = state.clients.get_mut(&user_key) {
            link.state = LinkState::Closed;
            link.events
                .push_back(TransportEvent::Disconnected(DisconnectReason::TimedOut));
        }
        state.server_events.push_back(ServerTransportEvent::Disconnected {
            user_key,
            reason: DisconnectReason::TimedOut,
        });
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Client Transport

pub struct LocalClientTransport {
    hub: LocalTransportHub,
    user_key: UserKey,
}

impl LocalClientTransport {
    pub fn user_key(&self) -> UserKey {
        self.user_key
    }
}

impl ClientTransport for LocalClientTransport {
    fn connect(&mut self, request: &[u8]) -> Result<(), SendError> {
        let mut state = self.hub.lock();
        let link = state
            .clients
            .get_mut(&self.user_key)
            .ok_or(SendError::NotConnected)?;
        if link.state != LinkState::Idle {
            return Err(SendError::Failed {
                reason: "connect called twice".to_string(),
            });
        }
        link.state = LinkState::Requested;
        state
            .server_events
            .push_back(ServerTransportEvent::ConnectionRequest {
                user_key: self.user_key,
                request: request.to_vec(),
            });
        Ok(())
    }

    fn send(
        &mut self,
        channel: ChannelIndex,
        mode: DeliveryMode,
        payload: &[u8],
    ) -> Result<(), SendError> {
        let mut state = self.hub.lock();
        if channel >= state.channel_count {
            return Err(SendError::InvalidChannel { channel });
        }
        let open = state
            .clients
            .get(&self.user_key)
            .map_or(false, |link| link.state == LinkState::Open);
        if !open {
            return Err(SendError::NotConnected);
        }

        state.to_server.push(SentPayload {
            user_key: self.user_key,
            channel,
            mode,
            payload: payload.to_vec(),
        });
        state.server_events.push_back(ServerTransportEvent::Payload {
            user_key: self.user_key,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<TransportEvent>, RecvError> {
        Ok(self
            .hub
            .lock()
            .clients
            .get_mut(&self.user_key)
            .and_then(|link| link.events.pop_front()))
    }

    fn disconnect(&mut self, _reason: DisconnectReason) {
        let mut state = self.hub.lock();
        let Some(link) = state.clients.get_mut(&self.user_key) else {
            return;
        };
        let was_open = link.state == LinkState::Open;
        link.state = LinkState::Closed;
        link.events.clear();
        if was_open {
            state.server_events.push_back(ServerTransportEvent::Disconnected {
                user_key: self.user_key,
                reason: DisconnectReason::Remote,
            });
        }
    }
}

// Server Transport

pub struct LocalServerTransport {
    hub: LocalTransportHub,
}

impl ServerTransport for LocalServerTransport {
    fn accept(&mut self, user_key: &UserKey) -> Result<(), SendError> {
        let mut state = self.hub.lock();
        match state.clients.get_mut(user_key) {
            Some(link) if link.state == LinkState::Requested => {
                link.state = LinkState::Open;
                link.events.push_back(TransportEvent::Accepted);
                Ok(())
            }
            _ => Err(SendError::UnknownUser {
                user_key: *user_key,
            }),
        }
    }

    fn reject(&mut self, user_key: &UserKey, reason: RejectReason) -> Result<(), SendError> {
        let mut state = self.hub.lock();
        match state.clients.get_mut(user_key) {
            Some(link) if link.state == LinkState::Requested => {
                link.state = LinkState::Closed;
                link.events.push_back(TransportEvent::Rejected(reason));
                Ok(())
            }
            _ => Err(SendError::UnknownUser {
                user_key: *user_key,
            }),
        }
    }

    fn send(
        &mut self,
        user_key: &UserKey,
        channel: ChannelIndex,
        mode: DeliveryMode,
        payload: &[u8],
    ) -> Result<(), SendError> {
        let mut state = self.hub.lock();
        if channel >= state.channel_count {
            return Err(SendError::InvalidChannel { channel });
        }
        match state.clients.get_mut(user_key) {
            Some(link) if link.state == LinkState::Open => {
                link.events
                    .push_back(TransportEvent::Payload(payload.to_vec()));
            }
            _ => {
                return Err(SendError::UnknownUser {
                    user_key: *user_key,
                })
            }
        }
        state.to_clients.push(SentPayload {
            user_key: *user_key,
            channel,
            mode,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<ServerTransportEvent>, RecvError> {
        Ok(self.hub.lock().server_events.pop_front())
    }

    fn disconnect(&mut self, user_key: &UserKey, _reason: DisconnectReason) {
        if let Some(link) = self.hub.lock().clients.get_mut(user_key) {
            if link.state == LinkState::Open {
                link.events
                    .push_back(TransportEvent::Disconnected(DisconnectReason::Remote));
            }
            link.state = LinkState::Closed;
        }
    }
}
