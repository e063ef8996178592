/// E2E tests for protocol violations and connection loss
/// A malformed message ends the session on the side that received it

use snapsync_client::{ClientConfig, ClientError, ClientEvent, ClientState};
use snapsync_server::{ServerConfig, ServerError, ServerEvent};
use snapsync_shared::{
    write_message, DeltaBodySnapshot, DeltaBodySnapshotSerializer, DeltaError, DisconnectReason,
    SerdeErr, Tickstamped, TickstampedSerializer, Transform,
};
use snapsync_test::{body_at, connect_client, new_server, world_of};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn malformed_world_update_disconnects_client() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let mut connected = connect_client(&mut server, &hub, ClientConfig::default(), None);

    server.send_world(&world_of(&[(connected.player_id, 0.0)])).unwrap();
    connected.client.receive(0.1);
    assert!(connected.client.history().is_some());

    hub.inject_to_client(connected.user_key, vec![1, 2, 3]);
    let events = connected.client.receive(0.2);

    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        ClientEvent::Error(ClientError::MalformedMessage(SerdeErr::Underflow { .. }))
    ));
    assert_eq!(
        events[1],
        ClientEvent::Disconnected(DisconnectReason::ProtocolViolation)
    );
    assert_eq!(
        connected.client.state(),
        &ClientState::Disconnected(DisconnectReason::ProtocolViolation)
    );

    // session state is gone and the client stays quiet
    assert!(connected.client.history().is_none());
    assert_eq!(connected.client.offset_tick(), None);
    assert_eq!(connected.client.send_input(&body_at(0.0)), Ok(false));
    assert!(connected.client.receive(0.3).is_empty());

    // the server hears about it through the transport
    assert_eq!(
        server.receive(0.3),
        vec![ServerEvent::Disconnect {
            user_key: connected.user_key,
            player_id: connected.player_id,
            reason: DisconnectReason::Remote,
        }]
    );
}

#[test]
fn malformed_input_disconnects_user() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let mut connected = connect_client(&mut server, &hub, ClientConfig::default(), None);

    hub.inject_to_server(connected.user_key, vec![0xAB]);
    let events = server.receive(0.1);

    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ServerEvent::Error {
            user_key: Some(_),
            error: ServerError::MalformedMessage(_),
        }
    ));
    assert_eq!(
        events[1],
        ServerEvent::Disconnect {
            user_key: connected.user_key,
            player_id: connected.player_id,
            reason: DisconnectReason::ProtocolViolation,
        }
    );
    assert!(server.user_keys().is_empty());

    assert_eq!(
        connected.client.receive(0.1),
        vec![ClientEvent::Disconnected(DisconnectReason::Remote)]
    );
}

#[test]
fn partial_first_input_is_a_protocol_violation() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let connected = connect_client(&mut server, &hub, ClientConfig::default(), None);

    let partial = Tickstamped {
        tick: 7,
        content: DeltaBodySnapshot {
            head: Some(Transform::IDENTITY),
            left_hand: None,
            right_hand: None,
        },
    };
    let serializer = TickstampedSerializer::new(DeltaBodySnapshotSerializer::new());
    hub.inject_to_server(connected.user_key, write_message(&serializer, &partial));

    let events = server.receive(0.1);
    assert_eq!(
        events[0],
        ServerEvent::Error {
            user_key: Some(connected.user_key),
            error: ServerError::InvalidDelta(DeltaError::MissingBaseline { field: "left_hand" }),
        }
    );
    assert!(matches!(
        events[1],
        ServerEvent::Disconnect {
            reason: DisconnectReason::ProtocolViolation,
            ..
        }
    ));
}

#[test]
fn timeout_reaches_both_sides() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let mut connected = connect_client(&mut server, &hub, ClientConfig::default(), None);

    hub.time_out(connected.user_key);

    assert_eq!(
        connected.client.receive(1.0),
        vec![ClientEvent::Disconnected(DisconnectReason::TimedOut)]
    );
    assert_eq!(
        server.receive(1.0),
        vec![ServerEvent::Disconnect {
            user_key: connected.user_key,
            player_id: connected.player_id,
            reason: DisconnectReason::TimedOut,
        }]
    );
}

#[test]
fn server_kick_is_reported_on_next_receive() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let mut connected = connect_client(&mut server, &hub, ClientConfig::default(), None);

    server.disconnect_user(&connected.user_key);
    assert_eq!(server.users_count(), 0);
    assert_eq!(server.send_world(&world_of(&[])), Ok(0));

    assert_eq!(
        server.receive(0.0),
        vec![ServerEvent::Disconnect {
            user_key: connected.user_key,
            player_id: connected.player_id,
            reason: DisconnectReason::Requested,
        }]
    );
    assert_eq!(
        connected.client.receive(0.0),
        vec![ClientEvent::Disconnected(DisconnectReason::Remote)]
    );
}
