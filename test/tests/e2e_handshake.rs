/// E2E tests for the connection handshake
/// Covers acceptance, player slot assignment and every rejection reason

use snapsync_client::{Client, ClientConfig, ClientError, ClientEvent, ClientState};
use snapsync_server::{ServerConfig, ServerEvent};
use snapsync_shared::{
    ClientTransport, ConfigError, DisconnectReason, ProtocolVersion, RejectReason, SyncConfig,
    TransportEvent,
};
use snapsync_test::{connect_client, new_server};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn accepted_client_gets_lowest_free_slot_and_payload_is_forwarded() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());

    let transport = hub.client_transport();
    let user_key = transport.user_key();
    let mut client = Client::connect(
        ClientConfig::default(),
        Box::new(transport),
        Some(b"player-one".to_vec()),
    )
    .unwrap();
    assert_eq!(client.state(), &ClientState::Connecting);

    assert_eq!(
        server.receive(0.0),
        vec![ServerEvent::Connect {
            user_key,
            player_id: 0,
            payload: b"player-one".to_vec(),
        }]
    );
    assert_eq!(client.receive(0.0), vec![ClientEvent::Connected]);
    assert_eq!(client.state(), &ClientState::Connected);

    let second = connect_client(&mut server, &hub, ClientConfig::default(), None);
    assert_eq!(second.player_id, 1);
    assert_eq!(server.users_count(), 2);
}

#[test]
fn freed_slot_is_reused() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());

    let mut first = connect_client(&mut server, &hub, ClientConfig::default(), None);
    let second = connect_client(&mut server, &hub, ClientConfig::default(), None);
    assert_eq!((first.player_id, second.player_id), (0, 1));

    first.client.disconnect();
    assert_eq!(
        first.client.state(),
        &ClientState::Disconnected(DisconnectReason::Requested)
    );
    assert_eq!(
        server.receive(0.0),
        vec![ServerEvent::Disconnect {
            user_key: first.user_key,
            player_id: 0,
            reason: DisconnectReason::Remote,
        }]
    );

    let third = connect_client(&mut server, &hub, ClientConfig::default(), None);
    assert_eq!(third.player_id, 0);
}

#[test]
fn version_mismatch_is_rejected() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());

    let transport = hub.client_transport();
    let user_key = transport.user_key();
    let config = ClientConfig {
        protocol_version: ProtocolVersion::new(9, 0, 0),
        ..Default::default()
    };
    let mut client = Client::connect(config, Box::new(transport), None).unwrap();

    assert_eq!(
        server.receive(0.0),
        vec![ServerEvent::Reject {
            user_key,
            reason: RejectReason::VersionMismatch,
        }]
    );
    assert_eq!(
        client.receive(0.0),
        vec![ClientEvent::Rejected(RejectReason::VersionMismatch)]
    );
    assert_eq!(
        client.state(),
        &ClientState::Disconnected(DisconnectReason::Rejected(RejectReason::VersionMismatch))
    );
    assert_eq!(server.users_count(), 0);
}

#[test]
fn patch_version_difference_is_accepted() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let current = ProtocolVersion::CURRENT;
    let config = ClientConfig {
        protocol_version: ProtocolVersion::new(current.major, current.minor, current.patch + 1),
        ..Default::default()
    };

    let connected = connect_client(&mut server, &hub, config, None);
    assert_eq!(connected.player_id, 0);
}

#[test]
fn full_server_rejects() {
    init_logging();
    let sync = SyncConfig {
        max_players: 1,
        ..Default::default()
    };
    let (mut server, hub) = new_server(ServerConfig {
        sync: sync.clone(),
        ..Default::default()
    });
    let client_config = ClientConfig {
        sync,
        ..Default::default()
    };

    connect_client(&mut server, &hub, client_config.clone(), None);

    let transport = hub.client_transport();
    let user_key = transport.user_key();
    let mut client = Client::connect(client_config, Box::new(transport), None).unwrap();

    assert_eq!(
        server.receive(0.0),
        vec![ServerEvent::Reject {
            user_key,
            reason: RejectReason::ServerFull,
        }]
    );
    assert_eq!(
        client.receive(0.0),
        vec![ClientEvent::Rejected(RejectReason::ServerFull)]
    );
}

#[test]
fn malformed_request_is_rejected() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());

    let mut transport = hub.client_transport();
    let user_key = transport.user_key();
    transport.connect(&[]).unwrap();

    assert_eq!(
        server.receive(0.0),
        vec![ServerEvent::Reject {
            user_key,
            reason: RejectReason::Malformed,
        }]
    );
    assert_eq!(
        transport.receive(),
        Ok(Some(TransportEvent::Rejected(RejectReason::Malformed)))
    );
}

#[test]
fn invalid_config_is_refused_before_connecting() {
    init_logging();
    let (mut server, hub) = new_server(ServerConfig::default());
    let config = ClientConfig {
        sync: SyncConfig {
            tick_step: -1.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let result = Client::connect(config, Box::new(hub.client_transport()), None);
    assert!(matches!(
        result,
        Err(ClientError::Config(ConfigError::InvalidTickStep { .. }))
    ));
    assert!(server.receive(0.0).is_empty());
}
