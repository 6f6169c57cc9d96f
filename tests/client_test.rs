//! End-to-end tests: REST client against a live server on an ephemeral port.

use strictly_gomoku::{
    ClientError, Color, CreateGameRequest, GameServer, MoveRequest, RestGameClient, ServerConfig,
    SessionManager, SessionStatus,
};
use tokio::net::TcpListener;

/// Starts a server on an ephemeral port and returns a client for it.
async fn spawn_server() -> (RestGameClient, SessionManager) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Bind");
    let addr = listener.local_addr().expect("Local addr");

    let sessions = SessionManager::new();
    let server = GameServer::with_sessions(ServerConfig::default(), sessions.clone());
    tokio::spawn(server.run_on(listener));

    (RestGameClient::new(format!("http://{}/", addr)), sessions)
}

#[tokio::test]
async fn test_full_game_over_the_wire() {
    let (client, sessions) = spawn_server().await;

    let health = client.health().await.expect("Health");
    assert_eq!(health.status, "ok");

    let created = client
        .create_game(&CreateGameRequest {
            size: Some(13),
            color: Some("white".to_string()),
        })
        .await
        .expect("Create");
    assert_eq!(created.player_id, "host");
    assert_eq!(created.color, Color::White);
    assert_eq!(sessions.len(), 1);

    let code = created.game_code;
    let guest = client.join_game(&code).await.expect("Join");
    assert_eq!(guest.color, Color::Black);

    // Guest plays black and opens.
    let mut snapshot = client.get_game(&code).await.expect("Get");
    assert_eq!(snapshot.status, SessionStatus::Playing);
    assert_eq!(snapshot.board.side(), 13);

    for col in 0..5 {
        snapshot = client
            .make_move(&code, &MoveRequest::new(&guest.player_id, 6, col))
            .await
            .expect("Black move");
        if col < 4 {
            snapshot = client
                .make_move(&code, &MoveRequest::new(&created.player_id, 12, col))
                .await
                .expect("White move");
        }
    }

    assert_eq!(snapshot.status, SessionStatus::Finished);
    assert_eq!(snapshot.winner, Some(Color::Black));
    assert_eq!(client.get_game(&code).await.expect("Get"), snapshot);
}

#[tokio::test]
async fn test_api_errors_surface_status_and_message() {
    let (client, _) = spawn_server().await;

    let err = client.get_game("QQQQQ").await.expect_err("Unknown code");
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ClientError::Api { ref message, .. } if message.contains("QQQQQ")));

    let created = client
        .create_game(&CreateGameRequest::default())
        .await
        .expect("Create");
    client.join_game(&created.game_code).await.expect("Join");

    let err = client
        .join_game(&created.game_code)
        .await
        .expect_err("Already full");
    assert_eq!(err.status(), Some(400));

    let err = client
        .make_move(&created.game_code, &MoveRequest::new("guest", 7, 7))
        .await
        .expect_err("Black moves first");
    assert_eq!(err.status(), Some(403));
    assert!(matches!(err, ClientError::Api { ref message, .. } if message == "Not your turn"));
}
