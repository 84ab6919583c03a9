//! Mediator integration tests
//!
//! Each test starts a mediator and a mock room service on ephemeral ports;
//! no external services are required.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use std::time::Duration;

use integration_tests::{
    chat_reply, command_frame, event_broadcast, frame_of, goodbye_frame, hello_frame,
    location_reply, unique_user, MockReply, Received, TestClient, TestServer, ACK_FRAME,
    ROOM_TIMEOUT_MS,
};

const QUIET: Duration = Duration::from_millis(200);

// ============================================================================
// Connection Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let body = reqwest::get(format!("{}/health", server.base_url()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_ack_is_first_frame() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    assert_eq!(client.recv_text().await.unwrap(), ACK_FRAME);
    assert!(server.room.requests().is_empty());
}

#[tokio::test]
async fn test_root_path_accepts_connections() {
    let server = TestServer::start().await.unwrap();
    let mut client = TestClient::connect(&server.ws_url("/"))
        .await
        .unwrap();

    client.expect_ack().await.unwrap();
}

// ============================================================================
// Hello Tests
// ============================================================================

#[tokio::test]
async fn test_hello_routes_replies_by_recipient() {
    let server = TestServer::start().await.unwrap();
    let (u1, u2) = (unique_user(), unique_user());

    let mut other = server.join(&u2).await.unwrap();

    let location = location_reply(&u1);
    let welcome = event_broadcast("Tester has just entered the room");
    server
        .room
        .push(MockReply::messages(vec![location.clone(), welcome.clone()]));

    let mut client = server.connect_acked().await.unwrap();
    client.send(&hello_frame(&u1, "Tester")).await.unwrap();

    assert_eq!(client.recv_text().await.unwrap(), frame_of(&location));
    assert_eq!(client.recv_text().await.unwrap(), frame_of(&welcome));

    assert_eq!(other.recv_text().await.unwrap(), frame_of(&welcome));
    other.assert_silent(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_hello_forwards_identity() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect_acked().await.unwrap();

    client.send(&hello_frame("u-42", "Ann")).await.unwrap();

    let requests = server.room.wait_for_requests(1).await.unwrap();
    let request = &requests[0];
    assert_eq!(request.path, "/room/hello");
    assert_eq!(request.user_id.as_deref(), Some("u-42"));
    assert_eq!(request.username.as_deref(), Some("Ann"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.body["userId"], "u-42");
    assert_eq!(request.body["version"], 1);
}

#[tokio::test]
async fn test_legacy_direction_names() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect_acked().await.unwrap();

    client
        .send(r#"roomHello,{"userId":"u1","username":"Ann"}"#)
        .await
        .unwrap();

    let requests = server.room.wait_for_requests(1).await.unwrap();
    assert_eq!(requests[0].path, "/room/hello");
}

#[tokio::test]
async fn test_newer_session_takes_over_identity() {
    let server = TestServer::start().await.unwrap();
    let user = unique_user();

    let mut first = server.join(&user).await.unwrap();
    let mut second = server.join(&user).await.unwrap();

    let reply = chat_reply(&user, "hi there");
    server.room.push(MockReply::messages(vec![reply.clone()]));
    second
        .send(&command_frame(None, &user, "hi there"))
        .await
        .unwrap();

    assert_eq!(second.recv_text().await.unwrap(), frame_of(&reply));
    first.assert_silent(QUIET).await.unwrap();

    // The replaced session leaving does not unregister the newer one
    first.close().await.unwrap();
    tokio::time::sleep(QUIET).await;

    let reply = chat_reply(&user, "still here");
    server.room.push(MockReply::messages(vec![reply.clone()]));
    second
        .send(&command_frame(None, &user, "still here"))
        .await
        .unwrap();

    assert_eq!(second.recv_text().await.unwrap(), frame_of(&reply));
}

// ============================================================================
// Room Command Tests
// ============================================================================

#[tokio::test]
async fn test_command_is_forwarded_with_commas_intact() {
    let server = TestServer::start_with_room_id(Some("room-1")).await.unwrap();
    let user = unique_user();
    let mut client = server.join(&user).await.unwrap();

    client
        .send(&command_frame(Some("room-1"), &user, "/say hello, world"))
        .await
        .unwrap();

    let requests = server.room.wait_for_requests(2).await.unwrap();
    assert_eq!(requests[1].path, "/room/room");
    assert_eq!(requests[1].body["content"], "/say hello, world");
}

#[tokio::test]
async fn test_room_mismatch_closes_connection() {
    let server = TestServer::start_with_room_id(Some("room-1")).await.unwrap();
    let mut client = server.connect_acked().await.unwrap();

    client
        .send(&command_frame(Some("room-2"), "u1", "hello"))
        .await
        .unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4003));
    assert!(server.room.requests().is_empty());
}

#[tokio::test]
async fn test_unknown_direction_closes_connection() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect_acked().await.unwrap();

    client.send("player,u1,{}").await.unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4001));
    assert!(server.room.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_frame_closes_connection() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect_acked().await.unwrap();

    client.send("hello").await.unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4002));
}

// ============================================================================
// Room Service Failure Tests
// ============================================================================

#[tokio::test]
async fn test_backend_error_closes_connection() {
    let server = TestServer::start().await.unwrap();
    let mut bystander = server.join(&unique_user()).await.unwrap();

    server.room.push(MockReply::status(500));
    let mut client = server.connect_acked().await.unwrap();
    client.send(&hello_frame(&unique_user(), "Tester")).await.unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4006));
    bystander.assert_silent(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_backend_timeout_closes_connection() {
    let server = TestServer::start().await.unwrap();
    let mut bystander = server.join(&unique_user()).await.unwrap();

    let late_by = Duration::from_millis(ROOM_TIMEOUT_MS * 4);
    let late = MockReply::messages(vec![event_broadcast("too late")]).delayed(late_by);
    server.room.push(late);

    let mut client = server.connect_acked().await.unwrap();
    client.send(&hello_frame(&unique_user(), "Tester")).await.unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4006));

    // The broadcast arriving after the timeout is dropped
    bystander.assert_silent(late_by + QUIET).await.unwrap();
}

#[tokio::test]
async fn test_malformed_backend_reply_closes_connection() {
    let server = TestServer::start().await.unwrap();
    server.room.push(MockReply::raw("not json"));

    let mut client = server.connect_acked().await.unwrap();
    client.send(&hello_frame(&unique_user(), "Tester")).await.unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4006));
}

// ============================================================================
// Goodbye Tests
// ============================================================================

#[tokio::test]
async fn test_goodbye_flushes_replies_then_closes() {
    let server = TestServer::start().await.unwrap();
    let user = unique_user();
    let mut client = server.join(&user).await.unwrap();

    let farewell = chat_reply(&user, "bye");
    server.room.push(MockReply::messages(vec![farewell.clone()]));
    client.send(&goodbye_frame(&user, "Tester")).await.unwrap();

    assert_eq!(client.recv_text().await.unwrap(), frame_of(&farewell));
    assert_eq!(client.expect_close().await.unwrap(), Some(1000));

    let requests = server.room.requests();
    assert_eq!(requests.last().unwrap().path, "/room/goodbye");
}

#[tokio::test]
async fn test_goodbye_closes_when_backend_fails() {
    let server = TestServer::start().await.unwrap();
    let user = unique_user();
    let mut client = server.join(&user).await.unwrap();

    server.room.push(MockReply::status(503));
    client.send(&goodbye_frame(&user, "Tester")).await.unwrap();

    assert_eq!(client.expect_close().await.unwrap(), Some(4006));
}

#[tokio::test]
async fn test_closed_session_no_longer_receives_broadcasts() {
    let server = TestServer::start().await.unwrap();
    let leaving = unique_user();
    let staying = unique_user();

    let mut gone = server.join(&leaving).await.unwrap();
    let mut client = server.join(&staying).await.unwrap();

    client_goodbye(&mut gone, &leaving).await;

    let news = event_broadcast("someone left");
    server.room.push(MockReply::messages(vec![news.clone()]));
    client
        .send(&command_frame(None, &staying, "/look"))
        .await
        .unwrap();

    assert_eq!(client.recv_text().await.unwrap(), frame_of(&news));
    assert!(matches!(gone.recv().await.unwrap(), Received::Ended));
}

async fn client_goodbye(client: &mut TestClient, user_id: &str) {
    client.send(&goodbye_frame(user_id, "Tester")).await.unwrap();
    assert_eq!(client.expect_close().await.unwrap(), Some(1000));
}
