use std::time::Duration;

use chatline::api::{ChatClient, ClientError, HttpChatClient};
use chatline::core::action::{Action, Effect, update};
use chatline::core::controller::deliver;
use chatline::core::message::{CONNECTION_ERROR_TEXT, Message};
use chatline::core::state::Session;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> HttpChatClient {
    HttpChatClient::new(format!("{}/chat", server.uri()), None).unwrap()
}

/// Drives one full send through the reducer and the real HTTP client.
async fn send_through(session: &mut Session, client: &HttpChatClient, draft: &str) {
    update(session, Action::SetDraft(draft.to_string()));
    let Effect::SpawnRequest(request) = update(session, Action::Send) else {
        panic!("Expected SpawnRequest for draft {draft:?}");
    };
    assert_eq!(session.draft(), "", "draft clears before the reply arrives");
    let completion = deliver(client, request).await;
    update(session, completion);
}

// ============================================================================
// HttpChatClient
// ============================================================================

#[tokio::test]
async fn test_successful_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "message": "Hello" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "response": "Hi there" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let reply = assert_ok!(client.send_message("Hello").await);
    assert_eq!(reply, "Hi there");
}

#[tokio::test]
async fn test_payload_is_sent_untrimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({ "message": "  spaced out  " })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "response": "ok" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_ok!(client.send_message("  spaced out  ").await);
}

#[tokio::test]
async fn test_bad_request_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "No input provided" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(client.send_message("x").await);
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("No input provided"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(client.send_message("x").await);
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(client.send_message("x").await);
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_missing_response_field_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": "wrong key" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = assert_err!(client.send_message("x").await);
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Grab a free port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpChatClient::new(format!("http://{addr}/chat"), None).unwrap();
    let err = assert_err!(client.send_message("x").await);
    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn test_configured_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "response": "too late" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = HttpChatClient::new(
        format!("{}/chat", mock_server.uri()),
        Some(Duration::from_millis(200)),
    )
    .unwrap();
    let err = assert_err!(client.send_message("x").await);
    assert!(matches!(err, ClientError::Network(_)));
}

// ============================================================================
// End-to-end send scenarios
// ============================================================================

#[tokio::test]
async fn test_scenario_hello_hi_there() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({ "message": "Hello" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "response": "Hi there" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::new();
    send_through(&mut session, &client, "Hello").await;

    assert_eq!(
        session.transcript().to_vec(),
        vec![Message::user("Hello"), Message::bot("Hi there")]
    );
    assert_eq!(session.draft(), "");
}

#[tokio::test]
async fn test_scenario_whitespace_draft_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = Session::new();
    update(&mut session, Action::SetDraft("   ".to_string()));
    assert_eq!(update(&mut session, Action::Send), Effect::None);

    assert!(session.transcript().is_empty());
    assert_eq!(session.draft(), "   ");
}

#[tokio::test]
async fn test_scenario_ping_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "model crashed" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::new();
    send_through(&mut session, &client, "Ping").await;

    assert_eq!(
        session.transcript().to_vec(),
        vec![Message::user("Ping"), Message::bot(CONNECTION_ERROR_TEXT)]
    );
}

#[tokio::test]
async fn test_scenario_conversation_keeps_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({ "message": "one" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "response": "uno" })),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({ "message": "two" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "response": "dos" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::new();
    send_through(&mut session, &client, "one").await;
    send_through(&mut session, &client, "two").await;

    let texts: Vec<&str> = session.transcript().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "uno", "two", "dos"]);
}
