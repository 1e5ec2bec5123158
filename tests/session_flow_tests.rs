//! End-to-end session scenarios: reducer + effect runner against a mock backend.

use std::time::Duration;

use chatbot_tui::api::{ChatService, GenerationParams, HttpChatClient};
use chatbot_tui::core::action::{Action, Effect, init, update};
use chatbot_tui::core::effects::perform;
use chatbot_tui::core::state::{ConversationState, GREETING, Role};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Apply an action and run whatever effect it produces to completion,
/// feeding results back in until the session is quiet.
async fn drive(state: &mut ConversationState, service: &dyn ChatService, action: Action) {
    let mut effect = update(state, action);
    while effect != Effect::None && effect != Effect::Quit {
        match perform(service, effect).await {
            Some(next) => effect = update(state, next),
            None => break,
        }
    }
}

async fn start(service: &dyn ChatService) -> ConversationState {
    let (mut state, startup) = init();
    if let Some(action) = perform(service, startup).await {
        update(&mut state, action);
    }
    state
}

fn transcript(state: &ConversationState) -> Vec<(Role, String)> {
    state
        .messages()
        .iter()
        .map(|m| (m.role(), m.text().to_string()))
        .collect()
}

async fn mount_health(server: &MockServer, status: &str) {
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "model_status": status
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_startup_shows_greeting_and_probes_health() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, "loading").await;
    let client = HttpChatClient::new(&mock_server.uri(), GenerationParams::default()).unwrap();

    let state = start(&client).await;
    assert_eq!(transcript(&state), vec![(Role::Bot, GREETING.to_string())]);
    assert_eq!(state.model_status(), Some("loading"));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_startup_with_unreachable_backend() {
    let client = HttpChatClient::new("http://127.0.0.1:1", GenerationParams::default()).unwrap();

    let state = start(&client).await;
    assert_eq!(state.model_status(), None);
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.last_error(), None);
}

#[tokio::test]
async fn test_successful_exchange() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, "loading").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "hello!",
            "tokens_used": 3,
            "tokens_per_sec": 12.5,
            "model_status": "ready"
        })))
        .mount(&mock_server)
        .await;
    let client = HttpChatClient::new(&mock_server.uri(), GenerationParams::default()).unwrap();

    let mut state = start(&client).await;
    drive(&mut state, &client, Action::Submit("hi".into())).await;

    assert_eq!(
        transcript(&state),
        vec![
            (Role::Bot, GREETING.to_string()),
            (Role::User, "hi".to_string()),
            (Role::Bot, "hello!".to_string()),
        ]
    );
    let meta = state.messages()[2].meta().copied().unwrap();
    assert_eq!(meta.token_count, 3);
    assert_eq!(meta.tokens_per_second, 12.5);
    assert_eq!(state.model_status(), Some("ready"));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_whitespace_submission_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = HttpChatClient::new(&mock_server.uri(), GenerationParams::default()).unwrap();

    let (mut state, _) = init();
    drive(&mut state, &client, Action::Submit("   ".into())).await;
    assert_eq!(state.messages().len(), 1);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_timeout_becomes_fallback_error_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/chat"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;
    let client = HttpChatClient::with_timeout(
        &mock_server.uri(),
        GenerationParams::default(),
        Duration::from_millis(200),
    )
    .unwrap();

    let (mut state, _) = init();
    drive(&mut state, &client, Action::Submit("hi".into())).await;

    assert_eq!(
        transcript(&state),
        vec![
            (Role::Bot, GREETING.to_string()),
            (Role::User, "hi".to_string()),
            (
                Role::Error,
                "Error: Failed to communicate with the chatbot service".to_string()
            ),
        ]
    );
    assert_eq!(
        state.last_error(),
        Some("Failed to communicate with the chatbot service")
    );
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_server_detail_becomes_error_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "X"})))
        .mount(&mock_server)
        .await;
    let client = HttpChatClient::new(&mock_server.uri(), GenerationParams::default()).unwrap();

    let (mut state, _) = init();
    drive(&mut state, &client, Action::Submit("hi".into())).await;

    let last = state.messages().last().unwrap();
    assert_eq!(last.role(), Role::Error);
    assert_eq!(last.text(), "Error: X");
    assert_eq!(state.last_error(), Some("X"));
}

#[tokio::test]
async fn test_conversation_continues_after_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/chat"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "back online",
            "tokens_used": 2,
            "tokens_per_sec": 8.0,
            "model_status": "ready"
        })))
        .mount(&mock_server)
        .await;
    let client = HttpChatClient::new(&mock_server.uri(), GenerationParams::default()).unwrap();

    let (mut state, _) = init();
    drive(&mut state, &client, Action::Submit("first".into())).await;
    assert!(state.last_error().is_some());

    drive(&mut state, &client, Action::Submit("second".into())).await;
    assert_eq!(state.last_error(), None);

    let roles: Vec<Role> = state.messages().iter().map(|m| m.role()).collect();
    assert_eq!(
        roles,
        vec![Role::Bot, Role::User, Role::Error, Role::User, Role::Bot]
    );
    assert!(
        state
            .messages()
            .windows(2)
            .all(|pair| pair[0].id() < pair[1].id())
    );
}
