#![cfg(test)]

use async_trait::async_trait;
use helpdesk_bot::{
    base::{
        config::{Config, ConfigInner},
        prompts::{SUPPORT_FALLBACK_REPLY, TICKET_FALLBACK_REPLY},
        types::{InboundMessage, Void},
    },
    interaction::{message::handle_message, responder::Responder},
    runtime::Runtime,
    service::{
        chat::{ChatClient, GenericChatClient},
        llm::LlmClient,
        tracker::TrackerClient,
    },
};
use httpmock::prelude::*;
use mockall::mock;
use serde_json::json;
use std::sync::Arc;

const CHANNEL_ID: &str = "C01TEST";
const GEMINI_PATH: &str = "/models/gemini-test:generateContent";

// Mocks.

// Mock chat client for testing.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        fn bot_user_id(&self) -> &str;
        async fn start(&self) -> Void;
        async fn send_message(&self, channel_id: &str, text: &str) -> Void;
    }
}

/// A chat mock that expects exactly one reply satisfying `check`.
fn expect_reply(check: impl Fn(&str) -> bool + Send + 'static) -> MockChat {
    let mut mock = MockChat::new();

    mock.expect_bot_user_id().return_const("U12345".to_string());
    mock.expect_send_message()
        .withf(move |channel_id, text| channel_id == CHANNEL_ID && check(text))
        .times(1)
        .returning(|_, _| Ok(()));

    mock
}

/// Helper function to setup the test environment.
///
/// Gemini and MantisBT are real HTTP clients pointed at the given base URLs.
fn setup_test_environment(gemini_base: String, mantis_base: String, chat: MockChat) -> Runtime {
    setup_test_environment_with_timeout(gemini_base, mantis_base, chat, 5)
}

/// Same as [`setup_test_environment`], with a custom outbound request timeout.
fn setup_test_environment_with_timeout(gemini_base: String, mantis_base: String, chat: MockChat, request_timeout_secs: u64) -> Runtime {
    let config = Config::from(ConfigInner {
        slack_bot_token: "xoxb-test".to_string(),
        slack_app_token: "xapp-test".to_string(),
        gemini_api_key: "test-gemini-key".to_string(),
        gemini_model: "gemini-test".to_string(),
        gemini_api_base: gemini_base,
        mantis_url: mantis_base,
        mantis_api_token: "test-mantis-token".to_string(),
        mantis_project_id: 3,
        request_timeout_secs,
        ..Default::default()
    });

    config.validate().expect("Test configuration should be valid");

    let llm = LlmClient::gemini(&config).expect("Failed to create LLM client");
    let tracker = TrackerClient::mantis(&config).expect("Failed to create tracker client");
    let responder = Responder::new(config.clone(), llm.clone(), tracker.clone());
    let chat = ChatClient::new(Arc::new(chat));

    Runtime {
        config,
        llm,
        tracker,
        responder,
        chat,
    }
}

fn user_message(text: &str) -> InboundMessage {
    InboundMessage {
        text: text.to_string(),
        sender_id: "U54321".to_string(),
        sender_is_bot: false,
    }
}

/// Run the handler and wait for the spawned task to finish.
async fn dispatch(runtime: &Runtime, message: InboundMessage) {
    let handle = handle_message(message, CHANNEL_ID.to_string(), runtime.responder.clone(), runtime.chat.clone()).expect("Message should have been accepted");

    handle.await.expect("Handler task should not panic");
}

#[tokio::test]
async fn test_bot_messages_are_ignored() {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let mantis = MockServer::start();
    let mantis_mock = mantis.mock(|when, then| {
        when.method(POST);
        then.status(201);
    });

    let mut chat = MockChat::new();
    chat.expect_send_message().never();

    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    for text in ["create ticket for me", "hello there", ""] {
        let message = InboundMessage {
            sender_is_bot: true,
            ..user_message(text)
        };

        let handle = handle_message(message, CHANNEL_ID.to_string(), runtime.responder.clone(), runtime.chat.clone());
        assert!(handle.is_none(), "Bot messages must not be handled");
    }

    gemini_mock.assert_calls(0);
    mantis_mock.assert_calls(0);
}

#[tokio::test]
async fn test_ticket_request_creates_ticket_and_replies_with_id() {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let mantis = MockServer::start();
    let mantis_mock = mantis.mock(|when, then| {
        when.method(POST)
            .path("/issues/")
            .header("authorization", "test-mantis-token")
            .json_body(json!({
                "summary": "Support Request from Slack",
                "description": "User ID: U54321\n\nIssue: Please Create Ticket, the door is stuck",
                "project": {"id": 3},
                "category": "General"
            }));
        then.status(201).json_body(json!({"issue": {"id": 42}}));
    });

    let chat = expect_reply(|text| text.contains("42"));
    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    dispatch(&runtime, user_message("Please Create Ticket, the door is stuck")).await;

    mantis_mock.assert();
    gemini_mock.assert_calls(0);
}

#[tokio::test]
async fn test_tracker_error_replies_with_fallback() {
    let gemini = MockServer::start();
    let mantis = MockServer::start();
    let mantis_mock = mantis.mock(|when, then| {
        when.method(POST).path("/issues/");
        then.status(500).body("Internal Server Error");
    });

    let chat = expect_reply(|text| text == TICKET_FALLBACK_REPLY);
    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    dispatch(&runtime, user_message("create TICKET: drum makes noise")).await;

    // No retry.
    mantis_mock.assert_calls(1);
}

#[tokio::test]
async fn test_tracker_timeout_replies_with_fallback() {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let mantis = MockServer::start();
    let mantis_mock = mantis.mock(|when, then| {
        when.method(POST).path("/issues/");
        then.status(201).delay(std::time::Duration::from_secs(3)).json_body(json!({"issue": {"id": 42}}));
    });

    let chat = expect_reply(|text| text == TICKET_FALLBACK_REPLY);
    let runtime = setup_test_environment_with_timeout(gemini.base_url(), mantis.base_url(), chat, 1);

    dispatch(&runtime, user_message("create ticket: the door will not open")).await;

    mantis_mock.assert_calls(1);
    gemini_mock.assert_calls(0);
}

#[tokio::test]
async fn test_support_query_relays_llm_reply() {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path(GEMINI_PATH).header("x-goog-api-key", "test-gemini-key").body_includes("My washer will not spin");
        then.status(200).json_body(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Check that the load is balanced and try a spin-only cycle."}]},
                "finishReason": "STOP"
            }]
        }));
    });
    let mantis = MockServer::start();
    let mantis_mock = mantis.mock(|when, then| {
        when.method(POST);
        then.status(201);
    });

    let chat = expect_reply(|text| text == "Check that the load is balanced and try a spin-only cycle.");
    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    dispatch(&runtime, user_message("My washer will not spin")).await;

    gemini_mock.assert();
    mantis_mock.assert_calls(0);
}

#[tokio::test]
async fn test_llm_transport_error_replies_with_fallback() {
    let mantis = MockServer::start();

    let chat = expect_reply(|text| text == SUPPORT_FALLBACK_REPLY);
    let runtime = setup_test_environment("http://127.0.0.1:1".to_string(), mantis.base_url(), chat);

    dispatch(&runtime, user_message("Error code E21 on the display")).await;
}

#[tokio::test]
async fn test_empty_text_takes_support_route() {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path(GEMINI_PATH).body_includes("User said: \\\"\\\"");
        then.status(200).json_body(json!({"candidates": [{"content": {"parts": [{"text": "How can I help with your washer?"}]}}]}));
    });
    let mantis = MockServer::start();

    let chat = expect_reply(|text| text == "How can I help with your washer?");
    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    dispatch(&runtime, InboundMessage::default()).await;

    gemini_mock.assert();
}

#[tokio::test]
async fn test_identical_ticket_requests_create_duplicates() {
    let gemini = MockServer::start();
    let mantis = MockServer::start();
    let mantis_mock = mantis.mock(|when, then| {
        when.method(POST).path("/issues/");
        then.status(201).json_body(json!({"issue": {"id": 7}}));
    });

    let mut chat = MockChat::new();
    chat.expect_send_message().times(2).returning(|_, _| Ok(()));

    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    dispatch(&runtime, user_message("create ticket: water on the floor")).await;
    dispatch(&runtime, user_message("create ticket: water on the floor")).await;

    mantis_mock.assert_calls(2);
}

#[tokio::test]
async fn test_failed_reply_does_not_panic() {
    let gemini = MockServer::start();
    gemini.mock(|when, then| {
        when.method(POST).path(GEMINI_PATH);
        then.status(200).json_body(json!({"candidates": [{"content": {"parts": [{"text": "Try again."}]}}]}));
    });
    let mantis = MockServer::start();

    let mut chat = MockChat::new();
    chat.expect_send_message().times(1).returning(|_, _| Err(anyhow::anyhow!("channel_not_found")));

    let runtime = setup_test_environment(gemini.base_url(), mantis.base_url(), chat);

    dispatch(&runtime, user_message("hello")).await;
}
