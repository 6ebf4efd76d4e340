use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nurse_cell::{Conversation, NurseService, Sender};
use shared_backend::BackendClient;
use shared_models::ApiError;
use shared_utils::test_utils::TestConfig;

async fn create_service(server: &MockServer) -> NurseService {
    let backend =
        BackendClient::new(&TestConfig::for_server(&server.uri()).to_app_config()).unwrap();
    backend.set_token("patient-token").await;
    NurseService::new(&backend)
}

#[tokio::test]
async fn test_ask_returns_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/nurse/chat"))
        .and(header("Authorization", "Bearer patient-token"))
        .and(body_json(json!({ "message": "Can I take ibuprofen with metformin?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "Generally yes, but check with your doctor first."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server).await;
    let reply = service
        .ask("Can I take ibuprofen with metformin?")
        .await
        .unwrap();

    assert_eq!(reply.reply, "Generally yes, but check with your doctor first.");
}

#[tokio::test]
async fn test_send_records_both_sides() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/nurse/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Hello! How are you feeling?" })))
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server).await;
    let mut conversation = Conversation::new();

    service.send(&mut conversation, "Hi").await.unwrap();

    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.messages()[0].sender, Sender::Patient);
    assert_eq!(conversation.messages()[0].text, "Hi");
    assert_eq!(
        conversation.last_reply().map(|m| m.text.as_str()),
        Some("Hello! How are you feeling?")
    );
}

#[tokio::test]
async fn test_send_failure_keeps_patient_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/nurse/chat"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "message is required" })))
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server).await;
    let mut conversation = Conversation::new();

    let result = service.send(&mut conversation, "   ").await;

    assert_matches!(result, Err(ApiError::Request { .. }));
    assert_eq!(conversation.len(), 1);
    assert!(conversation.last_reply().is_none());
}

#[tokio::test]
async fn test_reply_missing_field_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/nurse/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server).await;
    let result = service.ask("Hello").await;

    assert_matches!(result, Err(ApiError::Decode(_)));
}
