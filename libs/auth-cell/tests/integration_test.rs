use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::{AuthService, Role};
use shared_backend::BackendClient;
use shared_models::ApiError;
use shared_utils::test_utils::{MockBackendResponses, TestConfig, TestUser};

fn create_backend(server: &MockServer) -> BackendClient {
    BackendClient::new(&TestConfig::for_server(&server.uri()).to_app_config()).unwrap()
}

#[tokio::test]
async fn test_login_stores_token_for_later_requests() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("patient@example.com");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "patient@example.com",
            "password": "secret123"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::auth_response(&user, "jwt-abc")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user.to_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    let auth = AuthService::new(&backend);
    assert!(!auth.is_authenticated().await);

    let response = auth.login("patient@example.com", "secret123").await.unwrap();
    assert_eq!(response.token, "jwt-abc");
    assert_eq!(response.user, user.to_user());
    assert_eq!(backend.token().await, Some("jwt-abc".to_string()));

    let me = auth.me().await.unwrap();
    assert_eq!(me.id, user.id);
    assert_eq!(me.role, Role::Patient);
}

#[tokio::test]
async fn test_me_accepts_roles_outside_patient_and_doctor() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("nurse@example.com");
    let mut body = user.to_json();
    body["role"] = json!("nurse");

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    backend.set_token("jwt-nurse").await;
    let me = AuthService::new(&backend).me().await.unwrap();

    assert_eq!(me.id, user.id);
    assert_eq!(me.role, Role::Other);
}

#[tokio::test]
async fn test_login_with_bad_credentials_surfaces_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    let auth = AuthService::new(&backend);

    let err = auth.login("patient@example.com", "wrong").await.unwrap_err();

    assert_matches!(err, ApiError::Request { .. });
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_register_sends_optional_fields_and_authenticates() {
    let mock_server = MockServer::start().await;
    let doctor = TestUser::doctor("doctor@example.com");

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "doctor@example.com",
            "password": "secret123",
            "name": "Dr. Emily Smith",
            "role": "doctor"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockBackendResponses::auth_response(&doctor, "jwt-doc")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    let auth = AuthService::new(&backend);

    let response = auth
        .register(
            "doctor@example.com",
            "secret123",
            Some("Dr. Emily Smith"),
            Some(Role::Doctor),
        )
        .await
        .unwrap();

    assert!(response.user.is_doctor());
    assert!(auth.is_authenticated().await);
}

#[tokio::test]
async fn test_register_omits_missing_name_and_role() {
    let mock_server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "test@example.com",
            "password": "secret123"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockBackendResponses::auth_response(&user, "jwt-new")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    let auth = AuthService::new(&backend);

    tokio_test::assert_ok!(auth.register("test@example.com", "secret123", None, None).await);
}

#[tokio::test]
async fn test_logout_clears_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Missing Authorization header" })),
        )
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    backend.set_token("jwt-old").await;
    let auth = AuthService::new(&backend);

    auth.logout().await;
    let err = auth.me().await.unwrap_err();

    assert!(err.is_unauthorized());
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_malformed_auth_response_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "only-token" })))
        .mount(&mock_server)
        .await;

    let backend = create_backend(&mock_server);
    let auth = AuthService::new(&backend);

    let err = auth.login("patient@example.com", "secret123").await.unwrap_err();

    assert_matches!(err, ApiError::Decode(_));
    assert!(!auth.is_authenticated().await);
}
