//! HTTP-level tests for the gateway's request and response stages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use condo_gateway::client::{
    ApiClient, ApiError, FailureKind, GatewayConfig, MemorySessionStore, Navigator, SessionStore,
    View,
};
use condo_gateway::models::{Role, Session, User};

struct CountingNavigator {
    view: View,
    redirects: AtomicUsize,
}

impl CountingNavigator {
    fn new(view: View) -> Arc<Self> {
        Arc::new(Self {
            view,
            redirects: AtomicUsize::new(0),
        })
    }

    fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn current_view(&self) -> View {
        self.view
    }

    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

fn test_user() -> User {
    User {
        id: 1,
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        cedula: "123".to_string(),
        phone: "3000000000".to_string(),
        role: Role::Security,
    }
}

fn signed_in_store() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_token("valid-token", test_user()))
}

fn client_for(
    server: &MockServer,
    store: Arc<MemorySessionStore>,
    navigator: Arc<CountingNavigator>,
) -> ApiClient {
    ApiClient::new(GatewayConfig::new(server.uri()), store, navigator).unwrap()
}

#[tokio::test]
async fn requests_without_a_token_carry_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let api = client_for(&server, store, CountingNavigator::new(View::Other));
    api.apartments().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn stored_token_is_attached_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let api = client_for(
        &server,
        signed_in_store(),
        CountingNavigator::new(View::Other),
    );
    api.users().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer valid-token");
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let navigator = CountingNavigator::new(View::Other);
    let api = client_for(&server, store.clone(), navigator.clone());

    let err = api.payments(None).await.unwrap_err();
    assert_eq!(err.user_message(), "Session expired. Please sign in again");
    assert!(store.token().is_none());
    assert!(store.user().is_none());
    assert_eq!(navigator.redirect_count(), 1);
}

#[tokio::test]
async fn unauthorized_on_login_view_clears_session_without_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let navigator = CountingNavigator::new(View::Login);
    let api = client_for(&server, store.clone(), navigator.clone());

    api.payments(None).await.unwrap_err();
    assert!(store.token().is_none());
    assert_eq!(navigator.redirect_count(), 0);
}

#[tokio::test]
async fn validation_errors_prefer_server_text_over_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "email already taken" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let api = client_for(
        &server,
        signed_in_store(),
        CountingNavigator::new(View::Other),
    );

    let err = api.users().await.unwrap_err();
    assert_eq!(err.user_message(), "email already taken");

    let err = api.apartments().await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid input data");
}

#[tokio::test]
async fn not_found_leaves_session_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let navigator = CountingNavigator::new(View::Other);
    let api = client_for(&server, store.clone(), navigator.clone());

    let err = api.apartments().await.unwrap_err();
    assert_eq!(err.user_message(), "Resource not found");
    assert_eq!(err.status(), Some(404));
    assert_eq!(store.token().as_deref(), Some("valid-token"));
    assert!(store.user().is_some());
    assert_eq!(navigator.redirect_count(), 0);
}

#[tokio::test]
async fn server_error_message_is_fixed_and_retry_reissues_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maintenance"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "stack trace" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maintenance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let api = client_for(
        &server,
        signed_in_store(),
        CountingNavigator::new(View::Other),
    );

    let err = api.events().await.unwrap_err();
    assert_eq!(err.user_message(), "Internal server error. Try again later");

    // Retry is just re-issuing the same fetch
    let events = api.events().await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn unmapped_status_falls_back_to_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&server)
        .await;

    let api = client_for(
        &server,
        signed_in_store(),
        CountingNavigator::new(View::Other),
    );

    let err = api.notifications().await.unwrap_err();
    assert_eq!(err.user_message(), "Error 418");
}

#[tokio::test]
async fn timeout_gets_its_own_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = GatewayConfig::new(server.uri()).with_timeout(Duration::from_millis(50));
    let api = ApiClient::new(
        config,
        Arc::new(MemorySessionStore::new()),
        CountingNavigator::new(View::Other),
    )
    .unwrap();

    let err = api.apartments().await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "The request took too long. Check your connection"
    );
    assert_eq!(err.gateway().kind, FailureKind::Timeout);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn unreachable_backend_gets_the_generic_connection_message() {
    // Grab a free port, then release it so the connection is refused.
    // (Dropping a wiremock server won't do: its listener stays bound.)
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::new(
        GatewayConfig::new(format!("http://{addr}")),
        Arc::new(MemorySessionStore::new()),
        CountingNavigator::new(View::Other),
    )
    .unwrap();

    let err = api.apartments().await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Connection error. Check your internet connection"
    );
    match err {
        ApiError::Connection { gateway } => {
            assert_eq!(gateway.kind, FailureKind::Connection);
            assert!(gateway.status.is_none());
        }
        other => panic!("expected connection error, got {other:?}"),
    }
}

#[tokio::test]
async fn login_returns_the_session_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "token": "fresh-token",
                "user": {
                    "id": 1,
                    "name": "Admin",
                    "email": "admin@example.com",
                    "cedula": "123",
                    "phone": "3000000000",
                    "role": "security"
                }
            }
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let api = client_for(&server, store.clone(), CountingNavigator::new(View::Other));

    let session = api.login("admin@example.com", "secret").await.unwrap();
    assert_eq!(session.token, "fresh-token");
    assert_eq!(session.user.role, Role::Security);

    // The caller decides to keep it, exactly like the login screen does
    store.store(Session {
        token: session.token.clone(),
        user: session.user.clone(),
    });
    assert_eq!(store.token().as_deref(), Some("fresh-token"));
}
