use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::config::GatewayConfig;
use crate::client::error::{
    user_message_for_status, FailureKind, GatewayError, CONNECTION_MESSAGE, TIMEOUT_MESSAGE,
};
use crate::client::session::SessionStore;

/// Where the user currently is, as far as 401 handling cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Other,
}

/// Navigation seam for session-expiry handling.
///
/// The web dashboard performs a hard redirect to the login view; injecting
/// the jump keeps the gateway testable and usable headless.
pub trait Navigator: Send + Sync {
    fn current_view(&self) -> View;

    fn redirect_to_login(&self);
}

/// No-op navigator for headless callers (scripts, tests that don't care)
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn current_view(&self) -> View {
        View::Other
    }

    fn redirect_to_login(&self) {}
}

/// Single point of HTTP egress for every resource function.
///
/// Two stages wrap each call: the request stage attaches the bearer token
/// from the session store when one is present, and the response stage
/// normalizes every failure into a [`GatewayError`] carrying a
/// display-ready `user_message`. Successful responses pass through
/// unchanged. No retries, no call-site cancellation.
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url,
            store,
            navigator,
        })
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Request stage: attach the bearer token when the store holds one
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match self.store.token() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Send a request through both stages.
    ///
    /// On success the response passes through untouched; every failure comes
    /// back as a [`GatewayError`], never silently recovered.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        match self.authorize(request).send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(self.normalize_status(response).await),
            Err(source) => Err(normalize_transport(source)),
        }
    }

    /// Response stage for server-produced failure statuses
    async fn normalize_status(&self, response: Response) -> GatewayError {
        let status = response.status();
        let body: Option<Value> = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).ok(),
            Err(_) => None,
        };
        let server_error = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str);

        let user_message = user_message_for_status(status.as_u16(), server_error);
        debug!("Request failed with {status}: {user_message}");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
        }

        GatewayError {
            user_message,
            kind: FailureKind::Status,
            status: Some(status.as_u16()),
            body,
            source: None,
        }
    }

    /// 401 path: drop both persisted keys, then redirect once unless the
    /// user is already on the login view.
    fn expire_session(&self) {
        warn!("Session expired, clearing stored credentials");
        self.store.clear();
        if self.navigator.current_view() != View::Login {
            self.navigator.redirect_to_login();
        }
    }
}

/// Response stage for failures with no server response
fn normalize_transport(source: reqwest::Error) -> GatewayError {
    let (kind, user_message) = if source.is_timeout() {
        (FailureKind::Timeout, TIMEOUT_MESSAGE)
    } else if source.is_decode() {
        (FailureKind::Decode, CONNECTION_MESSAGE)
    } else {
        (FailureKind::Connection, CONNECTION_MESSAGE)
    };
    warn!("Request failed before a response arrived: {source}");

    GatewayError {
        user_message: user_message.to_string(),
        kind,
        status: None,
        body: None,
        source: Some(source),
    }
}
