use serde_json::Value;
use thiserror::Error;

/// How a request failed before the resource layer saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-success HTTP status
    Status,
    /// The client-side timeout elapsed before a response arrived
    Timeout,
    /// Network-level failure with no server response
    Connection,
    /// The response arrived but its body could not be decoded
    Decode,
}

/// Failure produced by the response stage for every unsuccessful call.
///
/// Always carries a display-ready `user_message`; the original transport
/// error stays attached so nothing is swallowed.
#[derive(Debug, Error)]
#[error("{user_message}")]
pub struct GatewayError {
    pub user_message: String,
    pub kind: FailureKind,
    /// HTTP status, when the server produced one
    pub status: Option<u16>,
    /// Structured error body returned by the server, when parseable
    pub body: Option<Value>,
    #[source]
    pub source: Option<reqwest::Error>,
}

impl GatewayError {
    /// The `error` text inside the server's structured body, if any
    pub fn server_error(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }
}

/// What resource convenience functions hand to callers on failure.
///
/// The server's structured body takes precedence over the gateway's
/// normalized message; a failure with no server body degrades to a generic
/// connection error. The gateway-stage error stays reachable either way.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .gateway.server_error().unwrap_or(&.gateway.user_message))]
    Server {
        /// The error body exactly as the server sent it
        body: Value,
        gateway: GatewayError,
    },
    #[error("Connection error")]
    Connection { gateway: GatewayError },
}

impl ApiError {
    /// The normalized display message attached by the response stage
    pub fn user_message(&self) -> &str {
        &self.gateway().user_message
    }

    pub fn gateway(&self) -> &GatewayError {
        match self {
            ApiError::Server { gateway, .. } => gateway,
            ApiError::Connection { gateway } => gateway,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.gateway().status
    }

    pub(crate) fn from_gateway(gateway: GatewayError) -> Self {
        match gateway.body.clone() {
            Some(body) => ApiError::Server { body, gateway },
            None => ApiError::Connection { gateway },
        }
    }
}

/// Status-to-message table applied by the response stage
pub(crate) fn user_message_for_status(status: u16, server_error: Option<&str>) -> String {
    match status {
        400 => server_error.unwrap_or("Invalid data").to_string(),
        401 => "Session expired. Please sign in again".to_string(),
        403 => "You do not have permission to perform this action".to_string(),
        404 => "Resource not found".to_string(),
        422 => server_error.unwrap_or("Invalid input data").to_string(),
        500 => "Internal server error. Try again later".to_string(),
        _ => server_error
            .map(str::to_string)
            .unwrap_or_else(|| format!("Error {status}")),
    }
}

pub(crate) const TIMEOUT_MESSAGE: &str = "The request took too long. Check your connection";
pub(crate) const CONNECTION_MESSAGE: &str = "Connection error. Check your internet connection";
