use std::env;
use std::time::Duration;

use tracing::info;

/// Backend base URL when `CONDO_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Client-wide request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Resolve the base URL from `CONDO_API_URL`, falling back to the local
    /// development backend.
    pub fn from_env() -> Self {
        let base_url = env::var("CONDO_API_URL").unwrap_or_else(|_| {
            info!("CONDO_API_URL not set, using default: {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Shorter timeout for tests; production callers keep the fixed default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
