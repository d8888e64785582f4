pub mod client;
pub mod filters;
pub mod models;

pub use client::{ApiClient, ApiError, GatewayConfig, GatewayError};
