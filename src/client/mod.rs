pub mod config;
pub mod error;
pub mod gateway;
pub mod resources;
pub mod session;

pub use config::GatewayConfig;
pub use error::{ApiError, FailureKind, GatewayError};
pub use gateway::{ApiClient, Navigator, NullNavigator, View};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
