// Adapters layer: concrete implementations for external systems.

pub mod auth;
pub mod http;

pub use auth::Authenticator;
pub use http::{ApiClient, ClientConfig, Operation};
