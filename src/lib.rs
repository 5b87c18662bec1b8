pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ApiClient, Authenticator, ClientConfig};
pub use app::{run, RunOptions, RunOutcome};
pub use config::AppConfig;
pub use crate::core::{RunReport, TraversalDriver, TraversalMode};
pub use utils::error::{DescriberError, Result};
