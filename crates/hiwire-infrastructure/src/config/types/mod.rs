//! Configuration types module

pub mod app;
pub mod logging;
pub mod system;

// Re-export main types
pub use app::{AppConfig, ProfilesConfig, ServerConfig};
pub use logging::LoggingConfig;
pub use system::SystemConfiguration;
