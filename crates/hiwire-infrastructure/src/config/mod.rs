//! Configuration
//!
//! Layered property sources, placeholder resolution and the system
//! configuration types.

pub mod placeholder;
pub mod properties;
pub mod types;

pub use placeholder::{PlaceholderResolver, resolve_space};
pub use properties::PropertyLayerBuilder;
pub use types::{AppConfig, LoggingConfig, ProfilesConfig, ServerConfig, SystemConfiguration};
