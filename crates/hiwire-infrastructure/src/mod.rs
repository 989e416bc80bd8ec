//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared by the domain and
//! application layers, plus the engine composition root.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered YAML/TOML/env properties, placeholders, system configuration |
//! | [`constants`] | Centralized infrastructure constants |
//!
//! ### Registries & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | `DashMap`-backed instance and configuration registries |
//! | [`di`] | `Engine` with its `init → build → teardown` lifecycle |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod registry;

// Re-export commonly used types
pub use config::{PropertyLayerBuilder, SystemConfiguration};
pub use di::{Engine, EngineOptions, EngineState};
pub use error_ext::ErrorContext;
pub use registry::{ConcurrentInstanceRegistry, ConfigurationRegistry};
