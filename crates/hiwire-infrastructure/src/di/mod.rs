//! Composition root
//!
//! [`Engine`] owns the concrete registries and the property layer builder
//! and drives one build pass through the application layer.

pub mod bootstrap;

pub use bootstrap::{Engine, EngineOptions, EngineState};
