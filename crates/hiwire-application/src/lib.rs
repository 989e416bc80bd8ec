//! Application Layer - Hiwire
//!
//! Implements the build pipeline of the object-graph construction engine.
//!
//! ## Architecture
//!
//! ```text
//! units ──► Categorizer ──► {pre, main, post}
//!                               │ per phase
//!                               ▼
//!                      Dependency Graph Resolver
//!                               │ ordered units
//!                               ▼
//!           PropertyLayerProvider ──► bind ──► Instantiation Engine ──► InstanceRegistry
//! ```
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `hiwire-domain`: value objects, error kinds and port traits
//! - Pure Rust libraries for logging, serialization and graph algorithms
//!
//! Concrete registries and property sources are provided by
//! `hiwire-infrastructure` through the traits in [`ports`].

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
