//! Domain Port Interfaces
//!
//! Contracts implemented by the outer layers:
//!
//! - **registry** - the shared instance store keyed by artifact name
//! - **configuration** - declarative configuration units and their producer tables

/// Configuration unit contract
pub mod configuration;
/// Instance registry contract
pub mod registry;

pub use configuration::ConfigurationUnit;
pub use registry::{InstanceRegistry, SharedRegistry};
