//! # Hiwire
//!
//! An object-graph construction engine: configuration units declare the
//! artifacts they produce and the named artifacts each one needs; the engine
//! orders the units, binds layered, profile-aware properties into them and
//! builds every artifact exactly once into a shared registry.
//!
//! ## Example
//!
//! ```ignore
//! use hiwire::prelude::*;
//!
//! #[derive(Default)]
//! struct DataConfiguration;
//!
//! impl ConfigurationUnit for DataConfiguration {
//!     fn descriptor(&self) -> UnitDescriptor {
//!         UnitDescriptor::new("DataConfiguration", "data").with_marker(Marker::Configuration)
//!     }
//!
//!     fn producers(&self) -> Vec<Producer> {
//!         vec![Producer::new("DataSource", |_| Ok(DataSource::default()))]
//!     }
//! }
//!
//! #[hiwire::linkme::distributed_slice(CONFIGURATION_UNITS)]
//! #[linkme(crate = hiwire::linkme)]
//! static DATA: ConfigurationUnitEntry = ConfigurationUnitEntry {
//!     name: "data",
//!     description: "Data source",
//!     factory: || Box::new(DataConfiguration),
//! };
//!
//! let mut engine = Engine::new(EngineOptions::default());
//! engine.init()?;
//! let report = engine.build_registered()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, error kinds and port traits
//! - `application` - resolver, categorizer, instantiation engine, orchestrator
//! - `infrastructure` - registries, property layers, logging, `Engine`

/// Domain layer - value objects, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use hiwire_domain::*;
}

/// Application layer - build pipeline
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use hiwire_application::*;
}

/// Infrastructure layer - registries, properties and the engine
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use hiwire_infrastructure::*;
}

/// Types needed to declare and build configuration units
pub mod prelude {
    pub use hiwire_application::ports::{CONFIGURATION_UNITS, ConfigurationUnitEntry};
    pub use hiwire_application::use_cases::BuildReport;
    pub use hiwire_domain::{
        ConfigurationUnit, Error, InstanceRegistry, Marker, Producer, ProducerArgs, PropertySpace,
        Result, UnitDescriptor,
    };
    pub use hiwire_infrastructure::{Engine, EngineOptions, SystemConfiguration};
}

pub use linkme;

// Re-export commonly used types at the crate root
pub use hiwire_infrastructure::{Engine, EngineOptions};
