//! Application Ports
//!
//! Contracts the application layer needs from the outside world:
//!
//! - **properties** - layered property sources per configuration unit
//! - **configurations** - the store of bound configuration units
//! - **registry** - compile-time registration of configuration units

pub mod configurations;
pub mod properties;
pub mod registry;

pub use configurations::ConfigurationStore;
pub use properties::{PropertyBuild, PropertyLayerProvider};
pub use registry::{
    CONFIGURATION_UNITS, ConfigurationUnitEntry, list_configuration_units, registered_units,
};
