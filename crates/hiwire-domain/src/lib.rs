//! # Hiwire Domain
//!
//! Core types of the object-graph construction engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error kinds raised while building configuration units |
//! | [`value_objects`] | Graph nodes, unit descriptors, producers, property spaces |
//! | [`ports`] | Traits implemented by the outer layers (registry, configuration units) |
//! | [`constants`] | Names and defaults shared by every layer |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorKind, Result};
pub use ports::{ConfigurationUnit, InstanceRegistry, SharedRegistry};
pub use value_objects::{
    Artifact, Graph, Marker, Node, Phase, Producer, ProducerArgs, PropertySpace, UnitDescriptor,
};
