//! Value Objects
//!
//! Immutable-by-convention types passed between the engine layers.

pub mod graph;
pub mod naming;
pub mod producer;
pub mod properties;
pub mod unit;

pub use graph::{Graph, Node};
pub use producer::{Artifact, Producer, ProducerArgs, ProducerFn};
pub use properties::PropertySpace;
pub use unit::{Marker, Phase, UnitDescriptor};
