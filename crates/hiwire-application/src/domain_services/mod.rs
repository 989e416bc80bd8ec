//! Domain Services
//!
//! Stateless algorithms of the build pipeline.

pub mod categorizer;
pub mod dependency;
pub mod instantiation;

pub use categorizer::{Categorized, Categorizer, ProfileFilter, RejectedUnit};
pub use dependency::{describe_graph, resolve_graph};
pub use instantiation::{InstantiationEngine, InstantiationReport};
