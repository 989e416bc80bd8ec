//! Registries
//!
//! | Registry | Keyed by | Holds |
//! |----------|----------|-------|
//! | [`ConcurrentInstanceRegistry`] | artifact name | constructed artifacts |
//! | [`ConfigurationRegistry`] | unit name | bound configuration units |
//!
//! Both are `DashMap`-backed: lookups from request handling code never block
//! each other, and writes to the same name are serialized by the entry API.

pub mod configurations;
pub mod instances;

pub use configurations::ConfigurationRegistry;
pub use instances::ConcurrentInstanceRegistry;
