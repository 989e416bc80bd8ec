//! Use Cases
//!
//! Application services composing the domain services into the build pass.

pub mod build_orchestrator;
pub mod build_report;

pub use build_orchestrator::{BuildOptions, BuildOrchestrator, BuildState};
pub use build_report::{BuildReport, PhaseReport, UnitReport};
