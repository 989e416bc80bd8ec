//! Configuration Unit Registry
//!
//! Compile-time registration of configuration units using `linkme`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Configuration Unit Registration                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  1. Unit defines:    #[linkme::distributed_slice(               │
//! │                          CONFIGURATION_UNITS)]                  │
//! │                      static ENTRY: ConfigurationUnitEntry = ... │
//! │                              ↓                                  │
//! │  2. Engine collects: registered_units()                         │
//! │                              ↓                                  │
//! │  3. Orchestrator builds them phase by phase                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a unit
//!
//! ```ignore
//! use hiwire_application::ports::registry::{ConfigurationUnitEntry, CONFIGURATION_UNITS};
//!
//! #[linkme::distributed_slice(CONFIGURATION_UNITS)]
//! static WEB_CONFIGURATION: ConfigurationUnitEntry = ConfigurationUnitEntry {
//!     name: "web",
//!     description: "Web server settings and router",
//!     factory: || Box::new(WebConfiguration::default()),
//! };
//! ```

pub mod units;

pub use units::{
    CONFIGURATION_UNITS, ConfigurationUnitEntry, list_configuration_units, registered_units,
};
