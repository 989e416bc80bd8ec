//! Configuration unit metadata
//!
//! Units declare their build phase and capabilities through static markers
//! instead of embedding marker types.

use super::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse ordering bucket applied before per-unit dependency resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Built before every other unit
    Pre,
    /// Regular units
    Main,
    /// Built after every other unit
    Post,
}

impl Phase {
    /// All phases in build order
    pub const ALL: [Phase; 3] = [Phase::Pre, Phase::Main, Phase::Post];

    /// Lower-case phase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Main => "main",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability marker declared by a configuration unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Build in the pre phase
    PreConfiguration,
    /// Build in the main phase
    Configuration,
    /// Build in the post phase
    PostConfiguration,
    /// Exempt from the active-profile inclusion filter
    ContextAware,
}

impl Marker {
    /// The phase this marker selects, if it is a phase marker
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::PreConfiguration => Some(Phase::Pre),
            Self::Configuration => Some(Phase::Main),
            Self::PostConfiguration => Some(Phase::Post),
            Self::ContextAware => None,
        }
    }
}

/// Static description of a configuration unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    /// Derived unit name (see [`naming::unit_name`])
    pub name: String,
    /// Declared type name, e.g. `WebConfiguration`
    pub type_name: String,
    /// Package the unit belongs to
    pub package: String,
    /// Declared markers
    pub markers: Vec<Marker>,
    /// Names of other units this unit must be built after
    pub depends_on: Vec<String>,
}

impl UnitDescriptor {
    /// Describe a unit; the name is derived from `type_name` and `package`
    pub fn new<T: Into<String>, P: Into<String>>(type_name: T, package: P) -> Self {
        let type_name = type_name.into();
        let package = package.into();
        Self {
            name: naming::unit_name(&type_name, &package),
            type_name,
            package,
            markers: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    /// Add a marker
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Declare a dependency on another unit
    pub fn depends_on<S: Into<String>>(mut self, unit: S) -> Self {
        self.depends_on.push(unit.into());
        self
    }

    /// Phase markers declared by the unit
    pub fn phases(&self) -> Vec<Phase> {
        self.markers.iter().filter_map(Marker::phase).collect()
    }

    /// Whether the unit is exempt from profile filtering
    pub fn is_context_aware(&self) -> bool {
        self.markers.contains(&Marker::ContextAware)
    }
}
