//! Property Layer Provider Port
//!
//! Builds the merged [`PropertySpace`] of the system configuration and of
//! each configuration unit.

use hiwire_domain::error::{Error, Result};
use hiwire_domain::value_objects::PropertySpace;
use serde_json::Value;

/// A merged property space plus the recoverable problems met while building it
#[derive(Debug, Default)]
pub struct PropertyBuild {
    /// Merged, placeholder-resolved space
    pub space: PropertySpace,
    /// Layers that were skipped, e.g. malformed files
    pub warnings: Vec<Error>,
}

impl PropertyBuild {
    /// Wrap a space without warnings
    pub fn new(space: PropertySpace) -> Self {
        Self {
            space,
            warnings: Vec::new(),
        }
    }
}

/// Source of layered properties
pub trait PropertyLayerProvider: Send + Sync {
    /// Build the system-wide space for `profile`. Later unit builds resolve
    /// placeholders against it.
    fn build_system(&self, profile: &str) -> Result<PropertyBuild>;

    /// Build the space of the unit whose property files are named `source`
    fn build(&self, source: &str, profile: &str) -> Result<PropertyBuild>;

    /// Set an ad-hoc property (highest precedence) for subsequent builds
    fn set_property(&self, key: &str, value: Value);

    /// Resolve placeholders in a template against the system space
    fn replace(&self, template: &str) -> Value;

    /// Current system-wide space
    fn system(&self) -> PropertySpace;
}
