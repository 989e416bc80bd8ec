//! Configuration Categorizer
//!
//! Sorts configuration units into the pre/main/post buckets and applies the
//! active profile's inclusion filter.

use hiwire_domain::error::Error;
use hiwire_domain::ports::ConfigurationUnit;
use hiwire_domain::value_objects::{Phase, PropertySpace, UnitDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Profile inclusion settings (`app.profiles.*`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFilter {
    /// Whether filtering is enabled at all
    pub filter: bool,
    /// Unit names admitted while filtering is enabled
    pub include: Vec<String>,
    /// Exempt every unit from filtering (used by test runs)
    #[serde(skip)]
    pub bypass: bool,
}

impl ProfileFilter {
    /// Read the filter from the `app.profiles` section of a property space.
    /// A missing or malformed section disables filtering.
    pub fn from_properties(space: &PropertySpace) -> Self {
        space.extract("app.profiles").unwrap_or_default()
    }

    /// Exempt every unit from filtering
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }

    /// Whether a unit takes part in the build.
    ///
    /// A unit is exempt when it is context-aware OR the filter is bypassed;
    /// either condition alone is enough.
    pub fn admits(&self, descriptor: &UnitDescriptor) -> bool {
        let exempt = descriptor.is_context_aware() || self.bypass;
        !self.filter || exempt || self.include.iter().any(|name| *name == descriptor.name)
    }
}

/// A unit excluded from the build because of its markers
#[derive(Debug)]
pub struct RejectedUnit {
    /// Derived unit name
    pub name: String,
    /// Why it was rejected
    pub error: Error,
}

/// Units grouped by phase
#[derive(Default)]
pub struct Categorized {
    /// Units marked `PreConfiguration`
    pub pre: Vec<Box<dyn ConfigurationUnit>>,
    /// Units marked `Configuration`
    pub main: Vec<Box<dyn ConfigurationUnit>>,
    /// Units marked `PostConfiguration`
    pub post: Vec<Box<dyn ConfigurationUnit>>,
    /// Units without exactly one phase marker
    pub rejected: Vec<RejectedUnit>,
    /// Units left out by the profile filter
    pub filtered: Vec<String>,
}

impl Categorized {
    /// Take the bucket of a phase, leaving it empty
    pub fn take(&mut self, phase: Phase) -> Vec<Box<dyn ConfigurationUnit>> {
        match phase {
            Phase::Pre => std::mem::take(&mut self.pre),
            Phase::Main => std::mem::take(&mut self.main),
            Phase::Post => std::mem::take(&mut self.post),
        }
    }

    /// Names of the units in a phase bucket, in input order
    pub fn names(&self, phase: Phase) -> Vec<String> {
        let bucket = match phase {
            Phase::Pre => &self.pre,
            Phase::Main => &self.main,
            Phase::Post => &self.post,
        };
        bucket.iter().map(|unit| unit.descriptor().name).collect()
    }
}

/// Classifies units into build phases
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    filter: ProfileFilter,
}

impl Categorizer {
    /// Create a categorizer with a profile filter
    pub fn new(filter: ProfileFilter) -> Self {
        Self { filter }
    }

    /// Filter in use
    pub fn filter(&self) -> &ProfileFilter {
        &self.filter
    }

    /// Categorize units.
    ///
    /// Invalid units are logged and reported, never fatal to the rest.
    pub fn categorize(&self, units: Vec<Box<dyn ConfigurationUnit>>) -> Categorized {
        let mut categorized = Categorized::default();

        for unit in units {
            let descriptor = unit.descriptor();
            let phase = match descriptor.phases().as_slice() {
                [phase] => *phase,
                [] => {
                    let error = Error::invalid_configuration_type(
                        &descriptor.name,
                        "one of Configuration, PreConfiguration or PostConfiguration must be declared",
                    );
                    error!(unit = %descriptor.name, "{error}");
                    categorized.rejected.push(RejectedUnit {
                        name: descriptor.name,
                        error,
                    });
                    continue;
                }
                _ => {
                    let error = Error::invalid_configuration_type(
                        &descriptor.name,
                        "more than one phase marker declared",
                    );
                    error!(unit = %descriptor.name, "{error}");
                    categorized.rejected.push(RejectedUnit {
                        name: descriptor.name,
                        error,
                    });
                    continue;
                }
            };

            if !self.filter.admits(&descriptor) {
                debug!(unit = %descriptor.name, "excluded by active profile");
                categorized.filtered.push(descriptor.name);
                continue;
            }

            match phase {
                Phase::Pre => categorized.pre.push(unit),
                Phase::Main => categorized.main.push(unit),
                Phase::Post => categorized.post.push(unit),
            }
        }

        categorized
    }
}
