//! Build Orchestrator
//!
//! Runs the single build pass of a process:
//!
//! ```text
//! Start → BuildSystemConfig → CategorizeUnits → BuildPhase(pre) → BuildPhase(main)
//!       → BuildPhase(post) → Ready
//! ```
//!
//! There are no retries. Per-unit problems are recovered and reported; a
//! dependency cycle aborts its phase bucket; a duplicate name aborts the
//! whole pass.

use crate::domain_services::{Categorizer, InstantiationEngine, ProfileFilter, resolve_graph};
use crate::ports::{ConfigurationStore, PropertyBuild, PropertyLayerProvider};
use crate::use_cases::build_report::{BuildReport, PhaseReport, UnitReport};
use hiwire_domain::constants::{DEFAULT_PROFILE, PROP_APP_PROFILES_ACTIVE};
use hiwire_domain::error::{Error, Result};
use hiwire_domain::ports::{ConfigurationUnit, SharedRegistry};
use hiwire_domain::value_objects::{Graph, Node, Phase, PropertySpace};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Inputs of a build pass
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Active profile
    pub profile: String,
    /// Exempt every unit from the profile filter
    pub bypass_profile_filter: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            bypass_profile_filter: false,
        }
    }
}

impl BuildOptions {
    /// Options for a profile
    pub fn with_profile<S: Into<String>>(profile: S) -> Self {
        Self {
            profile: profile.into(),
            ..Self::default()
        }
    }
}

/// Position of the orchestrator in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing built yet
    Start,
    /// Building the system-wide configuration
    BuildSystemConfig,
    /// System configuration built, units not yet categorized
    CategorizeUnits,
    /// Building a phase bucket
    BuildPhase(Phase),
    /// Pass complete
    Ready,
    /// Pass aborted by a fatal error
    Failed,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start"),
            Self::BuildSystemConfig => f.write_str("BuildSystemConfig"),
            Self::CategorizeUnits => f.write_str("CategorizeUnits"),
            Self::BuildPhase(phase) => write!(f, "Build({phase})"),
            Self::Ready => f.write_str("Ready"),
            Self::Failed => f.write_str("Failed"),
        }
    }
}

/// Sequences categorization, ordering, property building and instantiation
pub struct BuildOrchestrator {
    properties: Arc<dyn PropertyLayerProvider>,
    configurations: Arc<dyn ConfigurationStore>,
    engine: InstantiationEngine,
    state: BuildState,
    profile: String,
    filter: ProfileFilter,
    system_warnings: Vec<Error>,
}

impl BuildOrchestrator {
    /// Create an orchestrator over the given collaborators
    pub fn new(
        registry: SharedRegistry,
        properties: Arc<dyn PropertyLayerProvider>,
        configurations: Arc<dyn ConfigurationStore>,
    ) -> Self {
        Self {
            properties,
            configurations,
            engine: InstantiationEngine::new(registry),
            state: BuildState::Start,
            profile: DEFAULT_PROFILE.to_string(),
            filter: ProfileFilter::default(),
            system_warnings: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Profile filter read from the system configuration
    pub fn filter(&self) -> &ProfileFilter {
        &self.filter
    }

    /// Run the whole pass
    pub fn run(
        &mut self,
        units: Vec<Box<dyn ConfigurationUnit>>,
        options: &BuildOptions,
    ) -> Result<BuildReport> {
        self.build_system_config(options)?;
        self.build_units(units)
    }

    /// Build the system-wide property space.
    ///
    /// The active profile is published as `app.profiles.active` before the
    /// sources are read, so placeholders can refer to it.
    pub fn build_system_config(&mut self, options: &BuildOptions) -> Result<PropertySpace> {
        self.expect_state(BuildState::Start)?;
        self.state = BuildState::BuildSystemConfig;

        self.profile = if options.profile.is_empty() {
            DEFAULT_PROFILE.to_string()
        } else {
            options.profile.clone()
        };
        self.properties
            .set_property(PROP_APP_PROFILES_ACTIVE, Value::String(self.profile.clone()));

        let PropertyBuild { space, warnings } = match self.properties.build_system(&self.profile) {
            Ok(build) => build,
            Err(error) => {
                self.state = BuildState::Failed;
                return Err(error);
            }
        };
        for warning in &warnings {
            warn!(profile = %self.profile, "system configuration: {warning}");
        }
        self.system_warnings = warnings;

        self.filter =
            ProfileFilter::from_properties(&space).with_bypass(options.bypass_profile_filter);
        info!(profile = %self.profile, "system configuration built");

        self.state = BuildState::CategorizeUnits;
        Ok(space)
    }

    /// Categorize and build all units, phase by phase
    pub fn build_units(&mut self, units: Vec<Box<dyn ConfigurationUnit>>) -> Result<BuildReport> {
        self.expect_state(BuildState::CategorizeUnits)?;

        let mut categorized = Categorizer::new(self.filter.clone()).categorize(units);
        let mut report = BuildReport {
            profile: self.profile.clone(),
            system_warnings: std::mem::take(&mut self.system_warnings),
            rejected: std::mem::take(&mut categorized.rejected),
            filtered: std::mem::take(&mut categorized.filtered),
            phases: Vec::new(),
        };

        for phase in Phase::ALL {
            self.state = BuildState::BuildPhase(phase);
            let bucket = categorized.take(phase);
            match self.build_phase(phase, bucket) {
                Ok(phase_report) => report.phases.push(phase_report),
                Err(error) => {
                    error!(phase = %phase, "build aborted: {error}");
                    self.state = BuildState::Failed;
                    return Err(error);
                }
            }
        }

        self.state = BuildState::Ready;
        info!(
            profile = %report.profile,
            units = report.built_units().len(),
            artifacts = report.artifacts().len(),
            "build complete"
        );
        Ok(report)
    }

    fn build_phase(
        &self,
        phase: Phase,
        units: Vec<Box<dyn ConfigurationUnit>>,
    ) -> Result<PhaseReport> {
        let mut phase_report = PhaseReport::new(phase);
        if units.is_empty() {
            return Ok(phase_report);
        }

        let graph: Graph = units
            .iter()
            .enumerate()
            .map(|(index, unit)| {
                let descriptor = unit.descriptor();
                Node::new(index, descriptor.name, descriptor.depends_on)
            })
            .collect();

        let order = match resolve_graph(graph) {
            Ok(order) => order,
            Err(error @ Error::CircularDependency { .. }) => {
                error!(phase = %phase, "{error}");
                phase_report.aborted = Some(error);
                return Ok(phase_report);
            }
            Err(error) => return Err(error),
        };
        phase_report.order = order.iter().map(|node| node.name.clone()).collect();

        let mut slots: Vec<Option<Box<dyn ConfigurationUnit>>> =
            units.into_iter().map(Some).collect();
        for node in order {
            if let Some(unit) = slots[node.index].take() {
                phase_report.units.push(self.build_unit(unit)?);
            }
        }
        Ok(phase_report)
    }

    fn build_unit(&self, mut unit: Box<dyn ConfigurationUnit>) -> Result<UnitReport> {
        let descriptor = unit.descriptor();
        let name = descriptor.name.clone();
        info!("Auto configure {} starter on {}", name, descriptor.package);

        if self.configurations.contains(&name) {
            return Err(Error::duplicate_artifact(name));
        }

        let mut warnings = Vec::new();
        let space = match self.properties.build(&unit.property_source(), &self.profile) {
            Ok(PropertyBuild {
                space,
                warnings: skipped,
            }) => {
                for warning in &skipped {
                    warn!(unit = %name, "{warning}, falling back to defaults");
                }
                warnings.extend(skipped);
                space
            }
            Err(error) => {
                warn!(unit = %name, "failed to build properties: {error}");
                warnings.push(error);
                PropertySpace::new()
            }
        };

        if let Err(error) = unit.bind(&space) {
            warn!(unit = %name, "failed to bind properties: {error}");
            warnings.push(error);
        }

        let unit: Arc<dyn ConfigurationUnit> = Arc::from(unit);
        let instantiated = self.engine.instantiate(unit.as_ref())?;
        warnings.extend(instantiated.failures);

        self.configurations.insert(&name, unit)?;

        Ok(UnitReport {
            name,
            registered: instantiated.registered,
            reused: instantiated.reused,
            warnings,
        })
    }

    fn expect_state(&self, expected: BuildState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::internal(format!(
                "build pass is in state {}, expected {}",
                self.state, expected
            )))
        }
    }
}
