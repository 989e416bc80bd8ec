//! Engine Bootstrap - Composition Root
//!
//! Wires the concrete registries and the property layer builder into the
//! build orchestrator, and owns the engine lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! EngineOptions → Engine::new ─► init() ─► build(units) ─► Ready ─► teardown()
//!                                 │            │
//!                    system configuration   BuildOrchestrator
//!                    + logging              (categorize, order, bind, instantiate)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut engine = Engine::new(EngineOptions::default().with_profile("local"));
//! engine.init()?;
//! let report = engine.build_registered()?;
//!
//! let data_source = engine.get_instance_as::<DataSource>("dataSource");
//! ```

use crate::config::{PropertyLayerBuilder, SystemConfiguration};
use crate::logging::init_logging;
use crate::registry::{ConcurrentInstanceRegistry, ConfigurationRegistry};
use hiwire_application::ports::{ConfigurationStore, registered_units};
use hiwire_application::use_cases::{BuildOptions, BuildOrchestrator, BuildReport};
use hiwire_domain::constants::{
    DEFAULT_PROFILE, ENV_APP_PROFILES_ACTIVE, SYSTEM_CONFIGURATION_INSTANCE,
    SYSTEM_CONFIGURATION_NAME,
};
use hiwire_domain::error::{Error, Result};
use hiwire_domain::ports::{ConfigurationUnit, InstanceRegistry, SharedRegistry};
use hiwire_domain::value_objects::Artifact;
use serde_json::Value;
use std::any::Any;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Engine settings
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Property file directory; discovered when unset
    pub config_dir: Option<PathBuf>,
    /// Active profile; `APP_PROFILES_ACTIVE` or `default` when unset
    pub profile: Option<String>,
    /// Exempt every unit from the profile filter
    pub bypass_profile_filter: bool,
    /// Install the global tracing subscriber during `init`
    pub init_logging: bool,
    /// Force JSON log output regardless of `logging.json_format`
    pub json_logs: bool,
}

impl EngineOptions {
    /// Set the property file directory
    pub fn with_config_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Set the active profile
    pub fn with_profile<S: Into<String>>(mut self, profile: S) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Exempt every unit from the profile filter
    pub fn bypass_profile_filter(mut self) -> Self {
        self.bypass_profile_filter = true;
        self
    }

    /// Install logging during `init`
    pub fn with_logging(mut self, json: bool) -> Self {
        self.init_logging = true;
        self.json_logs = json;
        self
    }

    /// Explicit profile, else `APP_PROFILES_ACTIVE`, else `default`
    pub fn resolve_profile(&self) -> String {
        self.profile
            .clone()
            .filter(|profile| !profile.is_empty())
            .or_else(|| {
                env::var(ENV_APP_PROFILES_ACTIVE)
                    .ok()
                    .filter(|profile| !profile.is_empty())
            })
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }
}

/// Lifecycle stage of an [`Engine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, nothing built
    Created,
    /// System configuration built
    Initialized,
    /// Units built
    Built,
    /// Registries cleared
    TornDown,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Initialized => "initialized",
            Self::Built => "built",
            Self::TornDown => "torn down",
        };
        f.write_str(name)
    }
}

/// Object-graph construction engine
///
/// One engine performs one build pass. The instance registry outlives the
/// pass and is handed to the rest of the process through
/// [`registry`](Engine::registry).
pub struct Engine {
    options: EngineOptions,
    profile: String,
    state: EngineState,
    instances: Arc<ConcurrentInstanceRegistry>,
    configurations: Arc<ConfigurationRegistry>,
    properties: Arc<PropertyLayerBuilder>,
    orchestrator: BuildOrchestrator,
    system: Option<Arc<SystemConfiguration>>,
}

impl Engine {
    /// Create an engine; nothing is read until [`init`](Engine::init)
    pub fn new(options: EngineOptions) -> Self {
        let properties = Arc::new(match &options.config_dir {
            Some(dir) => PropertyLayerBuilder::new(dir.clone()),
            None => PropertyLayerBuilder::default(),
        });
        let instances = Arc::new(ConcurrentInstanceRegistry::new());
        let configurations = Arc::new(ConfigurationRegistry::new());
        let orchestrator = BuildOrchestrator::new(
            instances.clone(),
            properties.clone(),
            configurations.clone(),
        );

        Self {
            profile: options.resolve_profile(),
            options,
            state: EngineState::Created,
            instances,
            configurations,
            properties,
            orchestrator,
            system: None,
        }
    }

    /// Current lifecycle stage
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Active profile
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Build the system configuration, then install logging if requested.
    ///
    /// The system configuration is registered as configuration `system` and
    /// as instance `systemConfiguration`.
    pub fn init(&mut self) -> Result<Arc<SystemConfiguration>> {
        self.expect_state(EngineState::Created, "init")?;

        let space = self.orchestrator.build_system_config(&self.build_options())?;
        let system = match SystemConfiguration::from_properties(&space) {
            Ok(system) => system,
            Err(error) => {
                warn!("failed to bind system configuration, using defaults: {error}");
                SystemConfiguration::default()
            }
        };
        let system = Arc::new(system);

        self.configurations.insert(
            SYSTEM_CONFIGURATION_NAME,
            system.clone() as Arc<dyn ConfigurationUnit>,
        )?;
        self.instances
            .set(SYSTEM_CONFIGURATION_INSTANCE, system.clone() as Artifact)?;

        if self.options.init_logging {
            let mut logging = system.logging.clone();
            logging.json_format |= self.options.json_logs;
            init_logging(&logging)?;
        }

        info!(
            profile = %self.profile,
            app = %system.app.name,
            config_dir = %self.properties.config_dir().display(),
            "engine initialized"
        );
        self.system = Some(system.clone());
        self.state = EngineState::Initialized;
        Ok(system)
    }

    /// Build the given units. Runs at most once per engine.
    pub fn build(&mut self, units: Vec<Box<dyn ConfigurationUnit>>) -> Result<BuildReport> {
        self.expect_state(EngineState::Initialized, "build")?;
        let report = self.orchestrator.build_units(units)?;
        self.state = EngineState::Built;
        Ok(report)
    }

    /// Build every unit registered in `CONFIGURATION_UNITS`
    pub fn build_registered(&mut self) -> Result<BuildReport> {
        self.build(registered_units())
    }

    /// Drop every artifact and configuration
    pub fn teardown(&mut self) {
        self.instances.clear();
        self.configurations.clear();
        self.system = None;
        self.state = EngineState::TornDown;
        info!("engine torn down");
    }

    /// Shared instance registry
    pub fn registry(&self) -> SharedRegistry {
        self.instances.clone()
    }

    /// Look up an artifact
    pub fn get_instance(&self, name: &str) -> Option<Artifact> {
        self.instances.get(name)
    }

    /// Typed artifact lookup
    pub fn get_instance_as<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let registry: &dyn InstanceRegistry = &*self.instances;
        registry.get_as::<T>(name)
    }

    /// Store an artifact nobody produced; fails when the name is taken
    pub fn set_instance<T: Any + Send + Sync>(&self, name: &str, value: T) -> Result<()> {
        self.instances.set(name, Arc::new(value))
    }

    /// Bound configuration unit
    pub fn configuration(&self, name: &str) -> Option<Arc<dyn ConfigurationUnit>> {
        self.configurations.get(name)
    }

    /// Typed configuration unit lookup
    pub fn configuration_as<T: ConfigurationUnit>(&self, name: &str) -> Option<Arc<T>> {
        self.configurations.get_as::<T>(name)
    }

    /// System configuration, once `init` has run
    pub fn system_configuration(&self) -> Option<Arc<SystemConfiguration>> {
        self.system.clone()
    }

    /// Set an ad-hoc property; takes precedence over every file and the
    /// environment in builds that follow
    pub fn set_property<V: Into<Value>>(&self, key: &str, value: V) -> &Self {
        self.properties.set_property(key, value);
        self
    }

    /// Resolve placeholders against the system properties
    pub fn replace(&self, template: &str) -> Value {
        self.properties.replace(template)
    }

    /// Property layer builder in use
    pub fn properties(&self) -> &PropertyLayerBuilder {
        &self.properties
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            profile: self.profile.clone(),
            bypass_profile_filter: self.options.bypass_profile_filter,
        }
    }

    fn expect_state(&self, expected: EngineState, operation: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::internal(format!(
                "cannot {operation}: engine is {}, expected {expected}",
                self.state
            )))
        }
    }
}
