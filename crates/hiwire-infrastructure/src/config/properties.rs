//! Property Layer Builder
//!
//! Merges the property layers of one build into a single [`PropertySpace`].
//! Sources are merged in this order (later sources override earlier):
//!
//! 1. `SystemConfiguration::default()` (system build) or the system space (unit builds)
//! 2. `<base>.<ext>` in the config directory
//! 3. `<base>-<profile>.<ext>`
//! 4. Environment variables with prefix (e.g., `HIWIRE__SERVER__PORT`)
//! 5. Ad-hoc properties set through [`PropertyLayerBuilder::set_property`]
//!
//! Placeholders are resolved once the layers are merged.

use crate::config::placeholder::{PlaceholderResolver, resolve_self, resolve_space};
use crate::config::types::SystemConfiguration;
use crate::constants::{
    APPLICATION_BASE_NAME, APPLICATION_CONFIG_DIR, CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR,
    DEFAULT_CONFIG_DIR, PROPERTY_FILE_EXTENSIONS,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_property_source, log_skipped_layer};
use figment::Figment;
use figment::providers::{Env, Format, Toml, Yaml};
use hiwire_application::ports::{PropertyBuild, PropertyLayerProvider};
use hiwire_domain::error::{Error, Result};
use hiwire_domain::value_objects::PropertySpace;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Builder state shared between builds
#[derive(Debug, Default)]
struct LayerState {
    custom: PropertySpace,
    system: PropertySpace,
}

/// File, environment and ad-hoc property layers
#[derive(Debug)]
pub struct PropertyLayerBuilder {
    config_dir: PathBuf,
    base_name: String,
    env_prefix: String,
    state: RwLock<LayerState>,
}

impl Default for PropertyLayerBuilder {
    fn default() -> Self {
        Self::new(Self::discover_config_dir())
    }
}

impl PropertyLayerBuilder {
    /// Create a builder reading property files from `config_dir`
    pub fn new<P: Into<PathBuf>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.into(),
            base_name: APPLICATION_BASE_NAME.to_string(),
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            state: RwLock::new(LayerState::default()),
        }
    }

    /// Set the base name of the system property files
    pub fn with_base_name<S: Into<String>>(mut self, base_name: S) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Directory property files are read from
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// `./config` when it exists, else `<platform config dir>/hiwire` when it
    /// exists, else `./config`
    pub fn discover_config_dir() -> PathBuf {
        let local = env::current_dir()
            .map(|dir| dir.join(DEFAULT_CONFIG_DIR))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
        if local.is_dir() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join(APPLICATION_CONFIG_DIR))
            .filter(|dir| dir.is_dir())
            .unwrap_or(local)
    }

    /// Build the system space for `profile` and keep it for later unit builds
    pub fn build_system_space(&self, profile: &str) -> Result<PropertyBuild> {
        let defaults = PropertySpace::from_serializable(&SystemConfiguration::default())?;
        let mut build = self.build_layers(defaults, &self.base_name, profile);
        resolve_self(&mut build.space);

        self.write_state().system = build.space.clone();
        Ok(build)
    }

    /// Build the space of the unit whose files are named `source`
    pub fn build_unit_space(&self, source: &str, profile: &str) -> PropertyBuild {
        let system = self.read_state().system.clone();
        let mut build = self.build_layers(system.clone(), source, profile);
        resolve_space(&mut build.space, &system);
        build
    }

    /// Set an ad-hoc property for subsequent builds.
    ///
    /// Also applied to the current system space, so [`replace`](Self::replace)
    /// sees it without a rebuild.
    pub fn set_property<V: Into<Value>>(&self, key: &str, value: V) -> &Self {
        let value = value.into();
        let mut state = self.write_state();
        state.custom.set(key, value.clone());
        state.system.set(key, value);
        self
    }

    /// Current value of a dotted key in the system space
    pub fn get_property(&self, key: &str) -> Option<Value> {
        self.read_state().system.get(key).cloned()
    }

    /// Resolve placeholders in `template` against the system space
    pub fn replace(&self, template: &str) -> Value {
        let state = self.read_state();
        PlaceholderResolver::new(&state.system, &state.system).resolve(template)
    }

    /// Write `space` to `path` as YAML (`.yml`, `.yaml`) or TOML (`.toml`)
    pub fn save<P: AsRef<Path>>(space: &PropertySpace, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match extension(path).as_deref() {
            Some("yml" | "yaml") => serde_yaml::to_string(space.as_value())
                .config_context("Failed to serialize properties to YAML")?,
            Some("toml") => toml::to_string_pretty(space.as_value())
                .config_context("Failed to serialize properties to TOML")?,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "Unsupported property file format: {}",
                    path.display()
                )));
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .io_context(format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, content)
            .io_context(format!("Failed to write property file {}", path.display()))
    }

    fn build_layers(&self, base: PropertySpace, name: &str, profile: &str) -> PropertyBuild {
        let mut build = PropertyBuild::new(base);

        let mut names = vec![name.to_string()];
        if !profile.is_empty() {
            names.push(format!("{name}-{profile}"));
        }
        for file_name in names {
            for ext in PROPERTY_FILE_EXTENSIONS {
                let path = self.config_dir.join(format!("{file_name}.{ext}"));
                match read_property_file(&path) {
                    Ok(Some(layer)) => build.space.merge(&layer),
                    Ok(None) => {}
                    Err(error) => {
                        log_skipped_layer(&error);
                        build.warnings.push(error);
                    }
                }
            }
        }

        match self.env_layer() {
            Ok(layer) => build.space.merge(&layer),
            Err(error) => {
                log_skipped_layer(&error);
                build.warnings.push(error);
            }
        }

        build.space.merge(&self.read_state().custom);
        build
    }

    fn env_layer(&self) -> Result<PropertySpace> {
        let prefix = format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR);
        let value: Value = Figment::from(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR))
            .extract()
            .context("Failed to read environment properties")?;
        Ok(PropertySpace::from_value(value))
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, LayerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, LayerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PropertyLayerProvider for PropertyLayerBuilder {
    fn build_system(&self, profile: &str) -> Result<PropertyBuild> {
        self.build_system_space(profile)
    }

    fn build(&self, source: &str, profile: &str) -> Result<PropertyBuild> {
        Ok(self.build_unit_space(source, profile))
    }

    fn set_property(&self, key: &str, value: Value) {
        PropertyLayerBuilder::set_property(self, key, value);
    }

    fn replace(&self, template: &str) -> Value {
        PropertyLayerBuilder::replace(self, template)
    }

    fn system(&self) -> PropertySpace {
        self.read_state().system.clone()
    }
}

/// Read one property file. `Ok(None)` when the file is absent or empty.
fn read_property_file(path: &Path) -> Result<Option<PropertySpace>> {
    if !path.is_file() {
        log_property_source(path, false);
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .io_context(format!("Failed to read property file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let figment = match extension(path).as_deref() {
        Some("toml") => Figment::from(Toml::string(&content)),
        _ => Figment::from(Yaml::string(&content)),
    };
    let value: Value = figment.extract().parse_context(path)?;
    log_property_source(path, true);
    Ok(Some(PropertySpace::from_value(value)))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
