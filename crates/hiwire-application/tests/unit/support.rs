//! In-memory doubles shared by the application tests

use hiwire_application::ports::{ConfigurationStore, PropertyBuild, PropertyLayerProvider};
use hiwire_domain::ports::{ConfigurationUnit, InstanceRegistry};
use hiwire_domain::value_objects::{Artifact, Marker, Producer, PropertySpace, UnitDescriptor};
use hiwire_domain::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// Registry backed by a `RwLock<HashMap>`
#[derive(Default)]
pub struct MemoryRegistry {
    entries: RwLock<HashMap<String, (Option<String>, Artifact)>>,
}

impl MemoryRegistry {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn insert(&self, name: &str, owner: Option<&str>, value: Artifact) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(name) {
            return Err(Error::duplicate_artifact(name));
        }
        entries.insert(name.to_string(), (owner.map(str::to_string), value));
        Ok(())
    }
}

impl InstanceRegistry for MemoryRegistry {
    fn get(&self, name: &str) -> Option<Artifact> {
        self.entries.read().unwrap().get(name).map(|(_, v)| v.clone())
    }

    fn set(&self, name: &str, value: Artifact) -> Result<()> {
        self.insert(name, None, value)
    }

    fn register(&self, name: &str, owner: &str, value: Artifact) -> Result<()> {
        self.insert(name, Some(owner), value)
    }

    fn owner(&self, name: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap()
            .get(name)
            .and_then(|(owner, _)| owner.clone())
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

/// Property provider serving fixed spaces per source name
#[derive(Default)]
pub struct StaticProperties {
    pub system: Mutex<PropertySpace>,
    pub sources: HashMap<String, PropertySpace>,
    pub warnings: HashMap<String, String>,
    pub failing: Vec<String>,
    pub custom: Mutex<PropertySpace>,
    pub built: Mutex<Vec<(String, String)>>,
}

impl StaticProperties {
    pub fn with_system(mut self, system: Value) -> Self {
        self.system = Mutex::new(PropertySpace::from_value(system));
        self
    }

    pub fn with_source(mut self, name: &str, space: Value) -> Self {
        self.sources
            .insert(name.to_string(), PropertySpace::from_value(space));
        self
    }

    pub fn with_warning(mut self, name: &str, message: &str) -> Self {
        self.warnings.insert(name.to_string(), message.to_string());
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    pub fn built(&self) -> Vec<(String, String)> {
        self.built.lock().unwrap().clone()
    }
}

impl PropertyLayerProvider for StaticProperties {
    fn build_system(&self, _profile: &str) -> Result<PropertyBuild> {
        let mut space = self.system.lock().unwrap().clone();
        space.merge(&self.custom.lock().unwrap());
        *self.system.lock().unwrap() = space.clone();
        Ok(PropertyBuild::new(space))
    }

    fn build(&self, source: &str, profile: &str) -> Result<PropertyBuild> {
        self.built
            .lock()
            .unwrap()
            .push((source.to_string(), profile.to_string()));
        if self.failing.iter().any(|name| name == source) {
            return Err(Error::configuration(format!("cannot read {source}")));
        }
        let mut build = PropertyBuild::new(self.sources.get(source).cloned().unwrap_or_default());
        if let Some(message) = self.warnings.get(source) {
            build
                .warnings
                .push(Error::property_source_parse(format!("{source}.yml"), message.clone()));
        }
        Ok(build)
    }

    fn set_property(&self, key: &str, value: Value) {
        self.custom.lock().unwrap().set(key, value);
    }

    fn replace(&self, template: &str) -> Value {
        Value::String(template.to_string())
    }

    fn system(&self) -> PropertySpace {
        self.system.lock().unwrap().clone()
    }
}

/// Configuration store backed by a `RwLock<HashMap>`
#[derive(Default)]
pub struct MemoryStore {
    units: RwLock<HashMap<String, Arc<dyn ConfigurationUnit>>>,
}

impl ConfigurationStore for MemoryStore {
    fn insert(&self, name: &str, unit: Arc<dyn ConfigurationUnit>) -> Result<()> {
        let mut units = self.units.write().unwrap();
        if units.contains_key(name) {
            return Err(Error::duplicate_artifact(name));
        }
        units.insert(name.to_string(), unit);
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Arc<dyn ConfigurationUnit>> {
        self.units.read().unwrap().get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.units.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    fn clear(&self) {
        self.units.write().unwrap().clear();
    }
}

/// Configurable unit used across the tests
#[derive(Clone)]
pub struct TestUnit {
    pub descriptor: UnitDescriptor,
    pub producers: Vec<Producer>,
    pub bound: Option<PropertySpace>,
    pub fail_bind: bool,
}

impl TestUnit {
    pub fn new(type_name: &str) -> Self {
        Self {
            descriptor: UnitDescriptor::new(type_name, "app"),
            producers: Vec::new(),
            bound: None,
            fail_bind: false,
        }
    }

    /// A `Configuration`-marked unit
    pub fn main(type_name: &str) -> Self {
        Self::new(type_name).marker(Marker::Configuration)
    }

    pub fn package(mut self, package: &str) -> Self {
        self.descriptor = UnitDescriptor {
            name: hiwire_domain::value_objects::naming::unit_name(
                &self.descriptor.type_name,
                package,
            ),
            package: package.to_string(),
            ..self.descriptor
        };
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.descriptor = self.descriptor.with_marker(marker);
        self
    }

    pub fn after(mut self, unit: &str) -> Self {
        self.descriptor = self.descriptor.depends_on(unit);
        self
    }

    pub fn producer(mut self, producer: Producer) -> Self {
        self.producers.push(producer);
        self
    }

    pub fn failing_bind(mut self) -> Self {
        self.fail_bind = true;
        self
    }

    pub fn boxed(self) -> Box<dyn ConfigurationUnit> {
        Box::new(self)
    }
}

impl ConfigurationUnit for TestUnit {
    fn descriptor(&self) -> UnitDescriptor {
        self.descriptor.clone()
    }

    fn bind(&mut self, properties: &PropertySpace) -> Result<()> {
        if self.fail_bind {
            return Err(Error::configuration("bind rejected"));
        }
        self.bound = Some(properties.clone());
        Ok(())
    }

    fn producers(&self) -> Vec<Producer> {
        self.producers.clone()
    }
}
