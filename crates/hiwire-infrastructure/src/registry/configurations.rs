//! Configuration registry

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use hiwire_application::ports::ConfigurationStore;
use hiwire_domain::error::{Error, Result};
use hiwire_domain::ports::ConfigurationUnit;
use std::sync::Arc;

/// Bound configuration units by name
#[derive(Default)]
pub struct ConfigurationRegistry {
    units: DashMap<String, Arc<dyn ConfigurationUnit>>,
}

impl ConfigurationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed lookup; `None` when absent or of another type
    pub fn get_as<T: ConfigurationUnit>(&self, name: &str) -> Option<Arc<T>> {
        self.get(name).and_then(|unit| unit.downcast_arc::<T>().ok())
    }
}

impl ConfigurationStore for ConfigurationRegistry {
    fn insert(&self, name: &str, unit: Arc<dyn ConfigurationUnit>) -> Result<()> {
        match self.units.entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::duplicate_artifact(name)),
            Entry::Vacant(vacant) => {
                vacant.insert(unit);
                Ok(())
            }
        }
    }

    fn get(&self, name: &str) -> Option<Arc<dyn ConfigurationUnit>> {
        self.units.get(name).map(|unit| Arc::clone(unit.value()))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.units.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    fn clear(&self) {
        self.units.clear();
    }
}
