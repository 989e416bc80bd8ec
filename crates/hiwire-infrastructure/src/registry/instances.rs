//! Instance registry

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use hiwire_domain::error::{Error, Result};
use hiwire_domain::ports::InstanceRegistry;
use hiwire_domain::value_objects::Artifact;
use tracing::debug;

struct Slot {
    owner: Option<String>,
    value: Artifact,
}

/// Set-once mapping from artifact name to value
#[derive(Default)]
pub struct ConcurrentInstanceRegistry {
    slots: DashMap<String, Slot>,
}

impl ConcurrentInstanceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, name: &str, owner: Option<&str>, value: Artifact) -> Result<()> {
        match self.slots.entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::duplicate_artifact(name)),
            Entry::Vacant(vacant) => {
                vacant.insert(Slot {
                    owner: owner.map(str::to_string),
                    value,
                });
                debug!(artifact = name, owner = owner.unwrap_or("-"), "instance stored");
                Ok(())
            }
        }
    }
}

impl InstanceRegistry for ConcurrentInstanceRegistry {
    fn get(&self, name: &str) -> Option<Artifact> {
        self.slots.get(name).map(|slot| slot.value.clone())
    }

    fn set(&self, name: &str, value: Artifact) -> Result<()> {
        self.insert(name, None, value)
    }

    fn register(&self, name: &str, owner: &str, value: Artifact) -> Result<()> {
        self.insert(name, Some(owner), value)
    }

    fn owner(&self, name: &str) -> Option<String> {
        self.slots.get(name).and_then(|slot| slot.owner.clone())
    }

    fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn clear(&self) {
        self.slots.clear();
    }
}
