//! Configuration Store Port

use hiwire_domain::error::Result;
use hiwire_domain::ports::ConfigurationUnit;
use std::sync::Arc;

/// Bound configuration units keyed by unit name
pub trait ConfigurationStore: Send + Sync {
    /// Store a unit; fails with `DuplicateArtifactName` when the name is taken
    fn insert(&self, name: &str, unit: Arc<dyn ConfigurationUnit>) -> Result<()>;

    /// Look up a unit
    fn get(&self, name: &str) -> Option<Arc<dyn ConfigurationUnit>>;

    /// Whether a unit of that name is stored
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Stored unit names, sorted
    fn names(&self) -> Vec<String>;

    /// Drop every unit
    fn clear(&self);
}
