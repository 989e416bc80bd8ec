//! Instance registry port
//!
//! The registry is the only structure shared with the rest of the process
//! after startup: many concurrent readers, serialized writers.

use crate::error::Result;
use crate::value_objects::Artifact;
use std::any::Any;
use std::sync::Arc;

/// Shared mapping from artifact name to constructed value
pub trait InstanceRegistry: Send + Sync {
    /// Look up an artifact
    fn get(&self, name: &str) -> Option<Artifact>;

    /// Store an artifact that no configuration unit owns.
    ///
    /// Fails with `DuplicateArtifactName` when the name is already taken.
    fn set(&self, name: &str, value: Artifact) -> Result<()>;

    /// Store an artifact produced by the unit `owner`.
    ///
    /// Fails with `DuplicateArtifactName` when the name is already taken;
    /// the first registration stays readable.
    fn register(&self, name: &str, owner: &str, value: Artifact) -> Result<()>;

    /// Unit that produced the artifact, `None` for unowned or absent names
    fn owner(&self, name: &str) -> Option<String>;

    /// Whether the name is taken
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All registered names, sorted
    fn names(&self) -> Vec<String>;

    /// Number of registered artifacts
    fn len(&self) -> usize;

    /// Whether the registry is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every artifact
    fn clear(&self);
}

/// Reference-counted registry handle passed between the engine layers
pub type SharedRegistry = Arc<dyn InstanceRegistry>;

impl dyn InstanceRegistry + '_ {
    /// Typed lookup; `None` when absent or of another type
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get(name)
            .and_then(|value| Arc::downcast::<T>(value).ok())
    }
}
