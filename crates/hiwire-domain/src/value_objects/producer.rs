//! Producer operations
//!
//! A [`Producer`] is one entry of a unit's statically declared provider
//! table: the artifact name it registers, the named artifacts it consumes,
//! and the function that builds it.

use super::naming;
use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A constructed value owned by the instance registry
pub type Artifact = Arc<dyn Any + Send + Sync>;

/// Type-erased producer function
pub type ProducerFn = Arc<dyn Fn(&ProducerArgs) -> Result<Artifact> + Send + Sync>;

/// Factory-style operation producing one named artifact
#[derive(Clone)]
pub struct Producer {
    operation: String,
    name: String,
    params: Vec<String>,
    overrides: Vec<String>,
    factory: ProducerFn,
}

impl Producer {
    /// Declare a producer for `operation`; the artifact is registered under
    /// the lower-camel form of the operation name.
    pub fn new<F, T>(operation: &str, factory: F) -> Self
    where
        F: Fn(&ProducerArgs) -> Result<T> + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        Self::from_artifact(operation, move |args| {
            factory(args).map(|value| Arc::new(value) as Artifact)
        })
    }

    /// Declare a producer whose function already returns a shared [`Artifact`]
    pub fn from_artifact<F>(operation: &str, factory: F) -> Self
    where
        F: Fn(&ProducerArgs) -> Result<Artifact> + Send + Sync + 'static,
    {
        Self {
            operation: operation.to_string(),
            name: naming::to_lower_camel(operation),
            params: Vec::new(),
            overrides: Vec::new(),
            factory: Arc::new(factory),
        }
    }

    /// Declare a parameter by its type name (`DataSource` → `dataSource`)
    pub fn with_param(mut self, type_name: &str) -> Self {
        self.params.push(naming::to_lower_camel(type_name));
        self
    }

    /// Override parameter names position by position with explicit
    /// dependency names
    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides = names.into_iter().map(Into::into).collect();
        self
    }

    /// Declared operation name
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Artifact name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective dependency names, overrides taking precedence
    pub fn dependencies(&self) -> Vec<String> {
        let arity = self.params.len().max(self.overrides.len());
        (0..arity)
            .filter_map(|i| self.overrides.get(i).or_else(|| self.params.get(i)).cloned())
            .collect()
    }

    /// Invoke the producer
    pub fn invoke(&self, args: &ProducerArgs) -> Result<Artifact> {
        (self.factory)(args)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("operation", &self.operation)
            .field("name", &self.name)
            .field("dependencies", &self.dependencies())
            .finish_non_exhaustive()
    }
}

/// Resolved arguments handed to a producer.
///
/// A `None` slot is the zero value for a dependency that could not be
/// resolved.
#[derive(Clone, Default)]
pub struct ProducerArgs {
    artifact: String,
    names: Vec<String>,
    values: Vec<Option<Artifact>>,
}

impl ProducerArgs {
    /// Create arguments for the artifact `artifact`
    pub fn new<S: Into<String>>(artifact: S) -> Self {
        Self {
            artifact: artifact.into(),
            names: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append one resolved (or missing) argument
    pub fn push<S: Into<String>>(&mut self, name: S, value: Option<Artifact>) {
        self.names.push(name.into());
        self.values.push(value);
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether argument `index` was resolved
    pub fn is_present(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    /// Raw argument
    pub fn artifact(&self, index: usize) -> Option<Artifact> {
        self.values.get(index).cloned().flatten()
    }

    /// Typed argument; `None` when missing or of another type
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
        self.artifact(index)
            .and_then(|value| Arc::downcast::<T>(value).ok())
    }

    /// Typed argument, failing with `MissingDependency` when absent
    pub fn require<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        self.get(index).ok_or_else(|| {
            let dependency = self
                .names
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("#{index}"));
            Error::missing_dependency(self.artifact.clone(), dependency)
        })
    }
}
