//! Instantiation Engine
//!
//! Walks a unit's producer table, resolves each producer's dependencies
//! against the instance registry (building same-unit producers depth-first
//! when needed), invokes the producer and registers the result.
//!
//! Every artifact name is constructed at most once: a name already present
//! in the registry is reused, never rebuilt.

use hiwire_domain::constants::RESERVED_INITIALIZER;
use hiwire_domain::error::{Error, Result};
use hiwire_domain::ports::{ConfigurationUnit, SharedRegistry};
use hiwire_domain::value_objects::naming::{package_prefixed, qualify};
use hiwire_domain::value_objects::{Artifact, Producer, ProducerArgs, UnitDescriptor};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Outcome of instantiating one unit
#[derive(Debug, Default)]
pub struct InstantiationReport {
    /// Unit name
    pub unit: String,
    /// Artifacts constructed and registered by this call
    pub registered: Vec<String>,
    /// Artifacts that already existed and were reused
    pub reused: Vec<String>,
    /// Recovered failures: missing dependencies and producer errors
    pub failures: Vec<Error>,
}

/// Per-unit resolution state
struct UnitScope {
    descriptor: UnitDescriptor,
    producers: Vec<Producer>,
    table: HashMap<String, usize>,
    visiting: HashSet<String>,
    failed: HashSet<String>,
    report: InstantiationReport,
}

/// Builds artifacts from producer tables into the instance registry
#[derive(Clone)]
pub struct InstantiationEngine {
    registry: SharedRegistry,
}

impl InstantiationEngine {
    /// Create an engine writing into `registry`
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Registry the engine writes into
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Instantiate every producer of `unit`.
    ///
    /// Each producer is attempted independently; failures are logged and
    /// collected in the report.
    ///
    /// # Errors
    ///
    /// `DuplicateArtifactName` when a producer's name is already owned by
    /// another unit.
    pub fn instantiate(&self, unit: &dyn ConfigurationUnit) -> Result<InstantiationReport> {
        let descriptor = unit.descriptor();
        let mut producers = Vec::new();
        let mut table = HashMap::new();

        for producer in unit.producers() {
            if producer.name() == RESERVED_INITIALIZER {
                continue;
            }
            if table.contains_key(producer.name()) {
                warn!(
                    unit = %descriptor.name,
                    artifact = producer.name(),
                    "producer declared twice, keeping the first"
                );
                continue;
            }
            table.insert(producer.name().to_string(), producers.len());
            producers.push(producer);
        }

        let mut scope = UnitScope {
            report: InstantiationReport {
                unit: descriptor.name.clone(),
                ..InstantiationReport::default()
            },
            descriptor,
            producers,
            table,
            visiting: HashSet::new(),
            failed: HashSet::new(),
        };

        for index in 0..scope.producers.len() {
            self.resolve_producer(&mut scope, index)?;
        }

        Ok(scope.report)
    }

    fn resolve_producer(&self, scope: &mut UnitScope, index: usize) -> Result<Option<Artifact>> {
        let producer = scope.producers[index].clone();
        let name = producer.name().to_string();
        let unit_name = scope.descriptor.name.clone();

        if let Some(existing) = self.registry.get(&name) {
            return match self.registry.owner(&name) {
                Some(owner) if owner != unit_name => {
                    let error = Error::duplicate_artifact(&name);
                    tracing::error!(unit = %unit_name, owner = %owner, "{error}");
                    Err(error)
                }
                _ => {
                    if !scope.report.registered.contains(&name) && !scope.report.reused.contains(&name) {
                        debug!(unit = %unit_name, artifact = %name, "reusing existing instance");
                        scope.report.reused.push(name);
                    }
                    Ok(Some(existing))
                }
            };
        }

        if scope.failed.contains(&name) {
            return Ok(None);
        }

        // The caller records the broken edge as a missing dependency.
        if !scope.visiting.insert(name.clone()) {
            warn!(unit = %unit_name, artifact = %name, "dependency cycle between producers");
            return Ok(None);
        }

        let mut args = ProducerArgs::new(&name);
        for dependency in producer.dependencies() {
            let value = self.resolve_dependency(scope, &dependency)?;
            if value.is_none() {
                let error = Error::missing_dependency(&name, &dependency);
                warn!(unit = %unit_name, "{error}, passing zero value");
                scope.report.failures.push(error);
            }
            args.push(dependency, value);
        }
        scope.visiting.remove(&name);

        match producer.invoke(&args) {
            Ok(artifact) => {
                self.registry.register(&name, &unit_name, artifact.clone())?;
                debug!(unit = %unit_name, artifact = %name, "registered instance");
                scope.report.registered.push(name);
                Ok(Some(artifact))
            }
            Err(error) => {
                warn!(unit = %unit_name, artifact = %name, "failed to instantiate: {error}");
                scope.failed.insert(name);
                scope.report.failures.push(error);
                Ok(None)
            }
        }
    }

    /// Registry by name, then under the package-qualified forms
    /// (`storage.dataSource`, `storageDataSource`), then a producer of the
    /// same unit under either the plain or the package-prefixed name.
    fn resolve_dependency(&self, scope: &mut UnitScope, dependency: &str) -> Result<Option<Artifact>> {
        let package = scope.descriptor.package.clone();
        let prefixed = package_prefixed(&package, dependency);
        let candidates = [dependency.to_string(), qualify(&package, dependency), prefixed.clone()];
        if let Some(value) = candidates.iter().find_map(|name| self.registry.get(name)) {
            return Ok(Some(value));
        }

        let local = scope
            .table
            .get(dependency)
            .or_else(|| scope.table.get(&prefixed))
            .copied();
        match local {
            Some(index) => self.resolve_producer(scope, index),
            None => Ok(None),
        }
    }
}
