//! Build Orchestrator Tests

use crate::support::{MemoryRegistry, MemoryStore, StaticProperties, TestUnit};
use hiwire_application::ports::ConfigurationStore;
use hiwire_application::use_cases::{BuildOptions, BuildOrchestrator, BuildState};
use hiwire_domain::ports::{ConfigurationUnit, InstanceRegistry};
use hiwire_domain::value_objects::{Marker, Phase, Producer};
use hiwire_domain::ErrorKind;
use serde_json::json;
use std::sync::Arc;

struct Fixture {
    registry: Arc<MemoryRegistry>,
    properties: Arc<StaticProperties>,
    store: Arc<MemoryStore>,
    orchestrator: BuildOrchestrator,
}

fn fixture(properties: StaticProperties) -> Fixture {
    let registry = MemoryRegistry::shared();
    let properties = Arc::new(properties);
    let store = Arc::new(MemoryStore::default());
    let orchestrator = BuildOrchestrator::new(registry.clone(), properties.clone(), store.clone());
    Fixture {
        registry,
        properties,
        store,
        orchestrator,
    }
}

fn bound_port(store: &MemoryStore, name: &str) -> Option<u64> {
    let unit = store.get(name)?;
    let unit = unit.downcast_arc::<TestUnit>().ok()?;
    unit.bound.as_ref()?.get("server.port")?.as_u64()
}

#[test]
fn test_phases_build_in_order() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::new("MetricsConfiguration")
            .marker(Marker::PostConfiguration)
            .boxed(),
        TestUnit::main("WebConfiguration").boxed(),
        TestUnit::new("LoggingConfiguration")
            .marker(Marker::PreConfiguration)
            .boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.built_units(), vec!["logging", "web", "metrics"]);
    assert_eq!(f.orchestrator.state(), BuildState::Ready);
    assert_eq!(f.store.names(), vec!["logging", "metrics", "web"]);
    let phases: Vec<Phase> = report.phases.iter().map(|p| p.phase).collect();
    assert_eq!(phases, Phase::ALL.to_vec());
}

#[test]
fn test_units_follow_declared_dependencies() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::main("WebConfiguration").after("data").boxed(),
        TestUnit::main("DataConfiguration").after("cache").boxed(),
        TestUnit::main("CacheConfiguration").boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert_eq!(report.phases[1].order, vec!["cache", "data", "web"]);
    assert_eq!(report.built_units(), vec!["cache", "data", "web"]);
}

#[test]
fn test_cycle_aborts_only_its_bucket() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::main("AConfiguration").after("b").boxed(),
        TestUnit::main("BConfiguration").after("a").boxed(),
        TestUnit::new("LateConfiguration")
            .marker(Marker::PostConfiguration)
            .producer(Producer::new("Late", |_| Ok(1u8)))
            .boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert!(!report.is_success());
    let main = &report.phases[1];
    assert_eq!(
        main.aborted.as_ref().map(hiwire_domain::Error::kind),
        Some(ErrorKind::CircularDependency)
    );
    assert!(main.units.is_empty());
    assert_eq!(report.built_units(), vec!["late"]);
    assert!(f.registry.contains("late"));
    assert_eq!(report.fatal_errors().len(), 1);
}

#[test]
fn test_duplicate_artifact_aborts_the_build() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::main("FirstConfiguration")
            .producer(Producer::new("Cache", |_| Ok("first")))
            .boxed(),
        TestUnit::main("SecondConfiguration")
            .producer(Producer::new("Cache", |_| Ok("second")))
            .boxed(),
    ];

    let error = f
        .orchestrator
        .run(units, &BuildOptions::default())
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DuplicateArtifactName);
    assert_eq!(f.orchestrator.state(), BuildState::Failed);
    let registry: &dyn InstanceRegistry = &*f.registry;
    assert_eq!(*registry.get_as::<&str>("cache").unwrap(), "first");
}

#[test]
fn test_duplicate_configuration_name_aborts_the_build() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::main("WebConfiguration").package("first").boxed(),
        TestUnit::new("WebConfiguration")
            .package("second")
            .marker(Marker::PostConfiguration)
            .boxed(),
    ];

    let error = f
        .orchestrator
        .run(units, &BuildOptions::default())
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DuplicateArtifactName);
}

#[test]
fn test_properties_are_bound_per_unit_and_profile() {
    let properties = StaticProperties::default()
        .with_source("web", json!({"server": {"port": 8081}}));
    let mut f = fixture(properties);
    let units = vec![TestUnit::main("WebConfiguration").boxed()];

    f.orchestrator
        .run(units, &BuildOptions::with_profile("local"))
        .unwrap();

    assert_eq!(bound_port(&f.store, "web"), Some(8081));
    assert_eq!(
        f.properties.built(),
        vec![("web".to_string(), "local".to_string())]
    );
}

#[test]
fn test_active_profile_is_published() {
    let mut f = fixture(StaticProperties::default());

    let space = f
        .orchestrator
        .build_system_config(&BuildOptions::with_profile("dev"))
        .unwrap();

    assert_eq!(space.get_string("app.profiles.active").as_deref(), Some("dev"));
    assert_eq!(f.orchestrator.state(), BuildState::CategorizeUnits);
}

#[test]
fn test_empty_profile_means_default() {
    let mut f = fixture(StaticProperties::default());

    let report = f
        .orchestrator
        .run(Vec::new(), &BuildOptions::with_profile(""))
        .unwrap();

    assert_eq!(report.profile, "default");
}

#[test]
fn test_malformed_source_falls_back_to_defaults() {
    let properties = StaticProperties::default()
        .with_source("web", json!({"server": {"port": 9000}}))
        .with_warning("web", "mapping values are not allowed here")
        .failing("data");
    let mut f = fixture(properties);
    let units = vec![
        TestUnit::main("WebConfiguration").boxed(),
        TestUnit::main("DataConfiguration")
            .producer(Producer::new("Pool", |_| Ok(4u8)))
            .boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.built_units(), vec!["data", "web"]);
    assert_eq!(report.warning_count(), 2);
    assert_eq!(bound_port(&f.store, "web"), Some(9000));
    assert!(f.registry.contains("pool"));
}

#[test]
fn test_bind_failure_keeps_unit() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::main("WebConfiguration")
            .failing_bind()
            .producer(Producer::new("Router", |_| Ok("router")))
            .boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.warning_count(), 1);
    assert!(f.registry.contains("router"));
}

#[test]
fn test_profile_filter_from_system_configuration() {
    let properties = StaticProperties::default().with_system(json!({
        "app": {"profiles": {"filter": true, "include": ["foo"]}}
    }));
    let mut f = fixture(properties);
    let units = vec![
        TestUnit::main("FooConfiguration").boxed(),
        TestUnit::main("BarConfiguration").boxed(),
        TestUnit::main("BazConfiguration")
            .marker(Marker::ContextAware)
            .boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert_eq!(report.built_units(), vec!["baz", "foo"]);
    assert_eq!(report.filtered, vec!["bar"]);
}

#[test]
fn test_bypass_admits_filtered_units() {
    let properties = StaticProperties::default().with_system(json!({
        "app": {"profiles": {"filter": true, "include": ["foo"]}}
    }));
    let mut f = fixture(properties);
    let units = vec![
        TestUnit::main("FooConfiguration").boxed(),
        TestUnit::main("BarConfiguration").boxed(),
    ];
    let options = BuildOptions {
        bypass_profile_filter: true,
        ..BuildOptions::default()
    };

    let report = f.orchestrator.run(units, &options).unwrap();

    assert_eq!(report.built_units(), vec!["bar", "foo"]);
    assert!(report.filtered.is_empty());
}

#[test]
fn test_rejected_units_are_reported() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::new("BareConfiguration").boxed(),
        TestUnit::main("WebConfiguration").boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].name, "bare");
    assert_eq!(report.built_units(), vec!["web"]);
}

#[test]
fn test_build_runs_once() {
    let mut f = fixture(StaticProperties::default());
    f.orchestrator
        .run(Vec::new(), &BuildOptions::default())
        .unwrap();

    let error = f
        .orchestrator
        .run(Vec::new(), &BuildOptions::default())
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Other);
}

#[test]
fn test_units_before_system_config_is_an_error() {
    let mut f = fixture(StaticProperties::default());
    let units: Vec<Box<dyn ConfigurationUnit>> = vec![TestUnit::main("WebConfiguration").boxed()];

    assert!(f.orchestrator.build_units(units).is_err());
    assert_eq!(f.orchestrator.state(), BuildState::Start);
}

#[test]
fn test_report_summary() {
    let mut f = fixture(StaticProperties::default());
    let units = vec![
        TestUnit::main("WebConfiguration")
            .producer(Producer::new("Router", |_| Ok("router")))
            .boxed(),
    ];

    let report = f.orchestrator.run(units, &BuildOptions::default()).unwrap();

    assert_eq!(report.artifacts(), vec!["router"]);
    let summary = report.to_string();
    assert!(summary.contains("default"));
    assert!(summary.contains("web"));
}
