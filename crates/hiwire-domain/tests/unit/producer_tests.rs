//! Producer Tests

use hiwire_domain::value_objects::{Artifact, Producer, ProducerArgs};
use hiwire_domain::Error;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct DataSource {
    url: String,
}

#[test]
fn test_artifact_name_is_lower_camel() {
    let producer = Producer::new("DataSource", |_| Ok(1u8));
    assert_eq!(producer.operation(), "DataSource");
    assert_eq!(producer.name(), "dataSource");
}

#[test]
fn test_dependency_overrides_take_precedence() {
    let producer = Producer::new("Repository", |_| Ok(()))
        .with_param("DataSource")
        .with_param("Logger");
    assert_eq!(producer.dependencies(), vec!["dataSource", "logger"]);

    let producer = producer.with_dependencies(["primaryDataSource"]);
    assert_eq!(producer.dependencies(), vec!["primaryDataSource", "logger"]);
}

#[test]
fn test_invoke_wraps_value() {
    let producer = Producer::new("DataSource", |_| {
        Ok(DataSource {
            url: "mem://".to_string(),
        })
    });

    let artifact = producer.invoke(&ProducerArgs::new("dataSource")).unwrap();
    let data_source = Arc::downcast::<DataSource>(artifact).unwrap();
    assert_eq!(data_source.url, "mem://");
}

#[test]
fn test_args_typed_access() {
    let value: Artifact = Arc::new(DataSource {
        url: "mem://".to_string(),
    });
    let mut args = ProducerArgs::new("repository");
    args.push("dataSource", Some(value));
    args.push("logger", None);

    assert_eq!(args.len(), 2);
    assert!(args.is_present(0));
    assert!(!args.is_present(1));
    assert!(args.get::<DataSource>(0).is_some());
    assert!(args.get::<String>(0).is_none());

    match args.require::<String>(1) {
        Err(Error::MissingDependency {
            artifact,
            dependency,
        }) => {
            assert_eq!(artifact, "repository");
            assert_eq!(dependency, "logger");
        }
        _ => panic!("Expected MissingDependency error"),
    }
}
