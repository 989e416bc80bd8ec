//! Error Tests

use hiwire_domain::error::{Error, ErrorKind};

#[test]
fn test_circular_dependency_sorts_nodes() {
    let error = Error::circular_dependency(["web", "jwt", "cache"]);

    match &error {
        Error::CircularDependency { nodes } => {
            assert_eq!(nodes, &vec!["cache", "jwt", "web"]);
        }
        _ => panic!("Expected CircularDependency error"),
    }
    assert_eq!(
        error.to_string(),
        "Circular dependency found between: cache, jwt, web"
    );
}

#[test]
fn test_fatal_classification() {
    assert!(Error::circular_dependency(["a"]).is_fatal());
    assert!(Error::duplicate_artifact("cache").is_fatal());

    assert!(!Error::invalid_configuration_type("foo", "no phase marker").is_fatal());
    assert!(!Error::property_source_parse("/tmp/foo.yml", "bad indent").is_fatal());
    assert!(!Error::missing_dependency("repository", "dataSource").is_fatal());
    assert!(!Error::configuration("oops").is_fatal());
}

#[test]
fn test_error_kinds() {
    assert_eq!(
        Error::duplicate_artifact("cache").kind(),
        ErrorKind::DuplicateArtifactName
    );
    assert_eq!(
        Error::property_source_parse("a.yml", "x").kind(),
        ErrorKind::PropertySourceParseError
    );
    assert_eq!(Error::internal("x").kind(), ErrorKind::Other);
    assert_eq!(ErrorKind::MissingDependency.to_string(), "MissingDependency");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: Error = io.into();
    assert!(matches!(error, Error::IoSimple { .. }));
    assert!(error.to_string().contains("gone"));
}

#[test]
fn test_missing_dependency_message() {
    let error = Error::missing_dependency("repository", "dataSource");
    assert_eq!(
        error.to_string(),
        "Missing dependency dataSource of artifact repository"
    );
}
