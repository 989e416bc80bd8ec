//! Unit Descriptor Tests

use hiwire_domain::value_objects::{Marker, Phase, UnitDescriptor};

#[test]
fn test_name_derivation() {
    assert_eq!(UnitDescriptor::new("WebConfiguration", "web").name, "web");
    assert_eq!(
        UnitDescriptor::new("DataSourceConfiguration", "db").name,
        "dataSource"
    );
    assert_eq!(UnitDescriptor::new("Configuration", "actuator").name, "actuator");
}

#[test]
fn test_markers() {
    let descriptor = UnitDescriptor::new("JwtConfiguration", "jwt")
        .with_marker(Marker::PreConfiguration)
        .with_marker(Marker::ContextAware)
        .depends_on("web");

    assert_eq!(descriptor.phases(), vec![Phase::Pre]);
    assert!(descriptor.is_context_aware());
    assert_eq!(descriptor.depends_on, vec!["web"]);
}

#[test]
fn test_phase_order() {
    assert_eq!(Phase::ALL, [Phase::Pre, Phase::Main, Phase::Post]);
    assert_eq!(Phase::Post.to_string(), "post");
}
