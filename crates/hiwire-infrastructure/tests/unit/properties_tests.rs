//! Property Layer Builder Tests

use crate::test_helpers::{APPLICATION_LOCAL_YML, APPLICATION_YML, config_dir, write};
use hiwire_domain::ErrorKind;
use hiwire_domain::value_objects::PropertySpace;
use hiwire_infrastructure::config::{PropertyLayerBuilder, SystemConfiguration};
use serde_json::json;
use std::env;

fn builder(files: &[(&str, &str)]) -> (tempfile::TempDir, PropertyLayerBuilder) {
    let dir = config_dir(files);
    let builder = PropertyLayerBuilder::new(dir.path());
    (dir, builder)
}

#[test]
fn test_profile_overlay_wins() {
    let (_dir, builder) = builder(&[
        ("application.yml", APPLICATION_YML),
        ("application-local.yml", APPLICATION_LOCAL_YML),
    ]);

    let local = builder.build_system_space("local").unwrap();
    assert_eq!(local.space.get("server.port"), Some(&json!(8081)));
    assert!(local.warnings.is_empty());

    let default = builder.build_system_space("default").unwrap();
    assert_eq!(default.space.get("server.port"), Some(&json!(8080)));
}

#[test]
fn test_system_space_carries_defaults() {
    let (_dir, builder) = builder(&[]);

    let build = builder.build_system_space("default").unwrap();
    let system = SystemConfiguration::from_properties(&build.space).unwrap();
    assert_eq!(system, SystemConfiguration::default());
}

#[test]
fn test_system_placeholders_resolve_against_itself() {
    let (_dir, builder) = builder(&[("application.yml", APPLICATION_YML)]);

    let build = builder.build_system_space("default").unwrap();
    assert_eq!(build.space.get_string("fake.name").as_deref(), Some("hiboot"));
}

#[test]
fn test_unit_space_layers_over_system() {
    let (_dir, builder) = builder(&[
        ("application.yml", APPLICATION_YML),
        ("mock.yml", "mock:\n  name: hiboot-mock\n  nickname: ${app.name}-mocking\n"),
        ("mock-local.yml", "mock:\n  name: hiboot-mock-local\n"),
    ]);
    builder.build_system_space("local").unwrap();

    let build = builder.build_unit_space("mock", "local");
    assert_eq!(build.space.get_string("mock.name").as_deref(), Some("hiboot-mock-local"));
    assert_eq!(
        build.space.get_string("mock.nickname").as_deref(),
        Some("hiboot-mocking")
    );
    assert_eq!(build.space.get_string("app.name").as_deref(), Some("hiboot"));
}

#[test]
fn test_system_prefix_reads_system_space() {
    let (_dir, builder) = builder(&[
        ("application.yml", APPLICATION_YML),
        ("web.yml", "app:\n  name: web-app\nweb:\n  title: ${system.app.name}/${app.name}\n"),
    ]);
    builder.build_system_space("default").unwrap();

    let build = builder.build_unit_space("web", "default");
    assert_eq!(build.space.get_string("web.title").as_deref(), Some("hiboot/web-app"));
}

#[test]
fn test_missing_unit_file_is_not_an_error() {
    let (_dir, builder) = builder(&[]);
    builder.build_system_space("default").unwrap();

    let build = builder.build_unit_space("absent", "default");
    assert!(build.warnings.is_empty());
}

#[test]
fn test_malformed_file_is_skipped_with_warning() {
    let (_dir, builder) = builder(&[
        ("application.yml", APPLICATION_YML),
        ("broken.yml", "broken:\n  name: [unterminated\n"),
        ("broken-local.yml", "broken:\n  name: from-overlay\n"),
    ]);
    builder.build_system_space("local").unwrap();

    let build = builder.build_unit_space("broken", "local");
    assert_eq!(build.warnings.len(), 1);
    assert_eq!(build.warnings[0].kind(), ErrorKind::PropertySourceParseError);
    assert!(!build.warnings[0].is_fatal());
    assert_eq!(build.space.get_string("broken.name").as_deref(), Some("from-overlay"));
}

#[test]
fn test_toml_sources() {
    let (_dir, builder) = builder(&[("data.toml", "[data]\nurl = \"pg://${app.name}\"\npool = 4\n")]);
    builder.set_property("app.name", "toml");
    builder.build_system_space("default").unwrap();

    let build = builder.build_unit_space("data", "default");
    assert_eq!(build.space.get_string("data.url").as_deref(), Some("pg://toml"));
    assert_eq!(build.space.get("data.pool"), Some(&json!(4)));
}

#[test]
fn test_custom_properties_take_precedence() {
    let (_dir, builder) = builder(&[
        ("application.yml", APPLICATION_YML),
        ("application-local.yml", APPLICATION_LOCAL_YML),
    ]);
    builder.set_property("server.port", 9090);

    let build = builder.build_system_space("local").unwrap();
    assert_eq!(build.space.get("server.port"), Some(&json!(9090)));
}

#[test]
fn test_environment_layer() {
    let (_dir, builder) = builder(&[("application.yml", APPLICATION_YML)]);
    let builder = builder.with_env_prefix("HIWIRE_PROPS_TEST");
    // SAFETY: the variable name is unique to this test
    unsafe {
        env::set_var("HIWIRE_PROPS_TEST__SERVER__PORT", "7070");
    }

    let build = builder.build_system_space("default").unwrap();

    unsafe {
        env::remove_var("HIWIRE_PROPS_TEST__SERVER__PORT");
    }
    assert_eq!(build.space.get("server.port"), Some(&json!(7070)));
}

#[test]
fn test_replace_round_trip() {
    let (_dir, builder) = builder(&[]);
    builder.set_property("app.name", "hiboot");
    builder.build_system_space("default").unwrap();

    assert_eq!(builder.replace("hi ${app.name}"), json!("hi hiboot"));
    assert_eq!(builder.replace("${missing.key:fallback}"), json!("fallback"));
    assert_eq!(
        builder.replace("this is ${default.value:default} property"),
        json!("this is default property")
    );
}

#[test]
fn test_replace_environment_variable() {
    let (_dir, builder) = builder(&[]);
    // SAFETY: the variable name is unique to this test
    unsafe {
        env::set_var("HIWIRE_REPLACE_TEST_HOME", "/home/u");
    }

    let resolved = builder.replace("${HIWIRE_REPLACE_TEST_HOME}");

    unsafe {
        env::remove_var("HIWIRE_REPLACE_TEST_HOME");
    }
    assert_eq!(resolved, json!("/home/u"));
}

#[test]
fn test_replace_whole_placeholder_keeps_list() {
    let (_dir, builder) = builder(&[]);
    builder.build_system_space("default").unwrap();
    builder.set_property("app.profiles.include", json!(["foo", "bar"]));

    assert_eq!(builder.replace("${app.profiles.include}"), json!(["foo", "bar"]));
    assert_eq!(builder.get_property("app.profiles.include"), Some(json!(["foo", "bar"])));
}

#[test]
fn test_save_and_reload() {
    let (dir, builder) = builder(&[]);
    let space = PropertySpace::from_value(json!({"saved": {"name": "round", "port": 1}}));

    PropertyLayerBuilder::save(&space, dir.path().join("saved.yml")).unwrap();
    PropertyLayerBuilder::save(&space, dir.path().join("nested/saved.toml")).unwrap();
    builder.build_system_space("default").unwrap();

    let build = builder.build_unit_space("saved", "default");
    assert_eq!(build.space.get_string("saved.name").as_deref(), Some("round"));
    assert!(dir.path().join("nested/saved.toml").is_file());
}

#[test]
fn test_save_rejects_unknown_format() {
    let (dir, _builder) = builder(&[]);
    let space = PropertySpace::new();

    assert!(PropertyLayerBuilder::save(&space, dir.path().join("saved.ini")).is_err());
}

#[test]
fn test_empty_file_is_ignored() {
    let (dir, builder) = builder(&[]);
    write(dir.path(), "empty.yml", "\n");
    builder.build_system_space("default").unwrap();

    let build = builder.build_unit_space("empty", "default");
    assert!(build.warnings.is_empty());
}
