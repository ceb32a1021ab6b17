//! Integration tests for style resolution

mod common;

use standard_formatter::config::Configuration;
use standard_formatter::style::{Style, resolve_style};

fn detecting() -> Configuration {
    Configuration {
        check_style_dev_dependencies: true,
        ..Configuration::default()
    }
}

#[test]
fn test_static_style_used_without_detection() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    common::write_manifest(dir.path(), r#"{ "devDependencies": { "standard": "*" } }"#);
    let file = common::touch(dir.path(), "index.js", "");

    let config = Configuration {
        style: Style::SemiStandard,
        ..Configuration::default()
    };

    assert_eq!(resolve_style(&config, &file), Style::SemiStandard);
}

#[test]
fn test_standard_takes_precedence_over_semistandard() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    common::write_manifest(
        dir.path(),
        r#"{ "devDependencies": { "semistandard": "^16.0.0", "standard": "^17.0.0" } }"#,
    );
    let file = common::touch(dir.path(), "lib/index.js", "");

    assert_eq!(resolve_style(&detecting(), &file), Style::Standard);
}

#[test]
fn test_semistandard_detected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    common::write_manifest(dir.path(), r#"{ "devDependencies": { "semistandard": "*" } }"#);
    let file = common::touch(dir.path(), "index.js", "");

    assert_eq!(resolve_style(&detecting(), &file), Style::SemiStandard);
}

#[test]
fn test_no_matching_dev_dependency_resolves_to_none() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    common::write_manifest(dir.path(), r#"{ "devDependencies": { "eslint": "*" } }"#);
    let file = common::touch(dir.path(), "index.js", "");

    assert_eq!(resolve_style(&detecting(), &file), Style::None);
}

#[test]
fn test_regular_dependencies_are_not_dev_dependencies() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    common::write_manifest(dir.path(), r#"{ "dependencies": { "standard": "*" } }"#);
    let file = common::touch(dir.path(), "index.js", "");

    assert_eq!(resolve_style(&detecting(), &file), Style::None);
}

#[test]
fn test_package_and_namespace_mapping() {
    assert_eq!(Style::Standard.package_name(), Some("standard"));
    assert_eq!(Style::SemiStandard.package_name(), Some("semistandard"));
    assert_eq!(Style::None.package_name(), None);

    assert_eq!(Style::SemiStandard.config_namespace(), "semistandard");
    assert_eq!(Style::Standard.config_namespace(), "standard");
    assert_eq!(Style::None.config_namespace(), "standard");
}
