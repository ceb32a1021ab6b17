//! Integration tests for configuration loading

use standard_formatter::config::{ConfigProvider, Configuration, FileConfig, StaticConfig};
use standard_formatter::style::Style;

#[test]
fn test_defaults() {
    let config = Configuration::default();

    assert!(!config.format_on_save);
    assert_eq!(config.style, Style::Standard);
    assert!(!config.check_style_dev_dependencies);
    assert!(config.honor_package_config);
    assert!(config.use_prettier);
    assert_eq!(config.node_path, "node");
}

#[test]
fn test_parse_partial_json() {
    let config = Configuration::from_json(r#"{ "formatOnSave": true, "style": "semi-standard" }"#)
        .expect("Failed to parse config");

    assert!(config.format_on_save);
    assert_eq!(config.style, Style::SemiStandard);
    assert!(config.use_prettier);
}

#[test]
fn test_parse_style_none() {
    let config = Configuration::from_json(r#"{ "style": "none" }"#).expect("Failed to parse config");

    assert_eq!(config.style, Style::None);
}

#[test]
fn test_invalid_style_is_an_error() {
    assert!(Configuration::from_json(r#"{ "style": "airbnb" }"#).is_err());
}

#[test]
fn test_scope_override() {
    let config = Configuration::from_json(
        r#"{ "formatOnSave": true, "scopes": { "javascriptreact": { "formatOnSave": false } } }"#,
    )
    .expect("Failed to parse config");

    assert!(config.format_on_save_for(Some("javascript")));
    assert!(!config.format_on_save_for(Some("javascriptreact")));
    assert!(config.format_on_save_for(None));
}

#[test]
fn test_file_config_is_reread_on_every_load() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    let provider = FileConfig::new(&path);

    // Missing file means defaults
    assert_eq!(provider.load().expect("load"), Configuration::default());

    std::fs::write(&path, r#"{ "formatOnSave": true }"#).expect("Failed to write config");
    assert!(provider.load().expect("load").format_on_save);

    std::fs::write(&path, r#"{ "formatOnSave": false }"#).expect("Failed to write config");
    assert!(!provider.load().expect("load").format_on_save);
}

#[test]
fn test_snapshot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ broken").expect("Failed to write config");

    let provider = FileConfig::new(&path);
    assert!(provider.load().is_err());
    assert_eq!(provider.snapshot(), Configuration::default());
}

#[test]
fn test_static_config() {
    let config = Configuration {
        use_prettier: false,
        ..Configuration::default()
    };

    assert_eq!(StaticConfig(config.clone()).snapshot(), config);
}
