//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests write their config into temp directories and pass it
//! explicitly; fields the file sets win over defaults and any global config.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use treeviz::application::ApplicationError;
use treeviz::config::{load_raw_settings, BuildMode, KeyKind, Settings};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("treeviz.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_config_file_with_scalars_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
absent_token = "null"
mode = "balanced"
key_kind = "text"
show_heights = true
"#,
    );

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.absent_token, "null");
    assert_eq!(settings.mode, BuildMode::Balanced);
    assert_eq!(settings.key_kind, KeyKind::Text);
    assert!(settings.show_heights);
}

#[test]
fn given_partial_layout_table_when_load_then_unspecified_fields_inherit() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[layout]
horizontal_spacing = 120
"#,
    );

    // Act
    let raw = load_raw_settings(&path).expect("load raw settings");
    let settings = Settings::default().merge_with(&raw);

    // Assert
    assert_eq!(settings.layout.horizontal_spacing, 120);
    assert_eq!(settings.layout.vertical_spacing, 70);
    assert_eq!(settings.layout.margin, 30);
    assert_eq!(settings.absent_token, "none");
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(&dir.path().join("missing.toml")));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mode = \"sideways\"\n");
    let result = Settings::load(Some(&path));
    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("parse")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_settings_when_serialized_then_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let mut original = Settings::default();
    original.mode = BuildMode::Balanced;
    original.layout.margin = 12;
    let path = write_config(&dir, &original.to_toml().unwrap());

    let raw = load_raw_settings(&path).unwrap();
    assert_eq!(Settings::default().merge_with(&raw), original);
}

fn env_vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn given_single_underscore_env_vars_when_applied_then_override_settings() {
    // Arrange
    let vars = env_vars(&[
        ("TREEVIZ_MODE", "balanced"),
        ("TREEVIZ_ABSENT_TOKEN", "null"),
        ("TREEVIZ_KEY_KIND", "text"),
        ("TREEVIZ_SHOW_HEIGHTS", "true"),
    ]);

    // Act
    let settings = Settings::default().apply_env(vars).expect("apply env");

    // Assert
    assert_eq!(settings.mode, BuildMode::Balanced);
    assert_eq!(settings.absent_token, "null");
    assert_eq!(settings.key_kind, KeyKind::Text);
    assert!(settings.show_heights);
}

#[test]
fn given_nested_env_var_when_applied_then_layout_field_overridden() {
    let vars = env_vars(&[("TREEVIZ_LAYOUT__MARGIN", "12"), ("OTHER_MODE", "balanced")]);

    let settings = Settings::default().apply_env(vars).expect("apply env");

    assert_eq!(settings.layout.margin, 12);
    assert_eq!(settings.layout.horizontal_spacing, 70);
    assert_eq!(settings.mode, BuildMode::LevelOrder);
}

#[test]
fn given_file_and_env_when_layered_then_env_wins() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mode = \"balanced\"\nabsent_token = \"nil\"\n");
    let raw = load_raw_settings(&path).unwrap();

    let settings = Settings::default()
        .merge_with(&raw)
        .apply_env(env_vars(&[("TREEVIZ_MODE", "level-order")]))
        .unwrap();

    assert_eq!(settings.mode, BuildMode::LevelOrder);
    assert_eq!(settings.absent_token, "nil");
}
