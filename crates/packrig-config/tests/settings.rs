//! Tests for profile-nested settings files.

use std::fs;
use std::path::PathBuf;

use packrig_config::{ConfigError, Settings};
use tempfile::TempDir;

const SETTINGS: &str = r#"
default:
  source_path: frontend
  source_entry_path: entrypoints
  extensions:
    - .js
    - .ts
  resolved_paths:
    - vendor/js

development:
  dev_server:
    host: 0.0.0.0
    port: 3035
    hmr: true

production:
  public_output_path: assets
  extensions:
    - .js
"#;

fn write_settings(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("packrig.yml");
    fs::write(&path, content).expect("write settings");
    (dir, path)
}

#[test]
fn default_section_applies_to_every_profile() {
    let (_dir, path) = write_settings(SETTINGS);
    let settings = Settings::load_file(&path, "test").unwrap();

    assert_eq!(settings.source_path, PathBuf::from("frontend"));
    assert_eq!(settings.entry_root(), PathBuf::from("frontend/entrypoints"));
    assert_eq!(settings.extensions, [".js", ".ts"]);
    assert_eq!(settings.resolved_paths, [PathBuf::from("vendor/js")]);
    // Untouched keys keep their built-in defaults
    assert_eq!(settings.public_output_path, "packs");
    assert!(settings.dev_server.is_none());
}

#[test]
fn selected_profile_overrides_default_section() {
    let (_dir, path) = write_settings(SETTINGS);
    let settings = Settings::load_file(&path, "production").unwrap();

    assert_eq!(settings.public_output_path, "assets");
    assert_eq!(settings.extensions, [".js"]);
    assert_eq!(settings.source_path, PathBuf::from("frontend"));
}

#[test]
fn dev_server_fills_in_missing_fields() {
    let (_dir, path) = write_settings(SETTINGS);
    let settings = Settings::load_file(&path, "development").unwrap();

    let dev_server = settings.dev_server.expect("dev server settings");
    assert_eq!(dev_server.host, "0.0.0.0");
    assert_eq!(dev_server.port, 3035);
    assert!(dev_server.hmr);
    assert!(dev_server.compress);
    assert!(!dev_server.https);
}

#[test]
fn empty_extension_list_loads_but_fails_validation() {
    let (_dir, path) = write_settings("default:\n  extensions: []\n");
    let settings = Settings::load_file(&path, "production").unwrap();

    assert!(settings.extensions.is_empty());
    assert!(matches!(settings.validate(), Err(ConfigError::NoExtensions)));
}

#[test]
fn wrong_type_is_a_settings_error() {
    let (_dir, path) = write_settings("default:\n  extensions: 42\n");
    let err = Settings::load_file(&path, "production").unwrap_err();
    assert!(matches!(err, ConfigError::Settings(_)));
}

#[test]
fn load_reads_config_directory_under_root() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/packrig.yml"),
        "default:\n  cache_path: tmp/cache/assets\n",
    )
    .unwrap();

    let settings = Settings::load(dir.path(), "development").unwrap();
    assert_eq!(settings.cache_path, PathBuf::from("tmp/cache/assets"));
}
