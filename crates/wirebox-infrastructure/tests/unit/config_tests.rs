//! Tests for configuration loading

use std::fs;

use tempfile::TempDir;
use wirebox_domain::Error;
use wirebox_infrastructure::config::{AppConfig, ConfigLoader};

/// Loader isolated from the process environment
fn loader() -> ConfigLoader {
    ConfigLoader::new().with_env_prefix("WIREBOX_UNIT_TEST_UNSET")
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json_format);
    assert!(config.resolver.link_factories);
    assert_eq!(
        config.resolver.direct_extensions,
        vec!["so", "dylib", "dll", "wasm"]
    );
    assert!(config.definitions.path.is_none());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let config = loader()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .expect("defaults");

    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wirebox.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
json_format = true

[resolver]
direct_extensions = ["wasm", "plugin"]
link_factories = false

[definitions]
path = "services.json"
"#,
    )
    .expect("write config");

    let loader = loader().with_config_path(&path);
    assert_eq!(loader.config_path(), Some(path.as_path()));
    let config = loader.load().expect("load");

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert!(!config.logging.with_location);
    assert_eq!(config.resolver.direct_extensions, vec!["wasm", "plugin"]);
    assert!(!config.resolver.link_factories);
    assert_eq!(
        config.definitions.path.as_deref(),
        Some(std::path::Path::new("services.json"))
    );
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wirebox.toml");
    fs::write(&path, "[logging]\nlevel = \"chatty\"\n").expect("write config");

    let err = loader().with_config_path(&path).load().expect_err("bad level");
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_invalid_extension_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wirebox.toml");
    fs::write(&path, "[resolver]\ndirect_extensions = [\".wasm\"]\n").expect("write config");

    let err = loader().with_config_path(&path).load().expect_err("dotted extension");
    assert!(err.to_string().contains(".wasm"));
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wirebox.toml");
    fs::write(&path, "[logging\nlevel = ").expect("write config");

    let err = loader().with_config_path(&path).load().expect_err("malformed");
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_saved_file_loads_back() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.logging.level = "trace".to_string();
    config.resolver.direct_extensions = vec!["wasm".to_string()];

    let loader = loader();
    loader.save_to_file(&config, &path).expect("save");
    let loaded = loader.with_config_path(&path).load().expect("load");

    assert_eq!(loaded.logging.level, "trace");
    assert_eq!(loaded.resolver.direct_extensions, vec!["wasm"]);
}
