//! Integration tests for ConfigManager and the settings file
//!
//! These tests verify:
//! - Default settings when no file exists
//! - Saving and reloading settings
//! - Partial files falling back to defaults
//! - Invalid files being reported

use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;
use vs_support::ConfigManager;
use vs_support::SupportConfig;
use vs_support::config::CONFIG_FILE_NAME;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir().as_str(), config_path.as_str());
    assert_eq!(manager.config_path(), config_path.join(CONFIG_FILE_NAME).as_path());
}

#[test]
fn test_config_dir_is_created() {
    let (_temp_dir, base) = create_test_config_dir();
    let nested = base.join("VS Support Data");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_load_defaults_without_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config, SupportConfig::default());
}

#[test]
fn test_save_and_load() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let config = SupportConfig {
        debug_mode: true,
        engine_mismatch_warnings: false,
        mod_path_template: Some("{gamePath}/resources".to_string()),
        ..SupportConfig::default()
    };
    manager.save(&config).unwrap();

    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(CONFIG_FILE_NAME),
        "patch_mods_on_install: false\nlog_dir: vs-logs\n",
    )
    .unwrap();

    let config = ConfigManager::new(&config_path).unwrap().load().unwrap();
    assert!(!config.patch_mods_on_install);
    assert_eq!(config.log_dir, "vs-logs");
    assert!(config.engine_mismatch_warnings);
    assert!(!config.notify_on_patch_failure);
}

#[test]
fn test_invalid_file_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(config_path.join(CONFIG_FILE_NAME), "debug_mode: [not, a, bool\n").unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    assert!(manager.load().is_err());
}
