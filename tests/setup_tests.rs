//! Integration tests for game setup
//!
//! These tests verify:
//! - Engine detection from the Unity crash handler
//! - Loader directory creation and presence checks
//! - Missing-loader warnings and their download links

mod common;

use common::{MockApi, temp_root, write_file};
use std::sync::Arc;
use vs_support::extension::VampireSurvivorsGame;
use vs_support::host::{Discovery, GameSupport, NotificationKind};
use vs_support::models::{ENGINE_SENTINEL, EngineGeneration, MELON_LOADER, MOD_LOADER, SupportConfig};
use vs_support::services::{detect_engine, detect_engine_or_old, ensure_loader};

#[tokio::test]
async fn test_undiscovered_game_is_old_engine() {
    assert_eq!(detect_engine_or_old(None).await, EngineGeneration::Old);
}

#[tokio::test]
async fn test_sentinel_marks_new_engine() {
    let (_temp_dir, root) = temp_root();
    write_file(&root, ENGINE_SENTINEL, "");
    write_file(&root, "VampireSurvivors.exe", "");

    assert_eq!(detect_engine(&root).await, EngineGeneration::New);
    assert_eq!(detect_engine_or_old(Some(root.as_path())).await, EngineGeneration::New);
}

#[tokio::test]
async fn test_missing_mod_loader_is_reported() {
    let (_temp_dir, root) = temp_root();

    let mut api = MockApi::new();
    api.expect_send_notification()
        .withf(|n| {
            n.id == "modloader-missing"
                && n.kind == NotificationKind::Warning
                && n.title == "ModLoader not found"
                && n.actions.len() == 1
                && n.actions[0].title == "Get ModLoader"
                && n.actions[0].url == MOD_LOADER.url
        })
        .times(1)
        .return_const(());

    assert!(!ensure_loader(&api, &root, EngineGeneration::Old).await);
    assert!(MOD_LOADER.writable_dir_in(&root).is_dir());
}

#[tokio::test]
async fn test_missing_melon_loader_is_reported() {
    let (_temp_dir, root) = temp_root();

    let mut api = MockApi::new();
    api.expect_send_notification()
        .withf(|n| n.id == "melonloader-missing" && n.message == "MelonLoader is necessary for modding. Please install it.")
        .times(1)
        .return_const(());

    assert!(!ensure_loader(&api, &root, EngineGeneration::New).await);
    assert!(MELON_LOADER.writable_dir_in(&root).is_dir());
}

#[tokio::test]
async fn test_installed_loader_is_silent() {
    let (_temp_dir, root) = temp_root();
    write_file(&root, "resources/app/.webpack/renderer/mod_loader/index.js", "");
    write_file(&root, "MelonLoader/MelonLoader.xml", "<xml/>");

    let mut api = MockApi::new();
    api.expect_send_notification().never();

    assert!(ensure_loader(&api, &root, EngineGeneration::Old).await);
    assert!(ensure_loader(&api, &root, EngineGeneration::New).await);
}

#[tokio::test]
async fn test_unwritable_loader_directory_is_reported() {
    let (_temp_dir, root) = temp_root();
    // a file where the loader directory should be
    write_file(&root, "MelonLoader", "");

    let mut api = MockApi::new();
    api.expect_send_notification()
        .withf(|n| n.id == "melonloader-missing")
        .times(1)
        .return_const(());

    assert!(!ensure_loader(&api, &root, EngineGeneration::New).await);
}

#[tokio::test]
async fn test_game_setup_checks_loader_for_detected_engine() {
    let (_temp_dir, root) = temp_root();
    write_file(&root, ENGINE_SENTINEL, "");

    let mut api = MockApi::new();
    api.expect_send_notification()
        .withf(|n| n.id == "melonloader-missing")
        .times(1)
        .return_const(());

    let game = VampireSurvivorsGame::new(Arc::new(api), Arc::new(SupportConfig::default()));
    game.setup(&Discovery { path: root.clone() }).await.unwrap();

    assert!(root.join("MelonLoader").is_dir());
    assert!(!root.join("resources").exists());
}

#[test]
fn test_mod_path_defaults_to_game_root() {
    let game = VampireSurvivorsGame::new(Arc::new(MockApi::new()), Arc::new(SupportConfig::default()));
    let root = camino::Utf8Path::new("/games/vs");

    assert_eq!(game.query_mod_path(root), camino::Utf8PathBuf::new());
    assert_eq!(game.descriptor().executable, "VampireSurvivors.exe");
}

#[test]
fn test_mod_path_template() {
    let config = SupportConfig {
        mod_path_template: Some("{gamePath}/Mods".to_string()),
        ..SupportConfig::default()
    };
    let game = VampireSurvivorsGame::new(Arc::new(MockApi::new()), Arc::new(config));

    assert_eq!(
        game.query_mod_path(camino::Utf8Path::new("/games/vs")),
        camino::Utf8PathBuf::from("/games/vs/Mods")
    );
}
