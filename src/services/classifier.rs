//! Archive classification for the two installers.
//!
//! Both tests are pure functions of the file list and target game id. The engine
//! generation detected on disk only decides whether a cross-engine warning is raised;
//! it never changes whether an archive is supported.

use super::archive_path::{extension_of, mod_display_name, normalize};
use crate::host::{Notification, NotificationKind};
use crate::models::{
    EngineGeneration, ExtensionRule, GAME_ID, NEW_ENGINE_RULES, OLD_ENGINE_LAYOUT_MARKERS,
    OLD_ENGINE_RULES, find_rule,
};

fn any_recognized_extension(files: &[String], rules: &[ExtensionRule]) -> bool {
    files.iter().any(|file| {
        extension_of(file)
            .map(|ext| find_rule(rules, &ext).is_some())
            .unwrap_or(false)
    })
}

fn any_old_engine_layout(files: &[String]) -> bool {
    files.iter().any(|file| {
        let normalized = normalize(file);
        OLD_ENGINE_LAYOUT_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
    })
}

/// Whether an archive is old engine content.
///
/// Matches on a `.js` file, or failing that on a `renderer/` or `assets/` path fragment.
pub fn is_old_engine_content(files: &[String], game_id: &str) -> bool {
    game_id == GAME_ID
        && (any_recognized_extension(files, OLD_ENGINE_RULES) || any_old_engine_layout(files))
}

/// Whether an archive is new engine content (a DLL, font or config file).
pub fn is_new_engine_content(files: &[String], game_id: &str) -> bool {
    game_id == GAME_ID && any_recognized_extension(files, NEW_ENGINE_RULES)
}

/// Classify `files` for the installer targeting `installer_engine`.
pub fn is_supported(files: &[String], game_id: &str, installer_engine: EngineGeneration) -> bool {
    match installer_engine {
        EngineGeneration::Old => is_old_engine_content(files, game_id),
        EngineGeneration::New => is_new_engine_content(files, game_id),
    }
}

/// Warning for a supported archive whose installer targets a different engine than the
/// one installed. `None` when the engines agree.
pub fn engine_mismatch_warning(
    installer_engine: EngineGeneration,
    detected_engine: EngineGeneration,
    mod_path: &str,
) -> Option<Notification> {
    if installer_engine == detected_engine {
        return None;
    }

    let name = mod_display_name(mod_path);
    let notification = match installer_engine {
        EngineGeneration::Old => Notification::new(
            format!("is_new_engine_{}", name.to_lowercase()),
            NotificationKind::Warning,
            format!("Old Mod but New Engine [{}]", name),
            "You are trying to install a Mod for the Old Engine on the New Engine",
        ),
        EngineGeneration::New => Notification::new(
            format!("is_old_engine_{}", name.to_lowercase()),
            NotificationKind::Warning,
            format!("New Mod but Old Engine [{}]", name),
            "You are trying to install a Mod for the New Engine on the Old Engine",
        ),
    };
    Some(notification)
}
