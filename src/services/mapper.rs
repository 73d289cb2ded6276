//! File-to-destination mapping for both engine generations.
//!
//! # Old engine
//!
//! Old engine archives keep their internal layout. The mapper only decides where under
//! the game tree that layout is rooted: the first file whose leading segment appears in
//! one of [`OLD_ENGINE_HIERARCHIES`] fixes a prefix (every template segment before the
//! match) that is applied to every file. Without a match, files land at the game root.
//!
//! # New engine
//!
//! A flat archive (no file in a subdirectory) has each recognised file lifted into its
//! rule's folder (`loadme.dll` → `Mods/loadme.dll`). An archive with folders is assumed
//! to mirror the game tree already and passes through unchanged. Files with unrecognised
//! extensions are dropped in both cases.

use super::archive_path::{basename, extension_of, has_parent_dir, is_directory_entry, leading_segment, normalize};
use crate::models::{
    CopyInstruction, EngineGeneration, NEW_ENGINE_RULES, OLD_ENGINE_HIERARCHIES, find_rule,
};

/// Build the copy plan for `files` under `engine`.
pub fn map_files(files: &[String], engine: EngineGeneration) -> Vec<CopyInstruction> {
    match engine {
        EngineGeneration::Old => map_old_engine(files),
        EngineGeneration::New => map_new_engine(files),
    }
}

/// Prefix, with trailing `/` when non-empty, that roots an old engine archive in the game tree.
pub fn old_engine_prefix(files: &[String]) -> String {
    for file in files {
        let normalized = normalize(file);
        let first = leading_segment(&normalized);

        for hierarchy in OLD_ENGINE_HIERARCHIES {
            let segments: Vec<&str> = hierarchy.split('/').collect();
            if let Some(index) = segments.iter().position(|segment| *segment == first) {
                let prefix = segments[..index].join("/");
                tracing::debug!("[old-e] {} matched {} at {}", normalized, hierarchy, index);
                return if prefix.is_empty() {
                    prefix
                } else {
                    format!("{}/", prefix)
                };
            }
        }
    }
    String::new()
}

/// Old engine plan: shared prefix applied to every non-directory entry.
pub fn map_old_engine(files: &[String]) -> Vec<CopyInstruction> {
    tracing::info!("[old-e] prepare files: {:?}", files);

    let prefix = old_engine_prefix(files);
    let prepared: Vec<CopyInstruction> = files
        .iter()
        .map(|file| normalize(file))
        .filter(|file| !is_directory_entry(file))
        .map(|file| {
            let destination = format!("{}{}", prefix, file);
            CopyInstruction::new(file, destination)
        })
        .collect();

    log_prepared("old-e", &prepared);
    prepared
}

/// New engine plan: lift loose files in flat archives, pass foldered archives through.
pub fn map_new_engine(files: &[String]) -> Vec<CopyInstruction> {
    tracing::info!("[new-e] prepare files: {:?}", files);

    let has_folder = files.iter().any(|file| has_parent_dir(file));

    let mut prepared = Vec::new();
    for file in files.iter().map(|file| normalize(file)) {
        if is_directory_entry(&file) {
            continue;
        }
        let Some(rule) = extension_of(&file).and_then(|ext| find_rule(NEW_ENGINE_RULES, &ext))
        else {
            tracing::debug!("[new-e] skipping unrecognised file: {}", file);
            continue;
        };

        let destination = if !has_folder && !has_parent_dir(&file) {
            format!("{}/{}", rule.destination, basename(&file))
        } else {
            file.clone()
        };
        prepared.push(CopyInstruction::new(file, destination));
    }

    log_prepared("new-e", &prepared);
    prepared
}

fn log_prepared(tag: &str, prepared: &[CopyInstruction]) {
    for copy in prepared {
        tracing::info!(
            "[{}] prepared source:\"{}\" | destination:\"{}\"",
            tag,
            copy.source,
            copy.destination
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(list: &[&str]) -> Vec<String> {
        list.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_old_engine_prefix_from_assets() {
        let prefix = old_engine_prefix(&files(&["readme.txt", "assets/img/sprite.png"]));
        assert_eq!(prefix, "resources/app/.webpack/renderer/");
    }

    #[test]
    fn test_old_engine_prefix_from_mod_loader() {
        let prefix = old_engine_prefix(&files(&["mod_loader\\mods\\a\\a.js"]));
        assert_eq!(prefix, "resources/app/.webpack/renderer/");
    }

    #[test]
    fn test_old_engine_prefix_full_tree_is_empty() {
        let prefix = old_engine_prefix(&files(&["resources/app/.webpack/renderer/assets/a.png"]));
        assert_eq!(prefix, "");
    }

    #[test]
    fn test_old_engine_prefix_partial_tree() {
        let prefix = old_engine_prefix(&files(&[".webpack/renderer/main.bundle.js"]));
        assert_eq!(prefix, "resources/app/");
    }

    #[test]
    fn test_old_engine_no_match_keeps_paths() {
        let plan = map_old_engine(&files(&["mods/myMod/", "mods/myMod/myMod.js"]));
        assert_eq!(
            plan,
            vec![CopyInstruction::new("mods/myMod/myMod.js", "mods/myMod/myMod.js")]
        );
    }

    #[test]
    fn test_new_engine_flat_lifts_files() {
        let plan = map_new_engine(&files(&["loadme.dll", "settings.cfg", "readme.txt"]));
        assert_eq!(
            plan,
            vec![
                CopyInstruction::new("loadme.dll", "Mods/loadme.dll"),
                CopyInstruction::new("settings.cfg", "UserData/settings.cfg"),
            ]
        );
    }

    #[test]
    fn test_new_engine_foldered_passes_through() {
        let plan = map_new_engine(&files(&["Mods\\loadme.dll", "extra.json", "notes.md"]));
        assert_eq!(
            plan,
            vec![
                CopyInstruction::new("Mods/loadme.dll", "Mods/loadme.dll"),
                CopyInstruction::new("extra.json", "extra.json"),
            ]
        );
    }

    #[test]
    fn test_new_engine_directory_entry_does_not_count_as_folder() {
        let plan = map_new_engine(&files(&["Mods/", "loadme.dll"]));
        assert_eq!(plan, vec![CopyInstruction::new("loadme.dll", "Mods/loadme.dll")]);
    }
}
