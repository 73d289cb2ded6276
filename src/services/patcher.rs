//! Post-install fix for old engine mods.
//!
//! Old engine mods generated from the VS Mod Loader template list the loader's `mods`
//! folder in a `getMods()` method and treat every directory there as a mod. The host
//! keeps its own `__folder_managed_by_vortex` directory in that folder, which those mods
//! then fail to load. The fix appends a `.filter(...)` to the readdir call-site so the
//! host's folder is skipped.
//!
//! The patch is textual and anchored on the exact call-site shape. Running it twice is
//! a no-op: an already filtered call-site is reported as [`FixOutcome::AlreadyPatched`].

use crate::models::FixOutcome;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::collections::HashSet;

/// Directory the host creates inside mod folders.
pub const MANAGED_FOLDER: &str = "__folder_managed_by_vortex";

/// Directory name searched for in installed mod trees.
const MODS_FOLDER: &str = "mods";

/// Locates and rewrites the `getMods` readdir call-site.
pub struct GetModsPatcher {
    /// `getMods() { ...` up to the first closing brace
    get_mods_pattern: Regex,

    /// `"mods/"), { withFileTypes: true }`
    readdir_pattern: Regex,

    /// Text inserted right after the readdir call-site.
    filter_suffix: String,
}

impl GetModsPatcher {
    pub fn new() -> Self {
        Self {
            get_mods_pattern: Regex::new(r"getMods\s*\(\)\s*\{(?s:.*?)\}").expect("Invalid getMods regex"),
            readdir_pattern: Regex::new(r#""mods/"\),\s*\{\s*withFileTypes:\s*true\s*\}"#)
                .expect("Invalid readdir regex"),
            filter_suffix: format!(").filter((dir) => dir.name !== \"{}\"", MANAGED_FOLDER),
        }
    }

    /// Patch `source`, returning the rewritten text or why nothing changed.
    pub fn patch_source(&self, source: &str) -> std::result::Result<String, FixOutcome> {
        let get_mods = self
            .get_mods_pattern
            .find(source)
            .ok_or(FixOutcome::AnchorNotFound)?;
        let readdir = self
            .readdir_pattern
            .find(get_mods.as_str())
            .ok_or(FixOutcome::AnchorNotFound)?;

        let insert_at = get_mods.start() + readdir.end();
        if source[insert_at..].starts_with(&self.filter_suffix) {
            return Err(FixOutcome::AlreadyPatched);
        }

        let mut patched = String::with_capacity(source.len() + self.filter_suffix.len());
        patched.push_str(&source[..insert_at]);
        patched.push_str(&self.filter_suffix);
        patched.push_str(&source[insert_at..]);
        Ok(patched)
    }

    /// Patch the entry file at `path` in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub async fn fix_file(&self, path: &Utf8Path) -> Result<FixOutcome> {
        tracing::info!("[fix-get-mods] file: {}", path);

        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read mod entry file: {}", path))?;

        match self.patch_source(&source) {
            Ok(patched) => {
                tokio::fs::write(path, patched)
                    .await
                    .with_context(|| format!("Failed to write mod entry file: {}", path))?;
                Ok(FixOutcome::Fixed)
            }
            Err(outcome) => {
                tracing::debug!("[fix-get-mods] {} left unchanged: {:?}", path, outcome);
                Ok(outcome)
            }
        }
    }

    /// Find the entry file under an installed mod tree and patch it.
    pub async fn fix_mod(&self, mod_root: &Utf8Path) -> Result<FixOutcome> {
        match find_main_mod_file(mod_root).await? {
            Some(entry) => self.fix_file(&entry).await,
            None => Ok(FixOutcome::NoEntryFile),
        }
    }
}

impl Default for GetModsPatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Subdirectories of `dir` in name order, following symlinks.
async fn sorted_subdirs(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory: {}", dir))?;

    let mut subdirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read entry in: {}", dir))?
    {
        let path = match Utf8PathBuf::from_path_buf(entry.path()) {
            Ok(path) => path,
            Err(path) => {
                tracing::debug!("Skipping non UTF-8 path: {}", path.display());
                continue;
            }
        };
        if let Ok(meta) = tokio::fs::metadata(&path).await
            && meta.is_dir()
        {
            subdirs.push(path);
        }
    }
    subdirs.sort();
    Ok(subdirs)
}

/// First directory named `mods` under `root`, in pre-order.
///
/// Siblings are never searched once a match is found; `root` itself is not a candidate.
/// Unreadable subdirectories are skipped. Symlinked directories are followed, but each
/// real directory is expanded at most once, so link cycles terminate.
pub async fn find_mods_folder(root: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    let mut visited = HashSet::new();
    if let Ok(canonical) = tokio::fs::canonicalize(root).await {
        visited.insert(canonical);
    }
    let mut stack: Vec<Utf8PathBuf> = sorted_subdirs(root).await?.into_iter().rev().collect();

    while let Some(dir) = stack.pop() {
        if dir.file_name() == Some(MODS_FOLDER) {
            return Ok(Some(dir));
        }
        let canonical = match tokio::fs::canonicalize(&dir).await {
            Ok(canonical) => canonical,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", dir, e);
                continue;
            }
        };
        if !visited.insert(canonical) {
            tracing::debug!("Already searched {}, skipping", dir);
            continue;
        }
        match sorted_subdirs(&dir).await {
            Ok(children) => stack.extend(children.into_iter().rev()),
            Err(e) => tracing::debug!("Skipping {}: {:#}", dir, e),
        }
    }

    Ok(None)
}

/// Entry file of an installed old engine mod: `mods/<name>/<name>.js`.
///
/// Only the first subdirectory of `mods` is considered.
pub async fn find_main_mod_file(mod_root: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    let Some(mods_folder) = find_mods_folder(mod_root).await? else {
        tracing::debug!("No mods folder under {}", mod_root);
        return Ok(None);
    };

    let Some(first) = sorted_subdirs(&mods_folder).await?.into_iter().next() else {
        return Ok(None);
    };
    let Some(name) = first.file_name() else {
        return Ok(None);
    };

    let entry = first.join(format!("{}.js", name));
    match tokio::fs::metadata(&entry).await {
        Ok(meta) if meta.is_file() => Ok(Some(entry)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"class MyMod {
    getMods() {
        return fs.readdirSync(path.join(__dirname, "mods/"), { withFileTypes: true }).map((d) => d.name);
    }
}"#;

    #[test]
    fn test_patch_inserts_filter() {
        let patcher = GetModsPatcher::new();
        let patched = patcher.patch_source(SAMPLE).unwrap();

        assert!(patched.contains(
            r#""mods/"), { withFileTypes: true }).filter((dir) => dir.name !== "__folder_managed_by_vortex")"#
        ));
        assert_eq!(patched.matches(MANAGED_FOLDER).count(), 1);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let patcher = GetModsPatcher::new();
        let patched = patcher.patch_source(SAMPLE).unwrap();

        assert_eq!(patcher.patch_source(&patched), Err(FixOutcome::AlreadyPatched));
    }

    #[test]
    fn test_patch_without_get_mods() {
        let patcher = GetModsPatcher::new();
        assert_eq!(
            patcher.patch_source("function other() { return 1; }"),
            Err(FixOutcome::AnchorNotFound)
        );
    }

    #[test]
    fn test_call_site_outside_get_mods_is_ignored() {
        let patcher = GetModsPatcher::new();
        let source = r#"getMods() { return []; }
load() { fs.readdirSync(path.join(dir, "mods/"), { withFileTypes: true }); }"#;
        assert_eq!(patcher.patch_source(source), Err(FixOutcome::AnchorNotFound));
    }
}
