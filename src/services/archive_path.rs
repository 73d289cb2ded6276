//! Helpers for archive-relative paths as reported by the host.
//!
//! Archive listings may use either separator and mark directories with a trailing one.
//! Everything here works on `/`-normalised strings so results do not depend on the
//! platform the extension runs on.

use camino::Utf8Path;

/// Replace `\` with `/`.
pub fn normalize(file: &str) -> String {
    file.replace('\\', "/")
}

/// Directory-only entries end in a separator.
pub fn is_directory_entry(file: &str) -> bool {
    file.ends_with('/')
}

/// Lowercase extension of the last component, with the leading dot.
///
/// Dot-files (`.js`) have no extension.
pub fn extension_of(file: &str) -> Option<String> {
    let normalized = normalize(file);
    Utf8Path::new(normalized.trim_end_matches('/'))
        .extension()
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Last path component, ignoring a trailing separator.
pub fn basename(file: &str) -> &str {
    let trimmed = file.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
}

/// Whether the entry lives inside a subdirectory of the archive.
pub fn has_parent_dir(file: &str) -> bool {
    normalize(file).trim_end_matches('/').contains('/')
}

/// First path component.
pub fn leading_segment(file: &str) -> &str {
    file.split(['/', '\\']).next().unwrap_or(file)
}

/// File stem of a mod path's basename, used to name mods in notifications.
pub fn mod_display_name(mod_path: &str) -> String {
    let name = basename(mod_path);
    Utf8Path::new(name)
        .file_stem()
        .unwrap_or(name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("mods/a/a.JS"), Some(".js".to_string()));
        assert_eq!(extension_of("Plugin.dll"), Some(".dll".to_string()));
        assert_eq!(extension_of("folder\\Config.Cfg"), Some(".cfg".to_string()));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of(".js"), None);
        assert_eq!(extension_of("mods/"), None);
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("a/b/c.dll"), "c.dll");
        assert_eq!(basename("a\\b\\c.dll"), "c.dll");
        assert_eq!(basename("c.dll"), "c.dll");
        assert_eq!(basename("a/b/"), "b");
    }

    #[test]
    fn test_has_parent_dir() {
        assert!(has_parent_dir("Mods/a.dll"));
        assert!(has_parent_dir("Mods\\a.dll"));
        assert!(!has_parent_dir("a.dll"));
        assert!(!has_parent_dir("Mods/"));
    }

    #[test]
    fn test_leading_segment() {
        assert_eq!(leading_segment("assets/img/a.png"), "assets");
        assert_eq!(leading_segment("a.js"), "a.js");
    }

    #[test]
    fn test_mod_display_name() {
        assert_eq!(mod_display_name("C:\\Downloads\\Cool Mod-12-1-0.zip"), "Cool Mod-12-1-0");
        assert_eq!(mod_display_name("/tmp/install/Cool Mod.installing"), "Cool Mod");
        assert_eq!(mod_display_name("plain"), "plain");
    }
}
