//! `{placeholder}` expansion for templated mod paths.
//!
//! Supported placeholders: `{gamePath}`, `{documents}`, `{localAppData}`, `{appData}`.
//! Unknown or unavailable placeholders expand to an empty string.

use camino::Utf8Path;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("Invalid placeholder regex"));

/// Values available to path templates.
#[derive(Debug, Clone, Default)]
pub struct PatternVars {
    vars: HashMap<&'static str, String>,
}

impl PatternVars {
    /// Variables for `game_path` and the current user's folders.
    ///
    /// `localAppData` honours the `LOCALAPPDATA` environment variable before falling
    /// back to the platform's local data directory.
    pub fn for_game(game_path: Option<&Utf8Path>) -> Self {
        let mut vars = HashMap::new();

        if let Some(path) = game_path {
            vars.insert("gamePath", path.to_string());
        }

        let base = directories::BaseDirs::new();
        let local_app_data = std::env::var("LOCALAPPDATA").ok().or_else(|| {
            base.as_ref()
                .and_then(|b| b.data_local_dir().to_str().map(str::to_string))
        });
        if let Some(dir) = local_app_data {
            vars.insert("localAppData", dir);
        }
        if let Some(dir) = base.as_ref().and_then(|b| b.data_dir().to_str()) {
            vars.insert("appData", dir.to_string());
        }
        if let Some(dir) = directories::UserDirs::new()
            .as_ref()
            .and_then(|u| u.document_dir())
            .and_then(|d| d.to_str())
        {
            vars.insert("documents", dir.to_string());
        }

        Self { vars }
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.vars.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Expand every `{name}` in `pattern`.
pub fn resolve_pattern(pattern: &str, vars: &PatternVars) -> String {
    PLACEHOLDER
        .replace_all(pattern, |caps: &regex::Captures<'_>| {
            vars.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}
