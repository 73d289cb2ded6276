use serde::{Deserialize, Serialize};

/// Extension settings from `VS Support.yaml`.
///
/// Every field has a default so a partial or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Log at debug level instead of info.
    pub debug_mode: bool,

    /// Mirror log output to the console.
    pub log_to_console: bool,

    /// Directory for rotating log files.
    pub log_dir: String,

    /// Warn when a mod targets the other engine generation.
    pub engine_mismatch_warnings: bool,

    /// Run the `getMods` fix after each install.
    pub patch_mods_on_install: bool,

    /// Send a warning notification when the `getMods` fix cannot be applied.
    pub notify_on_patch_failure: bool,

    /// Optional mod path template, e.g. `{gamePath}/resources`. Empty means the game root.
    pub mod_path_template: Option<String>,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_to_console: false,
            log_dir: default_log_dir(),
            engine_mismatch_warnings: true,
            patch_mods_on_install: true,
            notify_on_patch_failure: false,
            mod_path_template: None,
        }
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}
