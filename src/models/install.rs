use serde::{Deserialize, Serialize};

/// Maps a file extension to the folder it is installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRule {
    /// Lowercase extension including the leading dot.
    pub extension: &'static str,
    /// Destination folder relative to the game root; empty for the root itself.
    pub destination: &'static str,
}

/// Extensions handled by the new engine installer, first match wins.
pub const NEW_ENGINE_RULES: &[ExtensionRule] = &[
    ExtensionRule { extension: ".dll", destination: "Mods" },
    ExtensionRule { extension: ".ttf", destination: "UserData" },
    ExtensionRule { extension: ".json", destination: "UserData" },
    ExtensionRule { extension: ".xml", destination: "UserData" },
    ExtensionRule { extension: ".cfg", destination: "UserData" },
];

/// Extensions handled by the old engine installer.
pub const OLD_ENGINE_RULES: &[ExtensionRule] = &[ExtensionRule { extension: ".js", destination: "" }];

/// Path hierarchies an old engine archive may be rooted in, checked in order.
pub const OLD_ENGINE_HIERARCHIES: &[&str] = &[
    "resources/app/.webpack/renderer/mod_loader",
    "resources/app/.webpack/renderer/assets",
    "resources/app/.webpack/renderer/main.bundle.js",
];

/// Path fragments that mark an archive as old engine content without a `.js` file.
pub const OLD_ENGINE_LAYOUT_MARKERS: &[&str] = &["renderer/", "assets/"];

/// Find the rule for `extension` (lowercase, with dot).
pub fn find_rule<'a>(rules: &'a [ExtensionRule], extension: &str) -> Option<&'a ExtensionRule> {
    rules.iter().find(|rule| rule.extension == extension)
}

/// One file to place: archive-relative source, game-relative destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyInstruction {
    pub source: String,
    pub destination: String,
}

impl CopyInstruction {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Instruction handed back to the host installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InstallInstruction {
    Copy { source: String, destination: String },
}

impl From<CopyInstruction> for InstallInstruction {
    fn from(copy: CopyInstruction) -> Self {
        InstallInstruction::Copy {
            source: copy.source,
            destination: copy.destination,
        }
    }
}

/// Result of an installer's `install` callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallResult {
    pub instructions: Vec<InstallInstruction>,
}

impl InstallResult {
    pub fn from_copies(copies: Vec<CopyInstruction>) -> Self {
        Self {
            instructions: copies.into_iter().map(InstallInstruction::from).collect(),
        }
    }
}

/// Result of an installer's `test_supported` callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedResult {
    pub supported: bool,
    #[serde(rename = "requiredFiles")]
    pub required_files: Vec<String>,
}

impl SupportedResult {
    /// This extension never requires extra archive members.
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            required_files: Vec::new(),
        }
    }
}

/// Outcome of patching an installed old engine mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The entry file was rewritten.
    Fixed,
    /// The filter was already present; nothing written.
    AlreadyPatched,
    /// `getMods` or the readdir call-site was not found.
    AnchorNotFound,
    /// No `mods/<name>/<name>.js` entry file in the installed tree.
    NoEntryFile,
}

impl FixOutcome {
    pub fn is_fixed(&self) -> bool {
        matches!(self, FixOutcome::Fixed)
    }
}
