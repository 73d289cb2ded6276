// VS Support - Vampire Survivors game support for mod managers
//
// This is the library crate holding the extension: game discovery, the old/new engine
// installers and the post-install fix for old engine mods. The binary crate (main.rs)
// drives it against a local game directory.

pub mod config;
pub mod extension;
pub mod host;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use extension::{EngineInstaller, GetModsFixer, VampireSurvivorsGame, init_extension};
pub use host::{ExtensionApi, ExtensionContext, Notification, NotificationKind};
pub use models::{CopyInstruction, EngineGeneration, FixOutcome, SupportConfig, SupportedResult};

/// Extension version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
