//! Data models for the Vampire Survivors support extension.
//!
//! - [`GameDescriptor`] and [`VAMPIRE_SURVIVORS`]: the static game record registered with the host
//! - [`EngineGeneration`] and [`LoaderSpec`]: the two game builds and the loader each one needs
//! - [`ExtensionRule`] tables and hierarchy templates used by the installers
//! - [`CopyInstruction`], [`InstallResult`], [`SupportedResult`]: installer inputs and outputs
//! - [`FixOutcome`]: result of the post-install `getMods` fix
//! - [`SupportConfig`]: user settings loaded from `VS Support.yaml`

pub mod config;
pub mod game;
pub mod install;

pub use config::SupportConfig;
pub use game::{
    ENGINE_SENTINEL, EngineGeneration, GAME_EXE, GAME_ID, GAME_NAME, GameDescriptor, LoaderSpec,
    MELON_LOADER, MOD_LOADER, STEAM_APP_ID, VAMPIRE_SURVIVORS,
};
pub use install::{
    CopyInstruction, ExtensionRule, FixOutcome, InstallInstruction, InstallResult,
    NEW_ENGINE_RULES, OLD_ENGINE_HIERARCHIES, OLD_ENGINE_LAYOUT_MARKERS, OLD_ENGINE_RULES,
    SupportedResult, find_rule,
};
