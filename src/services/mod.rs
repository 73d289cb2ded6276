//! Services module - the policy logic behind the host callbacks.
//!
//! Everything here is independent of the host: inputs are explicit parameters (file lists,
//! game roots, the detected [`EngineGeneration`](crate::models::EngineGeneration)) and the
//! only host capability used is [`ExtensionApi`](crate::host::ExtensionApi) for notifications.
//!
//! # Components
//!
//! - [`engine`]: detects the installed engine generation from `UnityCrashHandler64.exe`
//! - [`loader`]: prepares the loader folder and warns when the loader is missing
//! - [`classifier`]: decides whether an archive is old or new engine content
//! - [`mapper`]: turns an archive listing into copy instructions
//! - [`patcher`]: fixes the `getMods` readdir call in installed old engine mods
//! - [`discovery`]: locates the game through Steam or the registry
//! - [`path_pattern`]: expands `{gamePath}`-style templates

pub mod archive_path;
pub mod classifier;
pub mod discovery;
pub mod engine;
pub mod loader;
pub mod mapper;
pub mod patcher;
pub mod path_pattern;

pub use classifier::{engine_mismatch_warning, is_new_engine_content, is_old_engine_content, is_supported};
pub use discovery::{DiscoveryError, find_game};
pub use engine::{detect_engine, detect_engine_or_old};
pub use loader::ensure_loader;
pub use mapper::{map_files, map_new_engine, map_old_engine, old_engine_prefix};
pub use patcher::{GetModsPatcher, MANAGED_FOLDER, find_main_mod_file, find_mods_folder};
pub use path_pattern::{PatternVars, resolve_pattern};
