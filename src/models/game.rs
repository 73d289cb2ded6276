use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Host-facing game id.
pub const GAME_ID: &str = "vampiresurvivors";

/// Display name shown by the host.
pub const GAME_NAME: &str = "Vampire Survivors";

/// Game executable, relative to the install root.
pub const GAME_EXE: &str = "VampireSurvivors.exe";

/// Steam app id, as a number for library lookups.
pub const STEAM_APP_ID: u32 = 1_794_680;

/// Unity crash handler shipped only with the new engine build.
pub const ENGINE_SENTINEL: &str = "UnityCrashHandler64.exe";

/// Static description of the supported game.
///
/// Registered once with the host and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub executable: &'static str,
    pub steam_app_id: u32,
    pub nexus_page_id: &'static str,
    pub logo: &'static str,
    pub required_files: &'static [&'static str],
    pub merge_mods: bool,
    pub requires_cleanup: bool,
    /// Environment variables the host sets when launching the game.
    pub environment: &'static [(&'static str, &'static str)],
}

/// The Vampire Survivors descriptor.
pub const VAMPIRE_SURVIVORS: GameDescriptor = GameDescriptor {
    id: GAME_ID,
    name: GAME_NAME,
    executable: GAME_EXE,
    steam_app_id: STEAM_APP_ID,
    nexus_page_id: "vampiresurvivors",
    logo: "gameart.jpg",
    required_files: &[GAME_EXE],
    merge_mods: true,
    requires_cleanup: true,
    environment: &[("SteamAPPId", "1794680")],
};

/// Which build of the game is installed.
///
/// The old engine is the Electron/JavaScript build modded through the VS Mod Loader;
/// the new engine is the Unity build modded through MelonLoader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineGeneration {
    Old,
    New,
}

impl EngineGeneration {
    /// Loader required to run mods on this engine.
    pub fn loader(self) -> &'static LoaderSpec {
        match self {
            EngineGeneration::Old => &MOD_LOADER,
            EngineGeneration::New => &MELON_LOADER,
        }
    }

    pub fn is_new(self) -> bool {
        self == EngineGeneration::New
    }
}

impl fmt::Display for EngineGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineGeneration::Old => write!(f, "old"),
            EngineGeneration::New => write!(f, "new"),
        }
    }
}

/// Where a mod loader lives and how to tell whether it is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSpec {
    pub name: &'static str,
    pub url: &'static str,
    /// Loader directory, relative to the game root.
    pub directory: &'static [&'static str],
    /// Directory created before the presence check, relative to the game root.
    pub writable_dir: &'static [&'static str],
    /// File inside `directory` whose presence means the loader is installed.
    pub marker: &'static str,
}

impl LoaderSpec {
    /// Absolute loader directory under `game_root`.
    pub fn directory_in(&self, game_root: &Utf8Path) -> Utf8PathBuf {
        join_all(game_root, self.directory)
    }

    /// Absolute writable directory under `game_root`.
    pub fn writable_dir_in(&self, game_root: &Utf8Path) -> Utf8PathBuf {
        join_all(game_root, self.writable_dir)
    }

    /// Absolute marker path under `game_root`.
    pub fn marker_in(&self, game_root: &Utf8Path) -> Utf8PathBuf {
        self.directory_in(game_root).join(self.marker)
    }

    /// Stable notification id for the "missing" advisory.
    pub fn missing_notification_id(&self) -> String {
        format!("{}-missing", self.name.to_lowercase())
    }
}

fn join_all(root: &Utf8Path, components: &[&str]) -> Utf8PathBuf {
    components
        .iter()
        .fold(root.to_path_buf(), |path, component| path.join(component))
}

/// VS Mod Loader, used by the old engine.
pub const MOD_LOADER: LoaderSpec = LoaderSpec {
    name: "ModLoader",
    url: "https://www.nexusmods.com/vampiresurvivors/mods/64",
    directory: &["resources", "app", ".webpack", "renderer", "mod_loader"],
    writable_dir: &["resources", "app", ".webpack", "renderer", "mod_loader", "mods"],
    marker: "index.js",
};

/// MelonLoader, used by the new engine.
pub const MELON_LOADER: LoaderSpec = LoaderSpec {
    name: "MelonLoader",
    url: "https://github.com/LavaGang/MelonLoader/releases",
    directory: &["MelonLoader"],
    writable_dir: &["MelonLoader"],
    marker: "MelonLoader.xml",
};
