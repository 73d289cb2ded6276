//! Game install discovery.
//!
//! Looks the game up in the Steam libraries first. On Windows, the Steam uninstall
//! registry entry is used as a fallback for installs Steam's library files do not list.

use crate::models::STEAM_APP_ID;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while locating the game
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Game installation path not found (Steam app {0})")]
    NotFound(u32),

    #[error("Game path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Find the game install root.
///
/// # Errors
///
/// Returns [`DiscoveryError::NotFound`] when neither Steam nor the registry know the game.
pub fn find_game() -> Result<Utf8PathBuf, DiscoveryError> {
    match find_in_steam(STEAM_APP_ID) {
        Ok(path) => {
            tracing::info!("[find-game] found in Steam library: {}", path);
            return Ok(path);
        }
        Err(e) => tracing::debug!("[find-game] Steam lookup failed: {}", e),
    }

    match find_in_registry(STEAM_APP_ID) {
        Some(path) => {
            tracing::info!("[find-game] found in registry: {}", path);
            Ok(path)
        }
        None => {
            tracing::error!("[find-game] game path not found");
            Err(DiscoveryError::NotFound(STEAM_APP_ID))
        }
    }
}

/// Resolve an app's install directory through the Steam library folders.
fn find_in_steam(app_id: u32) -> anyhow::Result<Utf8PathBuf> {
    let steam_dir = steamlocate::SteamDir::locate()?;

    if let Some((app, library)) = steam_dir.find_app(app_id).ok().flatten() {
        let path = library.resolve_app_dir(&app);
        if path.exists() {
            return Utf8PathBuf::from_path_buf(path)
                .map_err(|p| DiscoveryError::NonUtf8Path(p.display().to_string()).into());
        }
    }

    Err(DiscoveryError::NotFound(app_id).into())
}

/// Registry key of the Steam uninstall entry for `app_id`.
pub fn uninstall_registry_key(app_id: u32) -> String {
    format!(
        r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall\Steam App {}",
        app_id
    )
}

#[cfg(windows)]
fn find_in_registry(app_id: u32) -> Option<Utf8PathBuf> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm.open_subkey(uninstall_registry_key(app_id)).ok()?;
    let location: String = key.get_value("InstallLocation").ok()?;

    if location.is_empty() {
        None
    } else {
        Some(Utf8PathBuf::from(location))
    }
}

#[cfg(not(windows))]
fn find_in_registry(_app_id: u32) -> Option<Utf8PathBuf> {
    None
}
