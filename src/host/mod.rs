//! Host interface - the narrow set of calls the mod manager exposes to this extension.
//!
//! The extension never assumes anything about the host beyond these traits:
//!
//! - [`ExtensionApi`]: notifications and read access to the host's persisted paths
//! - [`ExtensionContext`]: registration of the game, installers and event listeners
//! - [`GameSupport`], [`ModInstaller`], [`ModInstalledListener`]: callbacks the extension
//!   hands to the host
//!
//! [`standalone`] provides an in-process implementation used by the `vs-support` binary.

pub mod standalone;

use crate::models::{GameDescriptor, InstallResult, SupportedResult};
use anyhow::Result;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

pub use standalone::{ActionHandler, StandaloneContext, StandaloneHost};

/// Severity of a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
}

/// A button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub title: String,
    /// Opened in the platform's default handler when the action is triggered.
    pub url: String,
}

impl NotificationAction {
    pub fn open_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Open the action's URL. Best-effort: failures are logged and swallowed.
    pub fn trigger(&self) {
        if let Err(e) = open::that(&self.url) {
            tracing::warn!("Failed to open {}: {}", self.url, e);
        }
    }
}

/// A message shown by the host.
///
/// `id` is stable per condition so the host can drop duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Result of game discovery, as passed to [`GameSupport::setup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub path: Utf8PathBuf,
}

/// Services the host offers to the extension.
pub trait ExtensionApi: Send + Sync {
    fn send_notification(&self, notification: Notification);

    /// Install root the host discovered for `game_id`, if any.
    fn discovered_game_path(&self, game_id: &str) -> Option<Utf8PathBuf>;

    /// Root folder the host installs `game_id` mods into.
    fn install_path_for_game(&self, game_id: &str) -> Option<Utf8PathBuf>;

    /// Folder of an installed mod, relative to [`install_path_for_game`](Self::install_path_for_game).
    fn mod_installation_path(&self, game_id: &str, mod_id: &str) -> Option<String>;
}

/// Game callbacks registered with the host.
#[async_trait]
pub trait GameSupport: Send + Sync {
    fn descriptor(&self) -> &GameDescriptor;

    /// Locate the game install.
    async fn query_path(&self) -> Result<Utf8PathBuf>;

    /// Mod folder relative to the game root; empty for the root itself.
    fn query_mod_path(&self, game_path: &Utf8Path) -> Utf8PathBuf;

    /// Prepare a discovered install for modding.
    async fn setup(&self, discovery: &Discovery) -> Result<()>;
}

/// An archive installer.
#[async_trait]
pub trait ModInstaller: Send + Sync {
    async fn test_supported(
        &self,
        files: &[String],
        game_id: &str,
        mod_path: &str,
    ) -> Result<SupportedResult>;

    async fn install(&self, files: &[String]) -> Result<InstallResult>;
}

/// Receives the host's `did-install-mod` event.
#[async_trait]
pub trait ModInstalledListener: Send + Sync {
    async fn did_install_mod(&self, game_id: &str, archive_id: &str, mod_id: &str);
}

/// Registration surface handed to the extension's entry point.
pub trait ExtensionContext {
    fn api(&self) -> Arc<dyn ExtensionApi>;

    fn register_game(&mut self, game: Arc<dyn GameSupport>);

    fn register_installer(&mut self, name: &str, priority: i32, installer: Arc<dyn ModInstaller>);

    fn on_did_install_mod(&mut self, listener: Arc<dyn ModInstalledListener>);
}
