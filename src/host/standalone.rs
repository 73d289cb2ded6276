//! In-process host used by the `vs-support` binary.
//!
//! [`StandaloneHost`] answers [`ExtensionApi`] queries from the paths it was built with and
//! records every notification. Notification actions go through an action handler, which
//! defaults to [`NotificationAction::trigger`]. [`StandaloneContext`] collects registrations and dispatches
//! to them the way the mod manager would: the highest-priority (lowest number) installer
//! whose test passes installs the archive.

use super::{
    ExtensionApi, ExtensionContext, GameSupport, ModInstalledListener, ModInstaller, Notification,
    NotificationAction, NotificationKind,
};
use crate::models::InstallResult;
use anyhow::Result;
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Runs a notification action on behalf of the user.
pub type ActionHandler = Box<dyn Fn(&NotificationAction) + Send + Sync>;

/// Host state backed by plain paths.
#[derive(Default)]
pub struct StandaloneHost {
    game_paths: HashMap<String, Utf8PathBuf>,
    install_paths: HashMap<String, Utf8PathBuf>,
    mods: HashMap<(String, String), String>,
    notifications: Mutex<Vec<Notification>>,
    action_handler: Option<ActionHandler>,
}

impl StandaloneHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovered game root.
    pub fn with_game_path(mut self, game_id: &str, path: impl Into<Utf8PathBuf>) -> Self {
        self.game_paths.insert(game_id.to_string(), path.into());
        self
    }

    /// Record the folder mods for `game_id` are installed into.
    pub fn with_install_path(mut self, game_id: &str, path: impl Into<Utf8PathBuf>) -> Self {
        self.install_paths.insert(game_id.to_string(), path.into());
        self
    }

    /// Record an installed mod's folder, relative to the install path.
    pub fn with_mod(mut self, game_id: &str, mod_id: &str, installation_path: &str) -> Self {
        self.mods.insert(
            (game_id.to_string(), mod_id.to_string()),
            installation_path.to_string(),
        );
        self
    }

    /// Replace the default action handler, which opens the action's URL.
    pub fn with_action_handler(
        mut self,
        handler: impl Fn(&NotificationAction) + Send + Sync + 'static,
    ) -> Self {
        self.action_handler = Some(Box::new(handler));
        self
    }

    /// Run every action of the notification with `notification_id`.
    ///
    /// Returns the number of actions run; zero when no such notification was sent.
    pub fn trigger_actions(&self, notification_id: &str) -> usize {
        let actions = self
            .notifications()
            .into_iter()
            .find(|n| n.id == notification_id)
            .map(|n| n.actions)
            .unwrap_or_default();

        for action in &actions {
            tracing::info!("[notify] running action \"{}\": {}", action.title, action.url);
            match &self.action_handler {
                Some(handler) => handler(action),
                None => action.trigger(),
            }
        }
        actions.len()
    }

    /// Notifications sent so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl ExtensionApi for StandaloneHost {
    fn send_notification(&self, notification: Notification) {
        let Ok(mut sent) = self.notifications.lock() else {
            return;
        };
        if sent.iter().any(|n| n.id == notification.id) {
            tracing::debug!("Dropping duplicate notification {}", notification.id);
            return;
        }

        match notification.kind {
            NotificationKind::Info => tracing::info!("[notify] {}: {}", notification.title, notification.message),
            NotificationKind::Warning => tracing::warn!("[notify] {}: {}", notification.title, notification.message),
        }
        for action in &notification.actions {
            tracing::info!("[notify] action \"{}\": {}", action.title, action.url);
        }
        sent.push(notification);
    }

    fn discovered_game_path(&self, game_id: &str) -> Option<Utf8PathBuf> {
        self.game_paths.get(game_id).cloned()
    }

    fn install_path_for_game(&self, game_id: &str) -> Option<Utf8PathBuf> {
        self.install_paths.get(game_id).cloned()
    }

    fn mod_installation_path(&self, game_id: &str, mod_id: &str) -> Option<String> {
        self.mods
            .get(&(game_id.to_string(), mod_id.to_string()))
            .cloned()
    }
}

/// A registered installer.
pub struct RegisteredInstaller {
    pub priority: i32,
    pub installer: Arc<dyn ModInstaller>,
}

/// Registration collector with host-like dispatch.
pub struct StandaloneContext {
    api: Arc<StandaloneHost>,
    games: Vec<Arc<dyn GameSupport>>,
    installers: IndexMap<String, RegisteredInstaller>,
    listeners: Vec<Arc<dyn ModInstalledListener>>,
}

impl StandaloneContext {
    pub fn new(api: Arc<StandaloneHost>) -> Self {
        Self {
            api,
            games: Vec::new(),
            installers: IndexMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn host(&self) -> &StandaloneHost {
        &self.api
    }

    /// Registered game with `game_id`.
    pub fn game(&self, game_id: &str) -> Option<Arc<dyn GameSupport>> {
        self.games
            .iter()
            .find(|game| game.descriptor().id == game_id)
            .cloned()
    }

    /// Installer names in registration order.
    pub fn installer_names(&self) -> Vec<&str> {
        self.installers.keys().map(String::as_str).collect()
    }

    pub fn installer(&self, name: &str) -> Option<&RegisteredInstaller> {
        self.installers.get(name)
    }

    /// Name of the first installer, by priority then registration order, that supports `files`.
    pub async fn select_installer(&self, files: &[String], game_id: &str, mod_path: &str) -> Result<Option<String>> {
        let mut ordered: Vec<(&String, &RegisteredInstaller)> = self.installers.iter().collect();
        ordered.sort_by_key(|(_, registered)| registered.priority);

        for (name, registered) in ordered {
            if registered
                .installer
                .test_supported(files, game_id, mod_path)
                .await?
                .supported
            {
                return Ok(Some(name.clone()));
            }
        }
        Ok(None)
    }

    /// Select an installer and run it.
    pub async fn install(&self, files: &[String], game_id: &str, mod_path: &str) -> Result<Option<(String, InstallResult)>> {
        let Some(name) = self.select_installer(files, game_id, mod_path).await? else {
            return Ok(None);
        };
        let Some(registered) = self.installers.get(&name) else {
            return Ok(None);
        };
        let result = registered.installer.install(files).await?;
        Ok(Some((name, result)))
    }

    /// Fire `did-install-mod` to every listener.
    pub async fn emit_did_install_mod(&self, game_id: &str, archive_id: &str, mod_id: &str) {
        for listener in &self.listeners {
            listener.did_install_mod(game_id, archive_id, mod_id).await;
        }
    }
}

impl ExtensionContext for StandaloneContext {
    fn api(&self) -> Arc<dyn ExtensionApi> {
        self.api.clone()
    }

    fn register_game(&mut self, game: Arc<dyn GameSupport>) {
        tracing::debug!("Registered game {}", game.descriptor().id);
        self.games.push(game);
    }

    fn register_installer(&mut self, name: &str, priority: i32, installer: Arc<dyn ModInstaller>) {
        tracing::debug!("Registered installer {} (priority {})", name, priority);
        self.installers
            .insert(name.to_string(), RegisteredInstaller { priority, installer });
    }

    fn on_did_install_mod(&mut self, listener: Arc<dyn ModInstalledListener>) {
        self.listeners.push(listener);
    }
}
