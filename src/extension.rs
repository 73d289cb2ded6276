//! Extension entry point and the callbacks registered with the host.
//!
//! [`init_extension`] registers:
//! - the game ([`VampireSurvivorsGame`]): discovery, mod path and setup
//! - one [`EngineInstaller`] per engine generation
//! - the `did-install-mod` listener ([`GetModsFixer`])
//!
//! The engine generation is never cached. Setup and both installers probe the
//! discovered game root when they run and pass the result down explicitly.

use crate::host::{
    Discovery, ExtensionApi, ExtensionContext, GameSupport, ModInstalledListener, ModInstaller,
    Notification, NotificationKind,
};
use crate::models::{
    EngineGeneration, FixOutcome, GAME_ID, GameDescriptor, InstallResult, SupportConfig,
    SupportedResult, VAMPIRE_SURVIVORS,
};
use crate::services::{
    GetModsPatcher, PatternVars, detect_engine, detect_engine_or_old, engine_mismatch_warning,
    ensure_loader, find_game, is_supported, map_files, resolve_pattern,
};
use anyhow::Result;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

/// Installer name for old engine archives.
pub const OLD_ENGINE_INSTALLER: &str = "vampiresurvivors-oldengine-mod";

/// Installer name for new engine archives.
pub const NEW_ENGINE_INSTALLER: &str = "vampiresurvivors-newengine-mod";

/// Priority of both installers.
pub const INSTALLER_PRIORITY: i32 = 25;

/// Register the game, installers and listeners with `context`.
pub fn init_extension(context: &mut dyn ExtensionContext, config: SupportConfig) -> bool {
    let api = context.api();
    let config = Arc::new(config);

    context.register_game(Arc::new(VampireSurvivorsGame::new(api.clone(), config.clone())));

    for engine in [EngineGeneration::Old, EngineGeneration::New] {
        let installer = EngineInstaller::new(engine, api.clone(), config.clone());
        context.register_installer(installer.name(), INSTALLER_PRIORITY, Arc::new(installer));
    }

    if config.patch_mods_on_install {
        context.on_did_install_mod(Arc::new(GetModsFixer::new(api, config)));
    }

    tracing::info!("Registered {} support", VAMPIRE_SURVIVORS.name);
    true
}

/// Game callbacks for Vampire Survivors.
pub struct VampireSurvivorsGame {
    api: Arc<dyn ExtensionApi>,
    config: Arc<SupportConfig>,
}

impl VampireSurvivorsGame {
    pub fn new(api: Arc<dyn ExtensionApi>, config: Arc<SupportConfig>) -> Self {
        Self { api, config }
    }
}

#[async_trait]
impl GameSupport for VampireSurvivorsGame {
    fn descriptor(&self) -> &GameDescriptor {
        &VAMPIRE_SURVIVORS
    }

    async fn query_path(&self) -> Result<Utf8PathBuf> {
        let path = tokio::task::spawn_blocking(find_game).await??;
        Ok(path)
    }

    fn query_mod_path(&self, game_path: &Utf8Path) -> Utf8PathBuf {
        match &self.config.mod_path_template {
            Some(template) => {
                let vars = PatternVars::for_game(Some(game_path));
                Utf8PathBuf::from(resolve_pattern(template, &vars))
            }
            None => Utf8PathBuf::new(),
        }
    }

    async fn setup(&self, discovery: &Discovery) -> Result<()> {
        let engine = detect_engine(&discovery.path).await;
        tracing::info!("[mod-setup] {} engine at {}", engine, discovery.path);

        let present = ensure_loader(self.api.as_ref(), &discovery.path, engine).await;
        tracing::info!("[mod-setup] {} present: {}", engine.loader().name, present);
        Ok(())
    }
}

/// Archive installer for one engine generation.
pub struct EngineInstaller {
    engine: EngineGeneration,
    api: Arc<dyn ExtensionApi>,
    config: Arc<SupportConfig>,
}

impl EngineInstaller {
    pub fn new(engine: EngineGeneration, api: Arc<dyn ExtensionApi>, config: Arc<SupportConfig>) -> Self {
        Self { engine, api, config }
    }

    pub fn name(&self) -> &'static str {
        match self.engine {
            EngineGeneration::Old => OLD_ENGINE_INSTALLER,
            EngineGeneration::New => NEW_ENGINE_INSTALLER,
        }
    }

    pub fn engine(&self) -> EngineGeneration {
        self.engine
    }

    /// Classify against an explicitly detected engine.
    pub fn test_with_engine(
        &self,
        files: &[String],
        game_id: &str,
        mod_path: &str,
        detected: EngineGeneration,
    ) -> SupportedResult {
        let supported = is_supported(files, game_id, self.engine);

        if supported
            && self.config.engine_mismatch_warnings
            && let Some(warning) = engine_mismatch_warning(self.engine, detected, mod_path)
        {
            tracing::warn!("[{}-e] {}", self.engine, warning.title);
            self.api.send_notification(warning);
        }

        tracing::info!("[{}-e] supported state: {}", self.engine, supported);
        SupportedResult::new(supported)
    }
}

#[async_trait]
impl ModInstaller for EngineInstaller {
    async fn test_supported(
        &self,
        files: &[String],
        game_id: &str,
        mod_path: &str,
    ) -> Result<SupportedResult> {
        let game_root = self.api.discovered_game_path(GAME_ID);
        let detected = detect_engine_or_old(game_root.as_deref()).await;
        Ok(self.test_with_engine(files, game_id, mod_path, detected))
    }

    async fn install(&self, files: &[String]) -> Result<InstallResult> {
        let copies = map_files(files, self.engine);
        tracing::info!("[install] {} instructions for {} files", copies.len(), files.len());
        Ok(InstallResult::from_copies(copies))
    }
}

/// Applies the `getMods` fix to freshly installed mods.
pub struct GetModsFixer {
    api: Arc<dyn ExtensionApi>,
    config: Arc<SupportConfig>,
    patcher: GetModsPatcher,
}

impl GetModsFixer {
    pub fn new(api: Arc<dyn ExtensionApi>, config: Arc<SupportConfig>) -> Self {
        Self {
            api,
            config,
            patcher: GetModsPatcher::new(),
        }
    }

    /// Installed tree of `mod_id`, if the host knows it.
    fn resolve_mod_root(&self, game_id: &str, mod_id: &str) -> Option<Utf8PathBuf> {
        let install_path = self.api.install_path_for_game(game_id)?;
        let mod_path = self.api.mod_installation_path(game_id, mod_id)?;
        Some(install_path.join(mod_path))
    }

    /// Run the fix for one installed mod. Failures are logged, never returned.
    pub async fn fix(&self, game_id: &str, mod_id: &str) -> Option<FixOutcome> {
        let mod_root = self.resolve_mod_root(game_id, mod_id)?;
        tracing::info!("[old-e] fixing mod \"{}\" at {}", mod_id, mod_root);

        match self.patcher.fix_mod(&mod_root).await {
            Ok(FixOutcome::Fixed) => {
                tracing::info!("[old-e] fixed mod \"{}\"", mod_id);
                self.api.send_notification(Notification::new(
                    format!("fix_success_{}", mod_id),
                    NotificationKind::Info,
                    "Fixed Mod",
                    format!("Successfully fixed Mod: \"{}\"", mod_id),
                ));
                Some(FixOutcome::Fixed)
            }
            Ok(outcome) => {
                tracing::debug!("[old-e] mod \"{}\" not patched: {:?}", mod_id, outcome);
                if outcome == FixOutcome::AnchorNotFound {
                    self.report_failure(mod_id, "the getMods call-site was not found");
                }
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!("[old-e] could not fix mod \"{}\": {:#}", mod_id, e);
                self.report_failure(mod_id, &format!("{:#}", e));
                None
            }
        }
    }

    fn report_failure(&self, mod_id: &str, reason: &str) {
        if !self.config.notify_on_patch_failure {
            return;
        }
        self.api.send_notification(Notification::new(
            format!("fix_failed_{}", mod_id),
            NotificationKind::Warning,
            "Mod Not Fixed",
            format!("Could not fix Mod \"{}\": {}", mod_id, reason),
        ));
    }
}

#[async_trait]
impl ModInstalledListener for GetModsFixer {
    async fn did_install_mod(&self, game_id: &str, archive_id: &str, mod_id: &str) {
        if game_id != GAME_ID {
            return;
        }
        tracing::debug!("[did-install-mod] archive {} -> mod {}", archive_id, mod_id);
        self.fix(game_id, mod_id).await;
    }
}
