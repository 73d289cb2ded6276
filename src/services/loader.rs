use crate::host::{ExtensionApi, Notification, NotificationAction, NotificationKind};
use crate::models::{EngineGeneration, LoaderSpec};
use anyhow::{Context, Result};
use camino::Utf8Path;

/// Prepare the loader directory for `engine` and report whether its loader is installed.
///
/// Creates the loader's writable directory if needed, then checks for the loader's marker
/// file. When the loader is missing, or the directory cannot be created, a deduplicated
/// warning with a download link is sent and `false` is returned. Never fails.
pub async fn ensure_loader(
    api: &dyn ExtensionApi,
    game_root: &Utf8Path,
    engine: EngineGeneration,
) -> bool {
    let loader = engine.loader();

    if let Err(e) = ensure_writable_dir(loader, game_root).await {
        tracing::warn!("[check-loader] {:#}", e);
        notify_missing(api, loader);
        return false;
    }

    check_existence(api, loader, game_root).await
}

async fn ensure_writable_dir(loader: &LoaderSpec, game_root: &Utf8Path) -> Result<()> {
    let dir = loader.writable_dir_in(game_root);
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {} directory: {}", loader.name, dir))?;
    tracing::debug!("Ensured {} directory: {}", loader.name, dir);
    Ok(())
}

/// Check the loader's marker file, notifying when it is absent.
pub async fn check_existence(api: &dyn ExtensionApi, loader: &LoaderSpec, game_root: &Utf8Path) -> bool {
    let marker = loader.marker_in(game_root);

    match tokio::fs::metadata(&marker).await {
        Ok(meta) if meta.is_file() => {
            tracing::info!("[check-loader] {} found at {}", loader.name, marker);
            true
        }
        _ => {
            tracing::info!("[check-loader] {}", loader.missing_notification_id());
            notify_missing(api, loader);
            false
        }
    }
}

fn notify_missing(api: &dyn ExtensionApi, loader: &LoaderSpec) {
    api.send_notification(
        Notification::new(
            loader.missing_notification_id(),
            NotificationKind::Warning,
            format!("{} not found", loader.name),
            format!("{} is necessary for modding. Please install it.", loader.name),
        )
        .with_action(NotificationAction::open_url(
            format!("Get {}", loader.name),
            loader.url,
        )),
    );
}
