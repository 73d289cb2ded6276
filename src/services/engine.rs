//! Engine generation detection.
//!
//! The Unity build ships `UnityCrashHandler64.exe` next to the game executable; the old
//! Electron build does not. The presence of that file is the only signal used.

use crate::models::{ENGINE_SENTINEL, EngineGeneration};
use camino::Utf8Path;

/// Detect which engine generation is installed under `game_root`.
///
/// Never fails: a missing sentinel, or any error probing it, means [`EngineGeneration::Old`].
pub async fn detect_engine(game_root: &Utf8Path) -> EngineGeneration {
    let sentinel = game_root.join(ENGINE_SENTINEL);

    match tokio::fs::metadata(&sentinel).await {
        Ok(_) => {
            tracing::debug!("Found {}, new engine", sentinel);
            EngineGeneration::New
        }
        Err(e) => {
            tracing::debug!("No engine sentinel at {} ({}), old engine", sentinel, e);
            EngineGeneration::Old
        }
    }
}

/// Detect the engine for an optional root; undiscovered games count as old engine.
pub async fn detect_engine_or_old(game_root: Option<&Utf8Path>) -> EngineGeneration {
    match game_root {
        Some(root) => detect_engine(root).await,
        None => EngineGeneration::Old,
    }
}
