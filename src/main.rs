//! VS Support - command line driver for the Vampire Survivors extension.
//!
//! Runs the extension against a local game directory through the in-process
//! [`StandaloneHost`], the same way the mod manager would call it:
//!
//! - `discover`: locate the game through Steam or the registry
//! - `setup <game-dir> [--open-links]`: detect the engine and check for its loader,
//!   optionally opening the download page of a missing loader
//! - `classify <game-dir> <files...>`: pick the installer for an archive listing
//! - `plan <old|new> <files...>`: print the copy instructions as YAML
//! - `fix <mod-dir>`: apply the `getMods` fix to an installed old engine mod
//!
//! Settings are read from `VS Support Data/VS Support.yaml` unless `--config-dir` is given.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use vs_support::host::{Discovery, NotificationKind, StandaloneContext, StandaloneHost};
use vs_support::models::{EngineGeneration, GAME_ID, InstallResult};
use vs_support::services::{GetModsPatcher, find_game, map_files};
use vs_support::{APP_NAME, ConfigManager, VERSION, init_extension};

#[derive(Parser, Debug)]
#[command(name = "vs-support", version, about = "Vampire Survivors mod support")]
struct Cli {
    /// Directory containing VS Support.yaml
    #[arg(long, default_value = "VS Support Data")]
    config_dir: Utf8PathBuf,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate the game install
    Discover,
    /// Prepare a game install for modding
    Setup {
        game_dir: Utf8PathBuf,
        /// Open the download page of a missing loader
        #[arg(long)]
        open_links: bool,
    },
    /// Select the installer for an archive listing
    Classify {
        game_dir: Utf8PathBuf,
        #[arg(long, default_value = "")]
        mod_path: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Print copy instructions for an archive listing
    Plan {
        engine: EngineArg,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Fix the getMods call in an installed old engine mod
    Fix { mod_dir: Utf8PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    Old,
    New,
}

impl From<EngineArg> for EngineGeneration {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Old => EngineGeneration::Old,
            EngineArg::New => EngineGeneration::New,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let mut config = config_manager.load()?;
    config.debug_mode |= cli.debug;

    let _guard = vs_support::logging::setup_logging_from_config(&config)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run(cli.command, config))
}

async fn run(command: Command, config: vs_support::SupportConfig) -> Result<()> {
    match command {
        Command::Discover => {
            let path = tokio::task::spawn_blocking(find_game).await??;
            println!("{}", path);
        }
        Command::Setup {
            game_dir,
            open_links,
        } => {
            let host = Arc::new(StandaloneHost::new().with_game_path(GAME_ID, game_dir.clone()));
            let mut context = StandaloneContext::new(host.clone());
            init_extension(&mut context, config);

            let game = context
                .game(GAME_ID)
                .context("Game was not registered")?;
            game.setup(&Discovery { path: game_dir }).await?;
            print_notifications(&host);

            if open_links {
                for notification in host.notifications() {
                    if notification.kind == NotificationKind::Warning {
                        host.trigger_actions(&notification.id);
                    }
                }
            }
        }
        Command::Classify {
            game_dir,
            mod_path,
            files,
        } => {
            let host = Arc::new(StandaloneHost::new().with_game_path(GAME_ID, game_dir));
            let mut context = StandaloneContext::new(host.clone());
            init_extension(&mut context, config);

            match context.install(&files, GAME_ID, &mod_path).await? {
                Some((name, result)) => {
                    println!("installer: {}", name);
                    print_plan(&result)?;
                }
                None => println!("no installer supports these files"),
            }
            print_notifications(&host);
        }
        Command::Plan { engine, files } => {
            let result = InstallResult::from_copies(map_files(&files, engine.into()));
            print_plan(&result)?;
        }
        Command::Fix { mod_dir } => {
            let outcome = GetModsPatcher::new().fix_mod(&mod_dir).await?;
            println!("{:?}", outcome);
        }
    }
    Ok(())
}

fn print_plan(result: &InstallResult) -> Result<()> {
    let yaml = serde_yaml_ng::to_string(result).context("Failed to serialize instructions")?;
    print!("{}", yaml);
    Ok(())
}

fn print_notifications(host: &StandaloneHost) {
    for notification in host.notifications() {
        println!("[{:?}] {}: {}", notification.kind, notification.title, notification.message);
        for action in &notification.actions {
            println!("    {} -> {}", action.title, action.url);
        }
    }
}
