use crate::models::SupportConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the settings file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "VS Support.yaml";

/// Prefix for environment variable overrides, e.g. `VS_SUPPORT_DEBUG_MODE=true`.
pub const ENV_PREFIX: &str = "VS_SUPPORT";

/// Configuration manager for loading and saving the extension settings.
///
/// Settings are read from `VS Support.yaml` and layered under `VS_SUPPORT_*`
/// environment variables. A missing file yields the defaults.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing `VS Support.yaml`
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the settings, applying environment overrides.
    ///
    /// # Returns
    /// The loaded SupportConfig, or defaults for every missing key
    pub fn load(&self) -> Result<SupportConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::new(self.config_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: SupportConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the settings file.
    ///
    /// # Arguments
    /// * `config` - The SupportConfig to save
    pub fn save(&self, config: &SupportConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
