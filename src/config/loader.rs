use super::types::InventoryConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Reads and writes the session config file.
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load the config, writing the defaults out when no file exists yet.
    pub fn load(&self) -> Result<InventoryConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, creating default config at {:?}",
                self.config_path
            );
            let config = InventoryConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&self.config_path)
            .context("Failed to read config file")?;

        let config: InventoryConfig = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        info!("Loaded configuration from {:?}", self.config_path);
        Ok(config)
    }

    pub fn save(&self, config: &InventoryConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(config)
            .context("Failed to serialize config")?;

        fs::write(&self.config_path, toml_string)
            .context("Failed to write config file")?;

        info!("Saved configuration to {:?}", self.config_path);
        Ok(())
    }
}
