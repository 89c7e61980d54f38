//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod types;

pub use types::{InputConfig, LoggingConfig, TextureConfig, WindowConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Input collection configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Texture marshaling configuration
    #[serde(default)]
    pub texture: TextureConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.window.width <= 0 || self.window.height <= 0 {
            anyhow::bail!(
                "Invalid window size: {}x{}",
                self.window.width,
                self.window.height
            );
        }

        if self.window.title.contains('\0') {
            anyhow::bail!("Window title cannot contain NUL bytes");
        }

        if !self.input.scan_limit_valid() {
            anyhow::bail!(
                "key_scan_limit ({}) must be between 1 and 512",
                self.input.key_scan_limit
            );
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(
        mut self,
        width: Option<i32>,
        height: Option<i32>,
        title: Option<String>,
    ) -> Self {
        if let Some(width) = width {
            self.window.width = width;
        }
        if let Some(height) = height {
            self.window.height = height;
        }
        if let Some(title) = title {
            self.window.title = title;
        }

        self
    }
}
