use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub marker: MarkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Host editor CLI used to open remote windows.
    #[serde(default = "default_editor_command")]
    pub command: String,
}

fn default_editor_command() -> String {
    "code".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: default_editor_command(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// User-scoped environment variable a companion tool reads to detect
    /// this integration.
    #[serde(default = "default_marker_variable")]
    pub variable: String,
    /// Value written into the marker variable.
    #[serde(default = "default_integration_id")]
    pub integration_id: String,
}

fn default_marker_variable() -> String {
    "POSITRON_WSL_EXTENSION_NAME".to_string()
}

fn default_integration_id() -> String {
    "wslgate".to_string()
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            variable: default_marker_variable(),
            integration_id: default_integration_id(),
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "wslgate")
        .context("Could not determine config directory")?
        .config_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the config, falling back to defaults when no file exists.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    Ok(config)
}
