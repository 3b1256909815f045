//! Persisted prompt state
//!
//! One boolean, process-wide, surviving restarts: whether the
//! environment-marker setup prompt has already been shown. Kept as an
//! explicit injected store rather than ambient global state so the
//! orchestrator's prompt flow is directly testable.

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Flags {
    #[serde(default)]
    env_prompted: bool,
}

/// File-backed consent/prompt flags.
#[derive(Debug, Clone)]
pub struct PromptState {
    path: PathBuf,
}

pub fn default_state_path() -> Result<PathBuf> {
    let data_dir = directories::ProjectDirs::from("", "", "wslgate")
        .context("Could not determine data directory")?
        .data_dir()
        .to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("state.json"))
}

impl PromptState {
    pub fn open_default() -> Result<Self> {
        Ok(Self::at_path(default_state_path()?))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Whether the environment-marker prompt was already shown. Read
    /// failures count as "not prompted" so the worst case is one extra
    /// prompt, never a lost one.
    pub fn env_prompted(&self) -> bool {
        self.read().map(|f| f.env_prompted).unwrap_or(false)
    }

    pub fn set_env_prompted(&self, value: bool) -> Result<()> {
        let mut flags = self.read().unwrap_or_default();
        flags.env_prompted = value;
        self.write(&flags)
    }

    fn read(&self) -> Result<Flags> {
        if !self.path.exists() {
            return Ok(Flags::default());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut content = String::new();
        let mut reader = std::io::BufReader::new(&file);
        reader.read_to_string(&mut content)?;

        file.unlock()?;

        if content.is_empty() {
            return Ok(Flags::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state at {}", self.path.display()))
    }

    fn write(&self, flags: &Flags) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        file.lock_exclusive()?;

        let content = serde_json::to_string_pretty(flags)?;
        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(content.as_bytes())?;

        file.unlock()?;

        Ok(())
    }
}
