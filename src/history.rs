//! Remote location history
//!
//! Persisted store of authority+path entries with last-accessed timestamps,
//! appended on every successful folder open. Atomic read/modify/write via
//! advisory file locks; entries are never deleted automatically.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationHistoryEntry {
    pub authority: String,
    pub path: String,
    pub last_accessed: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    entries: Vec<LocationHistoryEntry>,
}

/// File-backed location history, keyed by authority+path.
#[derive(Debug, Clone)]
pub struct LocationHistory {
    path: PathBuf,
}

/// Get the default history file path under the project data dir.
pub fn default_history_path() -> Result<PathBuf> {
    let data_dir = directories::ProjectDirs::from("", "", "wslgate")
        .context("Could not determine data directory")?
        .data_dir()
        .to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("locations.json"))
}

impl LocationHistory {
    pub fn open_default() -> Result<Self> {
        Ok(Self::at_path(default_history_path()?))
    }

    /// History rooted at an explicit file, for tests and overrides.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// All recorded entries, most recently accessed first.
    pub fn entries(&self) -> Result<Vec<LocationHistoryEntry>> {
        let mut entries = self.read()?.entries;
        entries.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
        Ok(entries)
    }

    /// Record a successful folder open. An existing authority+path entry
    /// gets its timestamp refreshed; otherwise a new entry is appended.
    pub fn add(&self, authority: &str, path: &str) -> Result<()> {
        let mut file = self.read()?;

        let now = Utc::now();
        match file
            .entries
            .iter_mut()
            .find(|e| e.authority == authority && e.path == path)
        {
            Some(entry) => entry.last_accessed = now,
            None => file.entries.push(LocationHistoryEntry {
                authority: authority.to_string(),
                path: path.to_string(),
                last_accessed: now,
            }),
        }

        self.write(&file)
    }

    fn read(&self) -> Result<HistoryFile> {
        if !self.path.exists() {
            return Ok(HistoryFile::default());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut content = String::new();
        let mut reader = std::io::BufReader::new(&file);
        reader.read_to_string(&mut content)?;

        file.unlock()?;

        if content.is_empty() {
            return Ok(HistoryFile::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history at {}", self.path.display()))
    }

    fn write(&self, data: &HistoryFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        file.lock_exclusive()?;

        let content = serde_json::to_string_pretty(data)?;
        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(content.as_bytes())?;

        file.unlock()?;

        Ok(())
    }
}
