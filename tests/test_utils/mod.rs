//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mocks;

use std::path::PathBuf;
use tempfile::TempDir;
use wslgate::history::LocationHistory;
use wslgate::state::PromptState;

/// Temp-dir-backed stores; keep the TempDir alive for the test's duration.
pub fn temp_stores() -> (TempDir, PromptState, LocationHistory) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let state = PromptState::at_path(dir.path().join("state.json"));
    let history = LocationHistory::at_path(dir.path().join("locations.json"));
    (dir, state, history)
}

pub fn temp_file(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
