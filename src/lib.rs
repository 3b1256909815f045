//! wslgate - Remote WSL target manager
//!
//! This library crate exposes internal modules for integration testing.

pub mod authority;
pub mod config;
pub mod data;
pub mod error;
pub mod history;
pub mod host;
pub mod interaction;
pub mod session;
pub mod state;
pub mod wsl;
