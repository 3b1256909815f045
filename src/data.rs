use crate::authority::ConnectionAuthority;
use serde::{Deserialize, Serialize};

/// An installed WSL distribution as reported by the inventory query.
///
/// Records are a snapshot: they go stale immediately after the query and are
/// never mutated in place, only re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distro {
    /// Unique, case-sensitive as reported by the OS.
    pub name: String,
    pub is_default: bool,
    pub state: DistroState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistroState {
    Running,
    Stopped,
    Installing,
    Unknown,
}

impl DistroState {
    /// Map the STATE column of the listing output to a state.
    ///
    /// Unrecognized values (new tool versions, localized output) fall back
    /// to `Unknown` rather than failing the whole listing.
    pub fn from_report(s: &str) -> Self {
        match s {
            "Running" => DistroState::Running,
            "Stopped" => DistroState::Stopped,
            "Installing" => DistroState::Installing,
            _ => DistroState::Unknown,
        }
    }
}

/// A distro available from the online catalog but not yet installed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineDistro {
    pub name: String,
    pub friendly_name: String,
}

/// A navigable target handed to the host's window opener.
///
/// Created per connect request and consumed immediately; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub authority: ConnectionAuthority,
    pub path: Option<String>,
    pub reuse_window: bool,
}
