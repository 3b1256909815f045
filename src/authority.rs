//! Connection authority encoding
//!
//! An authority is the sole wire-level artifact this crate produces: an
//! opaque string the host editor uses to route a window to a remote target.
//! Authorities are a strict bijection with distro names, so decoding a
//! string that was never produced by [`resolve`] fails instead of
//! fabricating a target.

use crate::error::WslError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme prefix shared with the host's remote-authority registration.
pub const AUTHORITY_SCHEME: &str = "wsl";

/// An opaque `wsl+<distro>` connection authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionAuthority(String);

impl ConnectionAuthority {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a distro name as a connection authority.
///
/// Pure and total: existence of the distro is deliberately not checked here,
/// so the orchestrator can compute an authority before the target distro is
/// confirmed to exist. Existence is the inventory's concern.
pub fn resolve(distro_name: &str) -> ConnectionAuthority {
    ConnectionAuthority(format!("{AUTHORITY_SCHEME}+{distro_name}"))
}

/// Decode an authority back to the distro name it encodes.
///
/// Fails with [`WslError::MalformedAuthority`] on a wrong scheme prefix or
/// an empty name segment.
pub fn decode(authority: &str) -> Result<String, WslError> {
    let name = authority
        .strip_prefix(AUTHORITY_SCHEME)
        .and_then(|rest| rest.strip_prefix('+'))
        .ok_or_else(|| WslError::MalformedAuthority(authority.to_string()))?;

    if name.is_empty() {
        return Err(WslError::MalformedAuthority(authority.to_string()));
    }

    Ok(name.to_string())
}
