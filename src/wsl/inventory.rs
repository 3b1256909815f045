//! Distro inventory queries
//!
//! Runs `wsl.exe --list --verbose` / `--list --online` and parses the
//! output into structured records. Both queries are read-only, idempotent
//! and uncached: callers treat results as a best-effort snapshot (distros
//! can appear or disappear between two calls, which is accepted).
//!
//! `wsl.exe` writes UTF-16LE to its stdout on most hosts, so the raw bytes
//! are decoded before parsing; plain UTF-8 (older builds, redirected
//! output) is handled too.

use crate::data::{Distro, DistroState, OnlineDistro};
use crate::error::WslError;
use crate::wsl::WSL_EXE;
use tokio::process::Command;

/// Read access to the local and online distro inventories.
///
/// A trait so the orchestrator can be exercised against scripted
/// inventories in tests.
#[allow(async_fn_in_trait)]
pub trait Inventory {
    async fn list_distros(&self) -> Result<Vec<Distro>, WslError>;
    async fn list_online_distros(&self) -> Result<Vec<OnlineDistro>, WslError>;
}

/// Inventory backed by the real `wsl.exe`.
#[derive(Debug, Default, Clone)]
pub struct WslInventory;

impl Inventory for WslInventory {
    async fn list_distros(&self) -> Result<Vec<Distro>, WslError> {
        let output = Command::new(WSL_EXE)
            .args(["--list", "--verbose"])
            .output()
            .await
            .map_err(|e| {
                WslError::InventoryUnavailable(format!("failed to launch {WSL_EXE}: {e}"))
            })?;

        let text = decode_console_output(&output.stdout);
        if output.status.success() {
            return Ok(parse_distro_list(&text));
        }

        // wsl.exe exits non-zero when no distros are registered; the output
        // is then a prose message with no column header. That is an empty
        // inventory, not a failure.
        if !has_listing_header(&text) && parse_distro_list(&text).is_empty() {
            tracing::debug!("distro listing returned no registered distros");
            return Ok(Vec::new());
        }

        Err(WslError::InventoryUnavailable(format!(
            "{WSL_EXE} --list --verbose exited with {}",
            output.status
        )))
    }

    async fn list_online_distros(&self) -> Result<Vec<OnlineDistro>, WslError> {
        let output = Command::new(WSL_EXE)
            .args(["--list", "--online"])
            .output()
            .await
            .map_err(|e| {
                WslError::CatalogUnavailable(format!("failed to launch {WSL_EXE}: {e}"))
            })?;

        if !output.status.success() {
            return Err(WslError::CatalogUnavailable(format!(
                "{WSL_EXE} --list --online exited with {}",
                output.status
            )));
        }

        parse_online_list(&decode_console_output(&output.stdout))
    }
}

/// Decode raw console bytes from `wsl.exe`.
///
/// The tool emits UTF-16LE (optionally BOM-prefixed); redirected or older
/// output may be UTF-8. The NUL-interleaving of ASCII text in UTF-16LE
/// makes the encodings easy to tell apart.
pub fn decode_console_output(bytes: &[u8]) -> String {
    let looks_utf16 = bytes.starts_with(&[0xFF, 0xFE])
        || (bytes.len() >= 2 && bytes[1] == 0x00);

    let text = if looks_utf16 {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let decoded: String = char::decode_utf16(units.iter().copied())
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        decoded
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    text.trim_start_matches('\u{feff}').replace("\r\n", "\n")
}

fn is_header_line(line: &str) -> bool {
    line.split_whitespace().next() == Some("NAME")
}

fn has_listing_header(text: &str) -> bool {
    text.lines().any(is_header_line)
}

/// Parse `wsl.exe --list --verbose` output.
///
/// Records are read only after the `NAME STATE VERSION` column header; a
/// `*` in the first column marks the default distro. Output without a
/// header (the "no installed distributions" prose message) yields zero
/// records rather than misparsing the prose into bogus ones.
pub fn parse_distro_list(text: &str) -> Vec<Distro> {
    let mut lines = text.lines();
    let mut saw_header = false;

    for line in lines.by_ref() {
        if is_header_line(line.trim()) {
            saw_header = true;
            break;
        }
    }
    if !saw_header {
        return Vec::new();
    }

    let mut distros = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (is_default, rest) = match trimmed.strip_prefix('*') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let mut fields = rest.split_whitespace();
        let name = match fields.next() {
            Some(n) => n.to_string(),
            None => continue,
        };
        // NAME STATE VERSION; the version column is not modeled.
        let state = fields
            .next()
            .map(DistroState::from_report)
            .unwrap_or(DistroState::Unknown);

        distros.push(Distro {
            name,
            is_default,
            state,
        });
    }

    distros
}

/// Parse `wsl.exe --list --online` output into name / friendly-name pairs.
///
/// The output carries a prose preamble, then a `NAME  FRIENDLY NAME`
/// header, then one record per line: the first whitespace-delimited token
/// is the install name, the remainder the friendly name. Missing header =>
/// [`WslError::CatalogUnavailable`].
pub fn parse_online_list(text: &str) -> Result<Vec<OnlineDistro>, WslError> {
    let mut lines = text.lines();
    let mut saw_header = false;

    for line in lines.by_ref() {
        if is_header_line(line.trim()) {
            saw_header = true;
            break;
        }
    }
    if !saw_header {
        return Err(WslError::CatalogUnavailable(
            "catalog output is missing the NAME column header".to_string(),
        ));
    }

    let mut distros = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (name, friendly) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name.to_string(), rest.trim().to_string()),
            None => (trimmed.to_string(), String::new()),
        };
        let friendly_name = if friendly.is_empty() {
            name.clone()
        } else {
            friendly
        };

        distros.push(OnlineDistro {
            name,
            friendly_name,
        });
    }

    Ok(distros)
}
