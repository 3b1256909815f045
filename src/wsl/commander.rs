//! External mutating actions against the WSL subsystem
//!
//! Each action is a single external process invocation; success is
//! communicated by exit status only, no structured output is parsed.

use crate::error::WslError;
use crate::wsl::WSL_EXE;
use tokio::process::Command;

const POWERSHELL_EXE: &str = "powershell.exe";

/// The four mutating external actions, behind a trait so orchestrator tests
/// can script and record them.
#[allow(async_fn_in_trait)]
pub trait Commander {
    /// Dispatch a distro installation. Fire-and-forget: the install runs
    /// in a separate long-lived process and `Ok` means only that the
    /// request was dispatched, never that installation completed.
    async fn install(&self, distro_name: &str) -> Result<(), WslError>;

    /// Set the OS-level default distro.
    async fn set_default(&self, distro_name: &str) -> Result<(), WslError>;

    /// Unregister a distro, destroying all its data. Callers must have
    /// obtained explicit confirmation before invoking this; the commander
    /// itself performs none.
    async fn delete(&self, distro_name: &str) -> Result<(), WslError>;

    /// Set or clear the user-scoped environment marker a companion tool
    /// uses to detect this integration. Returns whether the external call
    /// succeeded; failures are intentionally non-fatal for callers.
    async fn set_environment_marker(&self, present: bool) -> bool;
}

/// Commander backed by `wsl.exe` and `powershell.exe`.
#[derive(Debug, Clone)]
pub struct WslCommander {
    marker_variable: String,
    integration_id: String,
}

impl WslCommander {
    pub fn new(marker_variable: impl Into<String>, integration_id: impl Into<String>) -> Self {
        Self {
            marker_variable: marker_variable.into(),
            integration_id: integration_id.into(),
        }
    }
}

async fn run_checked(program: &str, args: &[&str]) -> Result<(), WslError> {
    let label = format!("{program} {}", args.join(" "));
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| WslError::CommandFailed {
            command: label.clone(),
            detail: e.to_string(),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = crate::wsl::inventory::decode_console_output(&output.stderr);
        Err(WslError::CommandFailed {
            command: label,
            detail: format!("exit status {}: {}", output.status, stderr.trim()),
        })
    }
}

impl Commander for WslCommander {
    async fn install(&self, distro_name: &str) -> Result<(), WslError> {
        // Spawn without awaiting: installation is a multi-minute external
        // download/extract and the contract is dispatch acknowledgment only.
        Command::new(WSL_EXE)
            .args(["--install", "-d", distro_name])
            .spawn()
            .map_err(|e| WslError::CommandFailed {
                command: format!("{WSL_EXE} --install -d {distro_name}"),
                detail: e.to_string(),
            })?;
        tracing::info!(distro = distro_name, "dispatched distro installation");
        Ok(())
    }

    async fn set_default(&self, distro_name: &str) -> Result<(), WslError> {
        run_checked(WSL_EXE, &["--set-default", distro_name]).await?;
        tracing::info!(distro = distro_name, "set default distro");
        Ok(())
    }

    async fn delete(&self, distro_name: &str) -> Result<(), WslError> {
        run_checked(WSL_EXE, &["--unregister", distro_name]).await?;
        tracing::info!(distro = distro_name, "unregistered distro");
        Ok(())
    }

    async fn set_environment_marker(&self, present: bool) -> bool {
        let value = if present {
            format!("'{}'", self.integration_id)
        } else {
            "$null".to_string()
        };
        let ps_command = format!(
            "[System.Environment]::SetEnvironmentVariable('{}', {}, 'User')",
            self.marker_variable, value
        );

        match run_checked(POWERSHELL_EXE, &["-Command", &ps_command]).await {
            Ok(()) => {
                tracing::info!(
                    variable = %self.marker_variable,
                    present,
                    "updated environment marker"
                );
                true
            }
            Err(e) => {
                tracing::warn!("failed to update environment marker: {e}");
                false
            }
        }
    }
}
