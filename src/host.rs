//! Host window opener
//!
//! The editor host is an external collaborator: it consumes the authority
//! string as an opaque connection target. The real implementation launches
//! the configured editor command with the target's authority, path and
//! window-reuse preference.

use crate::data::RemoteTarget;
use crate::error::WslError;
use tokio::process::Command;

#[allow(async_fn_in_trait)]
pub trait WindowOpener {
    async fn open_window(&self, target: &RemoteTarget) -> Result<(), WslError>;
}

/// Opens windows by invoking the host editor's CLI.
#[derive(Debug, Clone)]
pub struct EditorHost {
    command: String,
}

impl EditorHost {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl WindowOpener for EditorHost {
    async fn open_window(&self, target: &RemoteTarget) -> Result<(), WslError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--remote").arg(target.authority.as_str());
        cmd.arg(if target.reuse_window {
            "--reuse-window"
        } else {
            "--new-window"
        });
        if let Some(path) = &target.path {
            cmd.arg(path);
        }

        let label = format!("{} --remote {}", self.command, target.authority);
        let output = cmd.output().await.map_err(|e| WslError::CommandFailed {
            command: label.clone(),
            detail: e.to_string(),
        })?;

        if output.status.success() {
            tracing::info!(authority = %target.authority, "opened remote window");
            Ok(())
        } else {
            Err(WslError::CommandFailed {
                command: label,
                detail: format!("exit status {}", output.status),
            })
        }
    }
}
