//! Session orchestration
//!
//! Top-level coordinator for a single connection attempt. Each flow walks
//! `Idle -> SelectingDistro -> Resolving -> Connecting` and ends `Opened`
//! or `Failed`; soft outcomes (no default configured, picker dismissed)
//! terminate a flow silently instead of erroring.
//!
//! Every collaborator is injected: the inventory and commander so tests can
//! script external state, the interaction surface so cancellation and
//! confirmation can be driven directly, and the persisted prompt flag so it
//! is never ambient global state.

use crate::authority;
use crate::config::MarkerConfig;
use crate::data::{OnlineDistro, RemoteTarget};
use crate::error::WslError;
use crate::history::LocationHistory;
use crate::host::WindowOpener;
use crate::interaction::{Interaction, Pick};
use crate::state::PromptState;
use crate::wsl::commander::Commander;
use crate::wsl::inventory::Inventory;
use anyhow::Result;

/// Terminal state of a connect flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Opened(RemoteTarget),
    /// No distro is flagged default: nothing opened, not an error.
    NoDefaultDistro,
    /// The user dismissed the picker.
    Cancelled,
}

pub struct SessionOrchestrator<V, C, I, W> {
    inventory: V,
    commander: C,
    interaction: I,
    window: W,
    prompt_state: PromptState,
    history: LocationHistory,
    marker: MarkerConfig,
}

impl<V, C, I, W> SessionOrchestrator<V, C, I, W>
where
    V: Inventory,
    C: Commander,
    I: Interaction,
    W: WindowOpener,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        inventory: V,
        commander: C,
        interaction: I,
        window: W,
        prompt_state: PromptState,
        history: LocationHistory,
        marker: MarkerConfig,
    ) -> Self {
        Self {
            inventory,
            commander,
            interaction,
            window,
            prompt_state,
            history,
            marker,
        }
    }

    /// Connect to the distro the OS flags as default.
    pub async fn connect_default(&self, reuse_window: bool) -> Result<ConnectOutcome, WslError> {
        tracing::debug!("selecting default distro");
        let distros = self.inventory.list_distros().await?;

        // Inconsistent external state can flag several distros default; the
        // first in listing order wins. Compatibility quirk of the listing
        // format, preserved as-is.
        let Some(distro) = distros.iter().find(|d| d.is_default) else {
            tracing::debug!("no default distro configured, nothing to open");
            return Ok(ConnectOutcome::NoDefaultDistro);
        };

        let target = self.open(&distro.name, None, reuse_window).await?;
        Ok(ConnectOutcome::Opened(target))
    }

    /// Connect to a distro chosen interactively from the local inventory.
    pub async fn connect_pick(&self, reuse_window: bool) -> Result<ConnectOutcome, WslError> {
        tracing::debug!("selecting distro via picker");
        let distros = self.inventory.list_distros().await?;

        match self
            .interaction
            .pick_distro(&distros, "Select WSL distro")
            .await
        {
            Pick::Picked(name) => {
                let target = self.open(&name, None, reuse_window).await?;
                Ok(ConnectOutcome::Opened(target))
            }
            Pick::Cancelled => Ok(ConnectOutcome::Cancelled),
        }
    }

    /// Connect to a distro the caller already validated, e.g. from a tree
    /// item. The name must still be non-empty.
    pub async fn connect_named(
        &self,
        distro_name: &str,
        reuse_window: bool,
    ) -> Result<RemoteTarget, WslError> {
        self.open(distro_name, None, reuse_window).await
    }

    /// Open a remembered or requested folder inside a distro, recording it
    /// in the location history on success.
    pub async fn open_location(
        &self,
        distro_name: &str,
        path: &str,
        reuse_window: bool,
    ) -> Result<RemoteTarget, WslError> {
        let target = self.open(distro_name, Some(path.to_string()), reuse_window).await?;
        if let Err(e) = self.history.add(target.authority.as_str(), path) {
            // History is a convenience surface; a write failure must not
            // undo an already-opened window.
            tracing::warn!("failed to record location history: {e:#}");
        }
        Ok(target)
    }

    async fn open(
        &self,
        distro_name: &str,
        path: Option<String>,
        reuse_window: bool,
    ) -> Result<RemoteTarget, WslError> {
        if distro_name.is_empty() {
            return Err(WslError::MalformedAuthority(String::new()));
        }

        tracing::debug!(distro = distro_name, "resolving authority");
        let target = RemoteTarget {
            authority: authority::resolve(distro_name),
            path,
            reuse_window,
        };

        tracing::debug!(authority = %target.authority, "connecting");
        self.window.open_window(&target).await?;
        Ok(target)
    }

    /// Distros installable but not yet present locally: online catalog
    /// minus local inventory, by name. Both listings are awaited together;
    /// the pair is still a best-effort snapshot.
    pub async fn install_candidates(&self) -> Result<Vec<OnlineDistro>, WslError> {
        let (online, local) = futures::future::try_join(
            self.inventory.list_online_distros(),
            self.inventory.list_distros(),
        )
        .await?;

        Ok(online
            .into_iter()
            .filter(|o| !local.iter().any(|l| l.name == o.name))
            .collect())
    }

    /// Pick a genuinely-new distro and dispatch its installation.
    ///
    /// Returns whether an install request was dispatched. Dispatch only:
    /// the install runs in a separate long-lived process and completion is
    /// never observed here.
    pub async fn install_new(&self) -> Result<bool, WslError> {
        let candidates = self.install_candidates().await?;
        if candidates.is_empty() {
            self.interaction
                .notify("All catalog distros are already installed.");
            return Ok(false);
        }

        match self
            .interaction
            .pick_online_distro(&candidates, "Select the WSL distro to install")
            .await
        {
            Pick::Picked(name) => {
                self.commander.install(&name).await?;
                Ok(true)
            }
            Pick::Cancelled => Ok(false),
        }
    }

    /// Set the OS-level default distro.
    pub async fn set_default(&self, distro_name: &str) -> Result<(), WslError> {
        self.commander.set_default(distro_name).await
    }

    /// Delete a distro and all its data, gated on an explicit affirmative
    /// confirmation from the interaction layer. Returns whether deletion
    /// proceeded so callers can refresh any cached UI state.
    pub async fn delete_distro(&self, distro_name: &str) -> Result<bool, WslError> {
        if !self.interaction.confirm_delete(distro_name).await {
            tracing::debug!(distro = distro_name, "deletion declined");
            return Ok(false);
        }

        self.commander.delete(distro_name).await?;
        Ok(true)
    }

    /// Set or clear the environment marker. Failure is downgraded to a
    /// single notification and a `false` return; it affects only optional
    /// downstream detection, never core connectivity.
    pub async fn set_environment_marker(&self, present: bool, announce: bool) -> bool {
        let ok = self.commander.set_environment_marker(present).await;
        let variable = &self.marker.variable;

        if !ok {
            let action = if present { "set" } else { "remove" };
            self.interaction
                .notify(&format!("Failed to {action} {variable}."));
            return false;
        }

        if announce {
            let message = if present {
                format!(
                    "{variable} has been set to \"{}\".",
                    self.marker.integration_id
                )
            } else {
                format!("{variable} has been removed from the environment.")
            };
            self.interaction.notify(&message);
        }
        true
    }

    /// One-time environment-marker setup prompt. The persisted flag is set
    /// after the first prompt regardless of the answer; only an affirmative
    /// answer dispatches the marker command.
    pub async fn maybe_prompt_env_marker(&self) -> Result<()> {
        if self.prompt_state.env_prompted() {
            return Ok(());
        }

        let question = format!(
            "Do you want to set the environment variable {} to \"{}\"?",
            self.marker.variable, self.marker.integration_id
        );
        if self.interaction.ask_yes_no(&question).await {
            self.set_environment_marker(true, true).await;
        }

        self.prompt_state.set_env_prompted(true)
    }

    /// Reset the setup prompt so it is shown again next run.
    pub fn reset_prompt_state(&self) -> Result<()> {
        self.prompt_state.set_env_prompted(false)
    }
}
