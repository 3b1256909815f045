use anyhow::Result;
use clap::{Parser, Subcommand};
use wslgate::history::LocationHistory;
use wslgate::host::EditorHost;
use wslgate::interaction::{ConsoleInteraction, Interaction};
use wslgate::session::{ConnectOutcome, SessionOrchestrator};
use wslgate::state::PromptState;
use wslgate::wsl::commander::WslCommander;
use wslgate::wsl::inventory::{Inventory, WslInventory};
use wslgate::{config, data::DistroState};

#[derive(Parser, Debug)]
#[command(name = "wslgate")]
#[command(about = "Remote WSL target manager")]
#[command(version)]
struct Args {
    /// Path to config file
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List installed distros (or the online catalog)
    List {
        /// List installable distros from the online catalog
        #[arg(long)]
        online: bool,
    },
    /// Open an editor window connected to a distro
    Connect {
        /// Distro name; omitted means the default distro
        distro: Option<String>,
        /// Pick the distro interactively
        #[arg(long, conflicts_with = "distro")]
        pick: bool,
        /// Folder to open inside the distro
        #[arg(long, requires = "distro")]
        path: Option<String>,
        /// Force a new window instead of reusing the current one
        #[arg(long)]
        new_window: bool,
    },
    /// Install a new distro from the online catalog
    Install,
    /// Set the default distro
    SetDefault { distro: String },
    /// Permanently delete a distro and all its data
    Delete { distro: String },
    /// Manage the integration's environment marker variable
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },
    /// Reset the environment setup prompt so it is shown again
    ResetPrompt,
}

#[derive(Subcommand, Debug)]
enum EnvAction {
    /// Set the marker variable
    Set,
    /// Remove the marker variable
    Unset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wslgate=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    let interaction = ConsoleInteraction;
    let orchestrator = SessionOrchestrator::new(
        WslInventory,
        WslCommander::new(
            config.marker.variable.as_str(),
            config.marker.integration_id.as_str(),
        ),
        interaction.clone(),
        EditorHost::new(config.editor.command.as_str()),
        PromptState::open_default()?,
        LocationHistory::open_default()?,
        config.marker.clone(),
    );

    match args.command {
        Command::List { online: false } => {
            let distros = WslInventory.list_distros().await?;
            if distros.is_empty() {
                println!("No distros installed.");
                return Ok(());
            }
            for distro in distros {
                let marker = if distro.is_default { "*" } else { " " };
                println!("{marker} {:24} {}", distro.name, state_label(distro.state));
            }
        }
        Command::List { online: true } => {
            for distro in WslInventory.list_online_distros().await? {
                println!("{:24} {}", distro.name, distro.friendly_name);
            }
        }
        Command::Connect {
            distro,
            pick,
            path,
            new_window,
        } => {
            orchestrator.maybe_prompt_env_marker().await?;

            let reuse_window = !new_window;
            match (distro, pick, path) {
                (Some(name), _, Some(path)) => {
                    orchestrator.open_location(&name, &path, reuse_window).await?;
                }
                (Some(name), _, None) => {
                    orchestrator.connect_named(&name, reuse_window).await?;
                }
                (None, true, _) => {
                    // Cancellation is a valid terminal state; stay silent.
                    orchestrator.connect_pick(reuse_window).await?;
                }
                (None, false, _) => {
                    if orchestrator.connect_default(reuse_window).await?
                        == ConnectOutcome::NoDefaultDistro
                    {
                        tracing::info!("no default distro configured; nothing opened");
                    }
                }
            }
        }
        Command::Install => {
            if orchestrator.install_new().await? {
                println!("Installation dispatched; it continues in the background.");
            }
        }
        Command::SetDefault { distro } => {
            orchestrator.set_default(&distro).await?;
        }
        Command::Delete { distro } => {
            if orchestrator.delete_distro(&distro).await? {
                println!("Deleted \"{distro}\".");
            }
        }
        Command::Env { action } => {
            let present = matches!(action, EnvAction::Set);
            orchestrator.set_environment_marker(present, true).await;
        }
        Command::ResetPrompt => {
            orchestrator.reset_prompt_state()?;
            interaction.notify("Prompt state has been reset. You will be prompted again next run.");
        }
    }

    Ok(())
}

fn state_label(state: DistroState) -> &'static str {
    match state {
        DistroState::Running => "Running",
        DistroState::Stopped => "Stopped",
        DistroState::Installing => "Installing",
        DistroState::Unknown => "Unknown",
    }
}
