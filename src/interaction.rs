//! The interaction seam: pickers, confirmations and notifications
//!
//! The host editor owns the real UI; this crate only defines the contract
//! it must satisfy, plus a console implementation for the standalone CLI.
//! Cancellation is an explicit variant rather than a smuggled null so every
//! picker-consuming flow has to handle it as a valid terminal state.

use crate::data::{Distro, OnlineDistro};
use std::io::{self, BufRead, Write};

/// Outcome of an interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick<T> {
    Picked(T),
    Cancelled,
}

/// The picker / confirmation / notification surface the orchestrator
/// depends on.
#[allow(async_fn_in_trait)]
pub trait Interaction {
    /// Pick an installed distro; returns its name.
    async fn pick_distro(&self, distros: &[Distro], place_holder: &str) -> Pick<String>;

    /// Pick an installable distro by friendly name; returns its install name.
    async fn pick_online_distro(&self, distros: &[OnlineDistro], place_holder: &str)
        -> Pick<String>;

    /// Modal delete confirmation. Anything other than the exact affirmative
    /// token is a decline.
    async fn confirm_delete(&self, distro_name: &str) -> bool;

    /// One-shot yes/no question; a dismissed prompt counts as "no".
    async fn ask_yes_no(&self, question: &str) -> bool;

    /// Surface a single human-readable notification.
    fn notify(&self, message: &str);
}

/// Token the console confirmation compares against, case-sensitively.
pub const DELETE_TOKEN: &str = "delete";

/// Console implementation used by the CLI binary.
///
/// Pickers present a numbered list and read one line from stdin. When stdin
/// is not a terminal every prompt resolves as cancelled/declined instead of
/// blocking on a pipe.
#[derive(Debug, Default, Clone)]
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    fn read_line(&self) -> Option<String> {
        if !atty::is(atty::Stream::Stdin) {
            return None;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(_) => None,
        }
    }

    fn pick_index(&self, len: usize, place_holder: &str) -> Option<usize> {
        print!("{place_holder} [1-{len}, Enter to cancel]: ");
        let _ = io::stdout().flush();

        let line = self.read_line()?;
        if line.is_empty() {
            return None;
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Some(n - 1),
            _ => None,
        }
    }
}

impl Interaction for ConsoleInteraction {
    async fn pick_distro(&self, distros: &[Distro], place_holder: &str) -> Pick<String> {
        if distros.is_empty() {
            return Pick::Cancelled;
        }
        for (i, distro) in distros.iter().enumerate() {
            let marker = if distro.is_default { " (default distro)" } else { "" };
            println!("  {}. {}{marker}", i + 1, distro.name);
        }
        match self.pick_index(distros.len(), place_holder) {
            Some(i) => Pick::Picked(distros[i].name.clone()),
            None => Pick::Cancelled,
        }
    }

    async fn pick_online_distro(
        &self,
        distros: &[OnlineDistro],
        place_holder: &str,
    ) -> Pick<String> {
        if distros.is_empty() {
            return Pick::Cancelled;
        }
        for (i, distro) in distros.iter().enumerate() {
            println!("  {}. {}", i + 1, distro.friendly_name);
        }
        match self.pick_index(distros.len(), place_holder) {
            Some(i) => Pick::Picked(distros[i].name.clone()),
            None => Pick::Cancelled,
        }
    }

    async fn confirm_delete(&self, distro_name: &str) -> bool {
        print!(
            "Permanently delete the distro \"{distro_name}\" including all its data? \
             Type \"{DELETE_TOKEN}\" to confirm: "
        );
        let _ = io::stdout().flush();
        matches!(self.read_line().as_deref(), Some(DELETE_TOKEN))
    }

    async fn ask_yes_no(&self, question: &str) -> bool {
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();
        matches!(
            self.read_line().as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}
