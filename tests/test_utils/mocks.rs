//! Scripted collaborators for orchestrator tests.
//!
//! Each mock is `Clone` and records through `Arc<Mutex<_>>` handles so a
//! test can keep a clone for assertions after moving one into the
//! orchestrator.

use std::sync::{Arc, Mutex};
use wslgate::data::{Distro, DistroState, OnlineDistro, RemoteTarget};
use wslgate::error::WslError;
use wslgate::host::WindowOpener;
use wslgate::interaction::{Interaction, Pick};
use wslgate::wsl::commander::Commander;
use wslgate::wsl::inventory::Inventory;

pub fn distro(name: &str, is_default: bool) -> Distro {
    Distro {
        name: name.to_string(),
        is_default,
        state: DistroState::Stopped,
    }
}

pub fn online_distro(name: &str, friendly_name: &str) -> OnlineDistro {
    OnlineDistro {
        name: name.to_string(),
        friendly_name: friendly_name.to_string(),
    }
}

/// Inventory returning fixed listings.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInventory {
    pub local: Vec<Distro>,
    pub online: Vec<OnlineDistro>,
}

impl Inventory for ScriptedInventory {
    async fn list_distros(&self) -> Result<Vec<Distro>, WslError> {
        Ok(self.local.clone())
    }

    async fn list_online_distros(&self) -> Result<Vec<OnlineDistro>, WslError> {
        Ok(self.online.clone())
    }
}

/// Commander that records every call and never touches the OS.
#[derive(Debug, Clone)]
pub struct RecordingCommander {
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Result the environment-marker call reports.
    pub marker_ok: bool,
}

impl Default for RecordingCommander {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            marker_ok: true,
        }
    }
}

impl RecordingCommander {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Commander for RecordingCommander {
    async fn install(&self, distro_name: &str) -> Result<(), WslError> {
        self.calls.lock().unwrap().push(format!("install:{distro_name}"));
        Ok(())
    }

    async fn set_default(&self, distro_name: &str) -> Result<(), WslError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("set_default:{distro_name}"));
        Ok(())
    }

    async fn delete(&self, distro_name: &str) -> Result<(), WslError> {
        self.calls.lock().unwrap().push(format!("delete:{distro_name}"));
        Ok(())
    }

    async fn set_environment_marker(&self, present: bool) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(format!("set_environment_marker:{present}"));
        self.marker_ok
    }
}

/// Interaction surface with scripted answers and recorded notifications.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    /// `None` means every picker resolves as cancelled.
    pub pick: Option<String>,
    pub confirm_delete: bool,
    pub yes_no: bool,
    pub notifications: Arc<Mutex<Vec<String>>>,
    pub questions: Arc<Mutex<Vec<String>>>,
}

impl ScriptedInteraction {
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Interaction for ScriptedInteraction {
    async fn pick_distro(&self, _distros: &[Distro], _place_holder: &str) -> Pick<String> {
        match &self.pick {
            Some(name) => Pick::Picked(name.clone()),
            None => Pick::Cancelled,
        }
    }

    async fn pick_online_distro(
        &self,
        _distros: &[OnlineDistro],
        _place_holder: &str,
    ) -> Pick<String> {
        match &self.pick {
            Some(name) => Pick::Picked(name.clone()),
            None => Pick::Cancelled,
        }
    }

    async fn confirm_delete(&self, _distro_name: &str) -> bool {
        self.confirm_delete
    }

    async fn ask_yes_no(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.yes_no
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}

/// Window opener that records targets instead of launching an editor.
#[derive(Debug, Clone, Default)]
pub struct RecordingWindow {
    pub opened: Arc<Mutex<Vec<RemoteTarget>>>,
}

impl RecordingWindow {
    pub fn opened(&self) -> Vec<RemoteTarget> {
        self.opened.lock().unwrap().clone()
    }
}

impl WindowOpener for RecordingWindow {
    async fn open_window(&self, target: &RemoteTarget) -> Result<(), WslError> {
        self.opened.lock().unwrap().push(target.clone());
        Ok(())
    }
}
