pub mod commander;
pub mod inventory;

/// The OS-level virtualization tool every external action goes through.
pub const WSL_EXE: &str = "wsl.exe";
