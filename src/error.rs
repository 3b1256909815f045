use thiserror::Error;

/// Hard failures of the WSL coordination layer.
///
/// Soft outcomes (no default distro configured, a picker dismissed by the
/// user) are not errors; they are modeled as values on the orchestrator's
/// result types and terminate a flow silently.
#[derive(Debug, Error)]
pub enum WslError {
    /// The distro listing tool is missing or its invocation failed outright.
    #[error("WSL inventory unavailable: {0}")]
    InventoryUnavailable(String),

    /// The online catalog listing failed or produced unparseable output.
    #[error("WSL online catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A connection authority string does not match the `wsl+<name>` scheme.
    #[error("malformed connection authority: {0:?}")]
    MalformedAuthority(String),

    /// A mutating external command returned a non-zero exit status.
    #[error("`{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },
}
