use thiserror::Error;

use crate::container::ContainerError;
use crate::shell::LifecycleState;

/// Unified result type for the Foyer shell crate.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Errors surfaced by the screen shell.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("lifecycle transition {from:?} -> {to:?} is not allowed")]
    Lifecycle {
        from: LifecycleState,
        to: LifecycleState,
    },
    #[error("lifecycle hook ran before a base context was attached")]
    BaseContextMissing,
    #[error("override configuration already applied for this attach cycle")]
    OverrideAlreadyApplied,
    #[error("service container failure: {0}")]
    Container(#[from] ContainerError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
