use thiserror::Error;
use ucdom::DomError;

/// Top-level failures of the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document error: {0}")]
    Dom(#[from] DomError),
}
