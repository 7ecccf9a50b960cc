//! Unified error handling for the host.

/// Host error type.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Engine error: {0}")]
    Engine(#[from] tableview_engine::Error),

    #[error("Table host has shut down")]
    Closed,
}

/// Result type alias for host calls.
pub type Result<T> = std::result::Result<T, HostError>;
