//! Error types for Flotilla
//!
//! The interaction coordinator itself is fail-silent (missing UI targets
//! degrade to no-ops), so errors here cover the edges that can actually
//! fail: configuration, locale parsing, the fragment channel, and the GUI
//! host.

use thiserror::Error;

/// Main error type for Flotilla operations
#[derive(Error, Debug)]
pub enum FlotillaError {
    #[error("Failed to read config '{0}': {1}")]
    ConfigRead(String, std::io::Error),

    #[error("Failed to parse config '{0}': {1}")]
    ConfigParse(String, serde_json::Error),

    #[error("Failed to write config '{0}': {1}")]
    ConfigWrite(String, std::io::Error),

    #[error("Unparseable date/time '{0}'")]
    FechaInvalida(String),

    #[error("Fragment worker channel closed")]
    WorkerGone,

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),

    #[error("GUI error: {0}")]
    GuiError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Flotilla operations
pub type Result<T> = std::result::Result<T, FlotillaError>;

impl FlotillaError {
    /// Check if this error is recoverable (the panel can keep running)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FlotillaError::FechaInvalida(_) | FlotillaError::UnknownRegion(_)
        )
    }
}
