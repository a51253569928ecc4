//! Error types for the Folio pipeline.

use thiserror::Error;

/// Errors that can occur while loading and rendering the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FolioError {
    /// The fetch itself failed (network down, CORS, aborted).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body is not JSON or does not have the portfolio shape.
    #[error("invalid portfolio document: {0}")]
    Parse(String),

    /// A required anchor element is not in the page.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A host DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FolioError {
    /// Whether this error belongs to the loading phase (transport, status,
    /// parse), which is reported in the name element.
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_) | Self::Parse(_))
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T, E = FolioError> = std::result::Result<T, E>;
