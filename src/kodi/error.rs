//! Error types for Kodi client operations

use std::io;
use std::path::PathBuf;

/// Error types for Kodi JSON-RPC and thumbnail cache operations
#[derive(Debug, thiserror::Error)]
pub enum KodiError {
    /// Connection failure, protocol error or a fault reported by the server.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Network or HTTP-level failure while downloading raw bytes.
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The configured cache path exists but is not a directory.
    #[error("Thumbnail cache path exists but is not a directory: {}", .0.display())]
    CacheDirectoryInvalid(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<serde_json::Error> for KodiError {
    fn from(err: serde_json::Error) -> Self {
        KodiError::InvalidResponse(err.to_string())
    }
}

impl From<reqwest::Error> for KodiError {
    fn from(err: reqwest::Error) -> Self {
        KodiError::Transport(err.to_string())
    }
}
