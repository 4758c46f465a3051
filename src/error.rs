// Error types for the detection client. Every failure of a detection call
// ends up as one `FaceError`; the variants only exist so a caller can tell a
// transport problem from a bad response without parsing the message text.

use std::path::PathBuf;

use thiserror::Error;

pub type FaceResult<T> = Result<T, FaceError>;

#[derive(Debug, Error)]
pub enum FaceError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid detection response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw response body, kept so callers can inspect what came back.
        body: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FaceError {
    /// True when the request never reached the server.
    pub fn is_local(&self) -> bool {
        matches!(self, FaceError::Io { .. } | FaceError::Config(_))
    }
}
