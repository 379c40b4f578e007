use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to the prices API. Both variants abort the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The body was not JSON, or not JSON of the expected shape (an HTML
    /// error page from a proxy, for instance).
    #[error("JSON parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Parse { url, .. } => url,
        }
    }
}

/// Fatal build failure.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single item that could not be rendered or written. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct ItemFailure {
    pub name: String,
    pub message: String,
}
