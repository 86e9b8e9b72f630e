use std::path::PathBuf;
use thiserror::Error;

/// Failure of one prediction request. The widget collapses every variant
/// into the same user-facing message.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid endpoint {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server answered {status}")]
    Status { status: reqwest::StatusCode },
    #[error("cannot build multipart part for {name}: {source}")]
    InvalidPart {
        name: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Failure while turning a dropped or picked path into a selected file.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid endpoint {url:?}: {reason}")]
    Endpoint { url: String, reason: String },
}
