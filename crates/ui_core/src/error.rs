use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
    #[error("failed to read fixture {}: {source}", path.display())]
    FixtureRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed fixture {}: {source}", path.display())]
    FixtureParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Transport failures and 5xx responses are worth retrying; everything else is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("job index {index} out of range ({len} jobs loaded)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("job '{0}' is not among the loaded jobs")]
    UnknownJob(String),
    #[error("no job selected")]
    NoJobSelected,
    #[error("stream index {index} out of range for job '{job}' ({len} streams)")]
    StreamOutOfRange {
        job: String,
        index: usize,
        len: usize,
    },
    #[error("processor '{0}' is not in the catalogue")]
    UnknownProcessor(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
