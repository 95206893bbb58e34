use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing config file '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("error parsing config file '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("timeout_seconds must be at least 1, got {value}")]
    InvalidTimeout { value: u64 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Rejected [`crate::coordinator::ResultSet`] mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultSetError {
    #[error("slot {index} already holds a result")]
    AlreadyFilled { index: usize },
    #[error("slot {index} is out of range for {len} targets")]
    OutOfRange { index: usize, len: usize },
}
