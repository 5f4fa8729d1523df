//! Error types for the attribute scanner and the prober
//!
//! Scanner errors are fatal and end the process. Prober errors are logged where
//! they happen and never stop a run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure loading the monster dump
#[derive(Error, Debug)]
pub enum ScanError {
    /// The input file could not be opened or read
    #[error("IO error on {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The input is not JSON or not an array of monster records
    #[error("JSON error in {path:?}: {message}")]
    Json {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for scanner operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Failure writing a payload to disk
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Failure connecting to a single candidate port
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Nothing listens on the port. Expected while scanning.
    #[error("Connection refused")]
    Refused,

    #[error("Timed out after {0:?}")]
    TimedOut(std::time::Duration),

    #[error("Invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header value for {header}")]
    InvalidHeader { header: &'static str },

    /// TCP or websocket handshake failure other than a refusal
    #[error("{0}")]
    Handshake(#[source] tokio_tungstenite::tungstenite::Error),
}

impl ConnectError {
    pub fn is_refused(&self) -> bool {
        matches!(self, ConnectError::Refused)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ConnectError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        match err {
            tokio_tungstenite::tungstenite::Error::Io(ref io)
                if io.kind() == std::io::ErrorKind::ConnectionRefused =>
            {
                ConnectError::Refused
            }
            other => ConnectError::Handshake(other),
        }
    }
}

/// Helper trait for converting IO errors with the path they concern
pub trait IoContext<T> {
    fn with_io_context(self, path: &std::path::Path, message: &str) -> ScanResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, path: &std::path::Path, message: &str) -> ScanResult<T> {
        self.map_err(|e| ScanError::Io {
            path: path.to_path_buf(),
            message: message.to_string(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with the path they concern
pub trait JsonContext<T> {
    fn with_json_context(self, path: &std::path::Path, message: &str) -> ScanResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, path: &std::path::Path, message: &str) -> ScanResult<T> {
        self.map_err(|e| ScanError::Json {
            path: path.to_path_buf(),
            message: message.to_string(),
            source: e,
        })
    }
}
