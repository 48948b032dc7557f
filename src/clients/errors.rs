use thiserror::Error;

/// Everything that can go wrong while serving a request or starting up
#[derive(Error, Debug)]
pub enum Error {
    /// Deezer could not be reached or the transfer broke off
    #[error("Deezer request failed, error: {0}")]
    UpstreamError(#[from] reqwest::Error),

    /// Deezer answered with something other than JSON
    #[error("Deezer returned a body that is not JSON: {0}")]
    UpstreamDeserializationError(#[from] serde_json::Error),

    /// Bad settings or an I/O failure while starting up
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The favorites database failed
    #[error("Storage error: {0}")]
    StorageError(#[from] async_duckdb::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

/// Result with the crate [`Error`] as default error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
