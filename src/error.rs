use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// The run cannot start with what it was given (credential, secret, ids).
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{operation} failed: {source}")]
    Transfer {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("remote entry is missing {0}")]
    MalformedEntry(String),

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn transfer(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Error::Transfer {
            operation,
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
