//! Custom error types for the command-line client.

use std::path::PathBuf;

use garmin_connect_client::ConnectError;
use thiserror::Error;

use crate::exitcode;

/// CLI errors are the top-level error type; these are what get shown to the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::File {
            path: path.into(),
            source,
        }
    }

    /// Exit status for this error, following sysexits.h.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::File { .. } => exitcode::CANTCREAT,
            CliError::Output(_) => exitcode::IOERR,
            CliError::Connect(e) => match e {
                ConnectError::InvalidInput(_) | ConnectError::UnknownFormat(_) => {
                    exitcode::DATAERR
                }
                ConnectError::NotFound(_) => exitcode::NOINPUT,
                ConnectError::Auth(_) => exitcode::NOPERM,
                ConnectError::Config(_) => exitcode::CONFIG,
                ConnectError::Decode(_) => exitcode::PROTOCOL,
                ConnectError::Io(_) => exitcode::IOERR,
                ConnectError::Http(_)
                | ConnectError::RateLimited(_)
                | ConnectError::Api { .. } => exitcode::UNAVAILABLE,
            },
        }
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
