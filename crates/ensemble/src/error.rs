//! Error types for the ensemble driver.

use std::path::PathBuf;

use thiserror::Error;
use transport::TransportError;

#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("ensemble needs at least one {0}")]
    Empty(&'static str),

    #[error("failed to write trajectory to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EnsembleError>;
