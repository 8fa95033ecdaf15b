//! Error types for the hexpin binary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for command line operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Lattice construction or value assignment failed
    #[error(transparent)]
    Lattice(#[from] hexpin_lattice::Error),

    /// Control values file could not be read or parsed
    #[error("invalid controls file {}: {reason}", path.display())]
    Controls { path: PathBuf, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hexpin_lattice::StrategyError> for Error {
    fn from(err: hexpin_lattice::StrategyError) -> Self {
        Self::Lattice(err.into())
    }
}

impl From<hexpin_lattice::ConfigurationError> for Error {
    fn from(err: hexpin_lattice::ConfigurationError) -> Self {
        Self::Lattice(err.into())
    }
}
