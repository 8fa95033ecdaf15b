//! Error types for hexpin-lattice.

use thiserror::Error;

/// Result type for lattice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid construction parameters. Always fatal to the construction call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Ring count outside `1..=MAX_RINGS` (one ring is the center pin alone)
    #[error("invalid ring count {rings}: expected 1 to {} rings, center pin included", crate::MAX_RINGS)]
    InvalidRingCount { rings: u64 },

    /// Pitch is zero, negative or not a finite number
    #[error("invalid pitch {pitch}: pitch must be a positive finite number")]
    InvalidPitch { pitch: f64 },

    /// Row grouping tolerance is zero, negative or not a finite number
    #[error("invalid row tolerance {epsilon}: epsilon must be a positive finite number")]
    InvalidRowTolerance { epsilon: f64 },

    /// Requested total pin count is zero or negative
    #[error("requested pin count {requested} is not positive")]
    NonPositivePinCount { requested: i64 },
}

/// Interpolation could not run. The grid is left untouched and stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    /// Values were requested before any strategy was selected
    #[error("no interpolation strategy selected")]
    NotSelected,

    /// Strategy selector did not name a known strategy
    #[error("unknown interpolation strategy: {0}")]
    UnknownStrategy(String),

    /// A named control value the selected strategy does not read
    #[error("control value '{name}' is not used by the {strategy} strategy")]
    UnknownControl { strategy: &'static str, name: String },

    /// Vertex values were supplied to a strategy without vertices
    #[error("vertex values are not used by the {strategy} strategy")]
    UnexpectedVertexValues { strategy: &'static str },

    /// A control value is NaN or infinite
    #[error("control value '{name}' must be finite, got {value}")]
    NonFiniteControl { name: String, value: f64 },
}

/// Errors that can occur in lattice operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Construction parameters were rejected
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Interpolation was rejected
    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),

    /// Output records need both numberings, and one is missing
    #[error("{labeling} ids have not been assigned")]
    Unindexed { labeling: &'static str },
}
