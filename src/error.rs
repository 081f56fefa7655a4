//! Error types.
//!
//! The engine itself performs no I/O, so its errors are all fatal and raised
//! before a run starts: either the configuration breaks one of its invariants
//! ([`ConfigError`]) or the inputs have the wrong shape ([`EvolutionError`]).
//! [`DriverError`] wraps those together with the I/O and JSON failures of the
//! file-loading glue.

use thiserror::Error;

/// A configuration that violates one of the run invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("elitism ({elitism}) exceeds population size ({population_size})")]
    ElitismExceedsPopulation {
        elitism: usize,
        population_size: usize,
    },

    #[error(
        "elitism ({elitism}) plus random injection ({injected}) exceeds population size ({population_size})"
    )]
    SeedExceedsPopulation {
        elitism: usize,
        injected: usize,
        population_size: usize,
    },

    #[error("crossover needs at least 2 elite parents, got elitism {0}")]
    TooFewParents(usize),

    #[error("crossover count must be at least 1 when offspring are required")]
    NoCrossover,

    #[error("mutation rate must be between 0.0 and 1.0, got {0}")]
    MutationRateOutOfRange(f64),
}

/// Errors raised by the evolution core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolutionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("target must contain at least one symbol")]
    EmptyTarget,

    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("alphabet contains {0:?} more than once")]
    DuplicateSymbol(char),

    #[error("symbol {0:?} is not part of the alphabet")]
    UnknownSymbol(char),

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("seed population has {actual} members, configuration requires {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, EvolutionError>;

/// Failures of the glue around the core: loading plans and configurations,
/// writing reports.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Evolution(#[from] EvolutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for DriverError {
    fn from(err: ConfigError) -> Self {
        DriverError::Evolution(err.into())
    }
}
