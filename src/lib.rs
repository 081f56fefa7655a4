//! Evolves random strings toward an exact target with an elitist genetic
//! algorithm: the best candidates survive unchanged, fresh random candidates
//! are injected every generation, and the rest of the population is bred from
//! elite pairs by single-point crossover followed by per-symbol mutation.
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//! use string_evolver::{Alphabet, EvolutionParams, Target, algorithms::elitist::ElitistGA};
//!
//! let alphabet = Alphabet::default();
//! let target = Target::new("Hello", &alphabet)?;
//! let config = EvolutionParams {
//!     population_size: 100,
//!     max_iterations: 50,
//!     elitism: 10,
//!     crossover_num: 2,
//!     random_generated_candidate_num: 5,
//!     mutation_rate: 0.05,
//! }
//! .validate()?;
//!
//! let mut ga = ElitistGA::with_rng(target, alphabet, config, Pcg64::seed_from_u64(42))?;
//! let outcome = ga.run();
//! assert!(outcome.fitness <= 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod alphabet;
pub mod candidate;
pub mod config;
pub mod error;
pub mod sweep;

pub mod algorithms {
    pub mod elitist;
}

pub use alphabet::Alphabet;
pub use candidate::{Candidate, Target, crossover, fitness, mutate, random_candidate};
pub use config::{EvolutionConfig, EvolutionParams};
pub use error::{ConfigError, DriverError, EvolutionError, Result};

/// A candidate together with its score against the run's target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phenotype {
    pub candidate: Candidate,
    pub fitness: usize,
}

/// The engine trait: advance one generation at a time.
pub trait Evolver {
    /// Replaces the current population with the next generation.
    fn step(&mut self);
    /// The current, scored population.
    fn population(&self) -> &[Phenotype];
    /// Index of the current generation; 0 is the initial population.
    fn generation(&self) -> usize;
}
