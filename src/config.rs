//! Run configuration.
//!
//! [`EvolutionParams`] is the plain, loosely checked shape read from files or
//! built inline. [`EvolutionConfig`] is the validated value the engine
//! accepts; it can only be obtained through [`TryFrom`], and deserializing one
//! validates it, so a malformed file never reaches the engine.

use crate::error::{ConfigError, DriverError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw tuning parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Members per generation.
    pub population_size: usize,
    /// Generations bred before the run gives up.
    pub max_iterations: usize,
    /// Top candidates carried unchanged into the next generation.
    pub elitism: usize,
    /// Offspring produced per sampled parent pair.
    pub crossover_num: usize,
    /// Fresh random candidates injected into every generation.
    pub random_generated_candidate_num: usize,
    /// Per-symbol replacement probability applied to offspring.
    pub mutation_rate: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 600,
            max_iterations: 300,
            elitism: 20,
            crossover_num: 2,
            random_generated_candidate_num: 10,
            mutation_rate: 0.01,
        }
    }
}

impl EvolutionParams {
    /// Checks every invariant and returns the validated configuration.
    ///
    /// Elitism below 2 and a zero crossover count are only rejected when
    /// elites plus injected candidates leave room that crossover must fill.
    pub fn validate(self) -> Result<EvolutionConfig, ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.elitism > self.population_size {
            return Err(ConfigError::ElitismExceedsPopulation {
                elitism: self.elitism,
                population_size: self.population_size,
            });
        }
        let seeded = self
            .elitism
            .checked_add(self.random_generated_candidate_num)
            .filter(|&n| n <= self.population_size);
        let Some(seeded) = seeded else {
            return Err(ConfigError::SeedExceedsPopulation {
                elitism: self.elitism,
                injected: self.random_generated_candidate_num,
                population_size: self.population_size,
            });
        };
        if seeded < self.population_size {
            if self.elitism < 2 {
                return Err(ConfigError::TooFewParents(self.elitism));
            }
            if self.crossover_num == 0 {
                return Err(ConfigError::NoCrossover);
            }
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        Ok(EvolutionConfig { params: self })
    }
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EvolutionParams", into = "EvolutionParams")]
pub struct EvolutionConfig {
    params: EvolutionParams,
}

impl TryFrom<EvolutionParams> for EvolutionConfig {
    type Error = ConfigError;

    fn try_from(params: EvolutionParams) -> Result<Self, Self::Error> {
        params.validate()
    }
}

impl From<EvolutionConfig> for EvolutionParams {
    fn from(config: EvolutionConfig) -> Self {
        config.params
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            params: EvolutionParams::default(),
        }
    }
}

impl EvolutionConfig {
    /// Loads and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let raw = std::fs::read_to_string(path)?;
        let params: EvolutionParams = serde_json::from_str(&raw)?;
        Ok(params.validate()?)
    }

    pub fn population_size(&self) -> usize {
        self.params.population_size
    }

    pub fn max_iterations(&self) -> usize {
        self.params.max_iterations
    }

    pub fn elitism(&self) -> usize {
        self.params.elitism
    }

    pub fn crossover_num(&self) -> usize {
        self.params.crossover_num
    }

    pub fn random_generated_candidate_num(&self) -> usize {
        self.params.random_generated_candidate_num
    }

    pub fn mutation_rate(&self) -> f64 {
        self.params.mutation_rate
    }

    /// Number of members crossover has to produce each generation.
    pub fn offspring_per_generation(&self) -> usize {
        self.params.population_size - self.params.elitism - self.params.random_generated_candidate_num
    }
}
