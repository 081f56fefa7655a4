//! Batch runs over a set of configurations.
//!
//! A [`SweepPlan`] varies one [`SweepParameter`] across its cases. Every case
//! gets a fresh random target of its own length and a stream seeded from the
//! plan seed plus the case index, so each point is reproducible on its own.
//! The resulting [`SweepReport`] pairs the swept value with the score reached,
//! ready to chart elsewhere.

use crate::algorithms::elitist::{RunState, evolve};
use crate::alphabet::Alphabet;
use crate::candidate::Target;
use crate::config::{EvolutionConfig, EvolutionParams};
use crate::error::{DriverError, Result};
use log::info;
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// The knob a sweep turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    StringLength,
    PopulationSize,
    MaxIterations,
    Elitism,
    CrossoverNum,
    RandomGeneratedCandidateNum,
    MutationRate,
}

impl SweepParameter {
    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::StringLength => "string_length",
            SweepParameter::PopulationSize => "population_size",
            SweepParameter::MaxIterations => "max_iterations",
            SweepParameter::Elitism => "elitism",
            SweepParameter::CrossoverNum => "crossover_num",
            SweepParameter::RandomGeneratedCandidateNum => "random_generated_candidate_num",
            SweepParameter::MutationRate => "mutation_rate",
        }
    }

    /// The value this parameter takes in `case`.
    pub fn value_of(&self, case: &SweepCase) -> f64 {
        let config = &case.config;
        match self {
            SweepParameter::StringLength => case.string_length as f64,
            SweepParameter::PopulationSize => config.population_size() as f64,
            SweepParameter::MaxIterations => config.max_iterations() as f64,
            SweepParameter::Elitism => config.elitism() as f64,
            SweepParameter::CrossoverNum => config.crossover_num() as f64,
            SweepParameter::RandomGeneratedCandidateNum => config.random_generated_candidate_num() as f64,
            SweepParameter::MutationRate => config.mutation_rate(),
        }
    }
}

/// One configuration in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCase {
    pub string_length: usize,
    #[serde(flatten)]
    pub config: EvolutionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub parameter: SweepParameter,
    pub cases: Vec<SweepCase>,
    #[serde(default)]
    pub seed: u64,
}

impl Default for SweepPlan {
    /// Population sizes 100 through 500 on 100-symbol targets.
    fn default() -> Self {
        let cases = (1..=5)
            .map(|step| SweepCase {
                string_length: 100,
                config: EvolutionConfig::try_from(EvolutionParams {
                    population_size: step * 100,
                    max_iterations: 100,
                    elitism: 20,
                    crossover_num: 2,
                    random_generated_candidate_num: 10,
                    mutation_rate: 0.01,
                })
                .unwrap_or_default(),
            })
            .collect();
        Self {
            parameter: SweepParameter::PopulationSize,
            cases,
            seed: 0,
        }
    }
}

impl SweepPlan {
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, DriverError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Runs every case in order.
    pub fn run(&self, alphabet: &Alphabet) -> Result<SweepReport> {
        let mut points = Vec::with_capacity(self.cases.len());
        for (i, case) in self.cases.iter().enumerate() {
            let mut rng = Pcg64::seed_from_u64(self.seed.wrapping_add(i as u64));
            let target = Target::random(case.string_length, alphabet, &mut rng)?;
            let outcome = evolve(&target, alphabet, &case.config, &mut rng)?;

            let value = self.parameter.value_of(case);
            let score = match self.parameter {
                SweepParameter::StringLength => outcome.fitness as f64 / case.string_length as f64,
                _ => outcome.fitness as f64,
            };
            info!(
                "{} = {}: fitness {}/{} at generation {}",
                self.parameter.name(),
                value,
                outcome.fitness,
                case.string_length,
                outcome.generation
            );
            points.push(SweepPoint {
                value,
                score,
                fitness: outcome.fitness,
                generation: outcome.generation,
                state: outcome.state,
            });
        }
        Ok(SweepReport {
            parameter: self.parameter,
            points,
        })
    }
}

/// Result for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Value of the swept parameter.
    pub value: f64,
    /// Fitness, normalized by target length when sweeping string length.
    pub score: f64,
    pub fitness: usize,
    pub generation: usize,
    pub state: RunState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub parameter: SweepParameter,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    /// Label for the score axis.
    pub fn score_label(&self) -> &'static str {
        match self.parameter {
            SweepParameter::StringLength => "fitness_score / string_length",
            _ => "fitness_score",
        }
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{},score,fitness,generation,converged", self.parameter.name())?;
        for p in &self.points {
            writeln!(
                out,
                "{},{},{},{},{}",
                p.value,
                p.score,
                p.fitness,
                p.generation,
                p.state == RunState::Converged
            )?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: W) -> std::result::Result<(), DriverError> {
        serde_json::to_writer_pretty(out, self)?;
        Ok(())
    }
}
