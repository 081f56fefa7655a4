//! Elitist generational GA with random injection.
//!
//! # Generation filling
//!
//! Each step ranks the current population by fitness (stable: among equal
//! scores the earlier member wins) and builds the next generation from:
//! 1. the top `elitism` candidates, carried over unmutated,
//! 2. `random_generated_candidate_num` freshly randomized candidates,
//! 3. offspring: two distinct elites are drawn uniformly (in random order)
//!    and produce up to `crossover_num` children, each by crossover followed
//!    by mutation, until the population is full. A batch stops as soon as the
//!    population cap is hit.
//!
//! # Termination
//!
//! Generation `g` is scored as soon as it exists. If it holds a perfect match
//! the run is [`RunState::Converged`]; if `g == max_iterations` it is
//! [`RunState::Exhausted`]; otherwise it is still [`RunState::Running`] and
//! [`ElitistGA::run`] breeds the next generation. Either way the outcome is
//! the first highest-scoring member of the final population.
//!
//! # Determinism
//!
//! All randomness comes from the one injected stream, consumed in a fixed
//! order: injected candidates, then per parent pair the pair draw, then per
//! child the split draw and the per-symbol mutation draws. A fixed seed
//! reproduces the run exactly, with or without the `parallel` feature.

use crate::alphabet::Alphabet;
use crate::candidate::{Candidate, Target};
use crate::config::EvolutionConfig;
use crate::error::{ConfigError, EvolutionError, Result};
use crate::{Evolver, Phenotype};
use log::{debug, info, trace};
use rand::Rng;
use rand::prelude::SeedableRng;
use rand::seq::index;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    /// A perfect match was found.
    Converged,
    /// The iteration budget ran out first.
    Exhausted,
}

/// What a run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub best: Candidate,
    pub fitness: usize,
    /// Generation the result was taken from.
    pub generation: usize,
    pub state: RunState,
}

impl RunOutcome {
    pub fn converged(&self) -> bool {
        self.state == RunState::Converged
    }
}

/// Population indices ordered by fitness, best first. Equal scores keep
/// population order.
fn rank(population: &[Phenotype]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by_key(|&i| Reverse(population[i].fitness));
    order
}

fn score_all(target: &Target, candidates: Vec<Candidate>) -> Vec<Phenotype> {
    #[cfg(feature = "parallel")]
    let iter = candidates.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = candidates.into_iter();

    iter.map(|candidate| Phenotype {
        fitness: target.score(&candidate),
        candidate,
    })
    .collect()
}

/// The `k` best members of `population` against `target`, best first, ties
/// kept in population order.
pub fn select_elite(population: &[Candidate], target: &Target, k: usize) -> Result<Vec<Candidate>> {
    if k > population.len() {
        return Err(ConfigError::ElitismExceedsPopulation {
            elitism: k,
            population_size: population.len(),
        }
        .into());
    }
    for candidate in population {
        target.check_len(candidate)?;
    }
    let scored = score_all(target, population.to_vec());
    Ok(rank(&scored)
        .into_iter()
        .take(k)
        .map(|i| scored[i].candidate.clone())
        .collect())
}

/// Runs one complete evolution and returns its outcome.
///
/// Borrows the caller's random stream, so consecutive calls continue the same
/// sequence.
pub fn evolve<R: Rng>(
    target: &Target,
    alphabet: &Alphabet,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<RunOutcome> {
    let mut ga = ElitistGA::with_rng(target.clone(), alphabet.clone(), *config, rng)?;
    Ok(ga.run())
}

/// Shape and alphabet checks shared by every way of building an engine.
fn check_inputs(
    target: &Target,
    alphabet: &Alphabet,
    config: &EvolutionConfig,
    population: &[Candidate],
) -> Result<()> {
    alphabet.check(target.as_candidate().symbols())?;
    if population.len() != config.population_size() {
        return Err(EvolutionError::PopulationSizeMismatch {
            expected: config.population_size(),
            actual: population.len(),
        });
    }
    for candidate in population {
        target.check_len(candidate)?;
        alphabet.check(candidate.symbols())?;
    }
    Ok(())
}

/// Serialized engine as read back, before any checks.
#[derive(Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
struct EngineState<R> {
    target: Target,
    alphabet: Alphabet,
    config: EvolutionConfig,
    population: Vec<Phenotype>,
    generation: usize,
    rng: R,
}

impl<R> TryFrom<EngineState<R>> for ElitistGA<R> {
    type Error = EvolutionError;

    /// Stored scores are discarded and recomputed against the target.
    fn try_from(state: EngineState<R>) -> Result<Self> {
        let candidates: Vec<Candidate> = state.population.into_iter().map(|p| p.candidate).collect();
        check_inputs(&state.target, &state.alphabet, &state.config, &candidates)?;
        Ok(Self {
            population: score_all(&state.target, candidates),
            target: state.target,
            alphabet: state.alphabet,
            config: state.config,
            generation: state.generation,
            rng: state.rng,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "EngineState<R>",
    bound(serialize = "R: Serialize", deserialize = "R: Deserialize<'de>")
)]
pub struct ElitistGA<R = Pcg64> {
    target: Target,
    alphabet: Alphabet,
    config: EvolutionConfig,
    population: Vec<Phenotype>,
    generation: usize,
    rng: R,
}

impl ElitistGA<Pcg64> {
    /// Engine with a random initial population and a [`Pcg64`] stream seeded
    /// from `seed`.
    pub fn new(target: Target, alphabet: Alphabet, config: EvolutionConfig, seed: u64) -> Result<Self> {
        Self::with_rng(target, alphabet, config, Pcg64::seed_from_u64(seed))
    }
}

impl<R: Rng> ElitistGA<R> {
    /// Engine with a random initial population drawn from `rng`.
    pub fn with_rng(target: Target, alphabet: Alphabet, config: EvolutionConfig, mut rng: R) -> Result<Self> {
        alphabet.check(target.as_candidate().symbols())?;
        let initial = (0..config.population_size())
            .map(|_| Candidate::random(target.len(), &alphabet, &mut rng))
            .collect();
        Ok(Self::assemble(target, alphabet, config, initial, rng))
    }

    /// Engine starting from an explicit generation 0.
    pub fn with_population(
        target: Target,
        alphabet: Alphabet,
        config: EvolutionConfig,
        initial: Vec<Candidate>,
        rng: R,
    ) -> Result<Self> {
        check_inputs(&target, &alphabet, &config, &initial)?;
        Ok(Self::assemble(target, alphabet, config, initial, rng))
    }

    fn assemble(
        target: Target,
        alphabet: Alphabet,
        config: EvolutionConfig,
        initial: Vec<Candidate>,
        rng: R,
    ) -> Self {
        let population = score_all(&target, initial);
        Self {
            target,
            alphabet,
            config,
            population,
            generation: 0,
            rng,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// First member holding the highest score.
    pub fn best(&self) -> &Phenotype {
        let best = self
            .population
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| {
                if p.fitness > self.population[best].fitness {
                    i
                } else {
                    best
                }
            });
        &self.population[best]
    }

    pub fn state(&self) -> RunState {
        if self.best().fitness == self.target.len() {
            RunState::Converged
        } else if self.generation >= self.config.max_iterations() {
            RunState::Exhausted
        } else {
            RunState::Running
        }
    }

    /// Snapshot of the current generation as a result.
    pub fn outcome(&self) -> RunOutcome {
        let best = self.best();
        RunOutcome {
            best: best.candidate.clone(),
            fitness: best.fitness,
            generation: self.generation,
            state: self.state(),
        }
    }

    /// Breeds generations until the run converges or exhausts its budget.
    pub fn run(&mut self) -> RunOutcome {
        while self.state() == RunState::Running {
            self.step();
        }
        let outcome = self.outcome();
        match outcome.state {
            RunState::Converged => info!(
                "perfect match found at generation {}: {}",
                outcome.generation, outcome.best
            ),
            _ => info!(
                "gave up after {} generations, best fitness {}/{}: {}",
                outcome.generation,
                outcome.fitness,
                self.target.len(),
                outcome.best
            ),
        }
        outcome
    }
}

impl<R: Rng> Evolver for ElitistGA<R> {
    /// Breeds the next generation regardless of [`RunState`]; use
    /// [`ElitistGA::run`] to stop at termination.
    fn step(&mut self) {
        let size = self.config.population_size();
        let length = self.target.len();
        let rate = self.config.mutation_rate();

        let elites: Vec<Candidate> = rank(&self.population)
            .into_iter()
            .take(self.config.elitism())
            .map(|i| self.population[i].candidate.clone())
            .collect();
        trace!(
            "generation {} elites: {:?}",
            self.generation,
            elites.iter().map(|c| c.to_string()).collect::<Vec<_>>()
        );

        let mut next = Vec::with_capacity(size);
        next.extend(elites.iter().cloned());
        next.extend(
            (0..self.config.random_generated_candidate_num())
                .map(|_| Candidate::random(length, &self.alphabet, &mut self.rng)),
        );

        // The last batch is cut short at the population cap.
        let mut remaining = self.config.offspring_per_generation();
        while remaining > 0 {
            let pair = index::sample(&mut self.rng, elites.len(), 2);
            let (a, b) = (&elites[pair.index(0)], &elites[pair.index(1)]);
            let batch = self.config.crossover_num().min(remaining);
            for _ in 0..batch {
                let child = a
                    .crossover(b, &mut self.rng)
                    .mutate(rate, &self.alphabet, &mut self.rng);
                next.push(child);
            }
            remaining -= batch;
        }

        self.population = score_all(&self.target, next);
        self.generation += 1;
        debug!(
            "generation {}: best fitness {}/{}",
            self.generation,
            self.best().fitness,
            length
        );
    }

    fn population(&self) -> &[Phenotype] {
        &self.population
    }

    fn generation(&self) -> usize {
        self.generation
    }
}
