//! Candidates, targets and the operators that act on them.
//!
//! The methods on [`Candidate`] assume their inputs share one length, which
//! the engine guarantees by construction. The free functions
//! ([`fitness`], [`crossover`], [`mutate`], [`random_candidate`]) are the
//! checked entry points for callers holding arbitrary values.

use crate::alphabet::Alphabet;
use crate::error::{ConfigError, EvolutionError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One fixed-length guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Candidate(Vec<char>);

impl Candidate {
    /// Parses `text`, rejecting symbols outside `alphabet`.
    pub fn parse(text: &str, alphabet: &Alphabet) -> Result<Self> {
        let symbols: Vec<char> = text.chars().collect();
        alphabet.check(&symbols)?;
        Ok(Self(symbols))
    }

    /// `length` independent uniform draws from `alphabet`.
    pub fn random<R: Rng + ?Sized>(length: usize, alphabet: &Alphabet, rng: &mut R) -> Self {
        Self((0..length).map(|_| alphabet.sample(rng)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.0
    }

    /// Single-point crossover: `self[..split]` followed by `other[split..]`,
    /// with `split` uniform in `0..len`.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Self, rng: &mut R) -> Self {
        debug_assert_eq!(self.len(), other.len());
        let split = rng.random_range(0..self.0.len());
        let mut child = Vec::with_capacity(self.0.len());
        child.extend_from_slice(&self.0[..split]);
        child.extend_from_slice(&other.0[split..]);
        Self(child)
    }

    /// Replaces each symbol with probability `rate` by a fresh draw, which
    /// may equal the original.
    pub fn mutate<R: Rng + ?Sized>(&self, rate: f64, alphabet: &Alphabet, rng: &mut R) -> Self {
        Self(
            self.0
                .iter()
                .map(|&c| {
                    if rng.random::<f64>() < rate {
                        alphabet.sample(rng)
                    } else {
                        c
                    }
                })
                .collect(),
        )
    }

    /// Number of positions where the two candidates differ.
    pub fn distance(&self, other: &Self) -> usize {
        self.0.iter().zip(&other.0).filter(|(a, b)| a != b).count()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl From<String> for Candidate {
    fn from(text: String) -> Self {
        Self(text.chars().collect())
    }
}

impl From<Candidate> for String {
    fn from(candidate: Candidate) -> Self {
        candidate.0.into_iter().collect()
    }
}

/// The sequence a run evolves toward. Never empty. Every symbol belongs to
/// the alphabet it was built against; a deserialized target is only checked
/// against its alphabet when an engine is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Target(Candidate);

impl Target {
    pub fn new(text: &str, alphabet: &Alphabet) -> Result<Self> {
        let candidate = Candidate::parse(text, alphabet)?;
        if candidate.is_empty() {
            return Err(EvolutionError::EmptyTarget);
        }
        Ok(Self(candidate))
    }

    /// Random target of `length` symbols.
    pub fn random<R: Rng + ?Sized>(length: usize, alphabet: &Alphabet, rng: &mut R) -> Result<Self> {
        if length == 0 {
            return Err(EvolutionError::EmptyTarget);
        }
        Ok(Self(Candidate::random(length, alphabet, rng)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_candidate(&self) -> &Candidate {
        &self.0
    }

    /// Positional matches between `candidate` and the target. Lengths are
    /// assumed equal.
    pub fn score(&self, candidate: &Candidate) -> usize {
        self.0.0.iter().zip(&candidate.0).filter(|(a, b)| a == b).count()
    }

    pub(crate) fn check_len(&self, candidate: &Candidate) -> Result<()> {
        if candidate.len() != self.len() {
            return Err(EvolutionError::LengthMismatch {
                expected: self.len(),
                actual: candidate.len(),
            });
        }
        Ok(())
    }
}

impl TryFrom<String> for Target {
    type Error = EvolutionError;

    fn try_from(text: String) -> Result<Self> {
        if text.is_empty() {
            return Err(EvolutionError::EmptyTarget);
        }
        Ok(Self(Candidate::from(text)))
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.0.into()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Number of positions where `candidate` matches `target`, in `0..=len`.
pub fn fitness(candidate: &Candidate, target: &Target) -> Result<usize> {
    target.check_len(candidate)?;
    Ok(target.score(candidate))
}

/// Uniform random candidate of `length` symbols.
pub fn random_candidate<R: Rng + ?Sized>(
    length: usize,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<Candidate> {
    if length == 0 {
        return Err(EvolutionError::EmptyTarget);
    }
    Ok(Candidate::random(length, alphabet, rng))
}

/// Single-point crossover of two equal-length, non-empty parents.
pub fn crossover<R: Rng + ?Sized>(a: &Candidate, b: &Candidate, rng: &mut R) -> Result<Candidate> {
    if a.len() != b.len() {
        return Err(EvolutionError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Err(EvolutionError::EmptyTarget);
    }
    Ok(a.crossover(b, rng))
}

/// Per-symbol mutation with probability `rate`.
pub fn mutate<R: Rng + ?Sized>(
    candidate: &Candidate,
    rate: f64,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<Candidate> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::MutationRateOutOfRange(rate).into());
    }
    Ok(candidate.mutate(rate, alphabet, rng))
}
