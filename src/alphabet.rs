use crate::error::{EvolutionError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Ordered set of symbols every candidate is drawn from.
///
/// The default alphabet holds the ASCII letters, digits and punctuation, in
/// that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `symbols`, in order.
    pub fn new(symbols: &str) -> Result<Self> {
        let mut seen = Vec::new();
        for c in symbols.chars() {
            if seen.contains(&c) {
                return Err(EvolutionError::DuplicateSymbol(c));
            }
            seen.push(c);
        }
        if seen.is_empty() {
            return Err(EvolutionError::EmptyAlphabet);
        }
        Ok(Self { symbols: seen })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; an alphabet is never constructed empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Draws one symbol uniformly.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.symbols[rng.random_range(0..self.symbols.len())]
    }

    /// Fails with the first symbol of `text` outside the alphabet.
    pub(crate) fn check(&self, text: &[char]) -> Result<()> {
        match text.iter().find(|c| !self.contains(**c)) {
            Some(&c) => Err(EvolutionError::UnknownSymbol(c)),
            None => Ok(()),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: LETTERS.chars().chain(DIGITS.chars()).chain(PUNCTUATION.chars()).collect(),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl TryFrom<String> for Alphabet {
    type Error = EvolutionError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_default_alphabet() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 94);
        assert_eq!(alphabet.symbols()[0], 'a');
        assert_eq!(alphabet.symbols()[93], '~');
        assert!(alphabet.contains('\\'));
        assert!(!alphabet.contains(' '));
        // Round trips through its own constructor, so no duplicates slipped in.
        assert_eq!(Alphabet::new(&alphabet.to_string()), Ok(alphabet));
    }

    #[test]
    fn test_rejects_bad_alphabets() {
        assert_eq!(Alphabet::new(""), Err(EvolutionError::EmptyAlphabet));
        assert_eq!(Alphabet::new("ABA"), Err(EvolutionError::DuplicateSymbol('A')));
    }

    #[test]
    fn test_sample_stays_in_alphabet() {
        let alphabet = Alphabet::new("xyz").unwrap();
        let mut rng = Pcg64::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let c = alphabet.sample(&mut rng);
            let idx = alphabet.symbols().iter().position(|&s| s == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "every symbol should be drawn: {seen:?}");
    }

    #[test]
    fn test_serde_as_string() {
        let alphabet = Alphabet::new("AB").unwrap();
        assert_eq!(serde_json::to_string(&alphabet).unwrap(), r#""AB""#);
        assert!(serde_json::from_str::<Alphabet>(r#""AA""#).is_err());
    }
}
