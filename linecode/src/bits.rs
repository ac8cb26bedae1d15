/*!
Bit sequence parsing, validation and generation.

A [`BitSequence`] can only be built from validated input, so the encoders
never see an empty sequence or a character other than `0`/`1`.
*/

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Shortest sequence produced by [`BitSequence::random`]
pub const RANDOM_MIN_LEN: usize = 4;

/// Longest sequence produced by [`BitSequence::random`]
pub const RANDOM_MAX_LEN: usize = 11;

/// A single binary digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    /// Parse a bit from its digit character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            _ => None,
        }
    }

    /// Digit character for this bit
    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }

    pub fn is_one(self) -> bool {
        matches!(self, Self::One)
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Self::One
        } else {
            Self::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Errors that can occur while validating a bit string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    #[error("Please enter a binary string")]
    Empty,

    #[error("Invalid input! Please enter only 0s and 1s (found {ch:?} at position {position})")]
    InvalidCharacter { ch: char, position: usize },
}

fn invalid_char_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^01]").expect("constant pattern"))
}

/// Non-empty, immutable sequence of bits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitSequence {
    bits: Vec<Bit>,
}

impl BitSequence {
    /// Parse a bit string, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Result<Self, BitError> {
        let value = input.trim();
        if value.is_empty() {
            return Err(BitError::Empty);
        }

        if let Some(m) = invalid_char_pattern().find(value) {
            let ch = m.as_str().chars().next().unwrap_or_default();
            let position = value[..m.start()].chars().count();
            return Err(BitError::InvalidCharacter { ch, position });
        }

        let bits = value.chars().filter_map(Bit::from_char).collect();
        Ok(Self { bits })
    }

    /// Build a sequence from already-typed bits
    pub fn from_bits(bits: Vec<Bit>) -> Result<Self, BitError> {
        if bits.is_empty() {
            return Err(BitError::Empty);
        }
        Ok(Self { bits })
    }

    /// Generate a random sequence with a length uniformly chosen in
    /// `RANDOM_MIN_LEN..=RANDOM_MAX_LEN` and independent uniform bits
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let len = rng.gen_range(RANDOM_MIN_LEN..=RANDOM_MAX_LEN);
        let bits = (0..len).map(|_| Bit::from(rng.gen_bool(0.5))).collect();
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for BitSequence {
    type Err = BitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BitSequence {
    type Error = BitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BitSequence> for String {
    fn from(value: BitSequence) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_valid() {
        let seq = BitSequence::parse("1011").unwrap();
        assert_eq!(seq.bits(), &[Bit::One, Bit::Zero, Bit::One, Bit::One]);
        assert_eq!(seq.to_string(), "1011");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let seq = BitSequence::parse("  0110\n").unwrap();
        assert_eq!(seq.to_string(), "0110");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(BitSequence::parse(""), Err(BitError::Empty));
        assert_eq!(BitSequence::parse("   "), Err(BitError::Empty));
        assert_eq!(BitSequence::from_bits(Vec::new()), Err(BitError::Empty));
    }

    #[test]
    fn test_parse_reports_first_invalid_character() {
        assert_eq!(
            BitSequence::parse("10a1"),
            Err(BitError::InvalidCharacter { ch: 'a', position: 2 })
        );
        assert_eq!(
            BitSequence::parse("1 0"),
            Err(BitError::InvalidCharacter { ch: ' ', position: 1 })
        );
        assert_eq!(
            BitSequence::parse("0é1"),
            Err(BitError::InvalidCharacter { ch: 'é', position: 1 })
        );
    }

    #[test]
    fn test_random_length_and_content() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let seq = BitSequence::random(&mut rng);
            assert!((RANDOM_MIN_LEN..=RANDOM_MAX_LEN).contains(&seq.len()));
            assert!(BitSequence::parse(&seq.to_string()).is_ok());
        }
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = BitSequence::random(&mut StdRng::seed_from_u64(42));
        let b = BitSequence::random(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_as_string() {
        let seq = BitSequence::parse("1100").unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "\"1100\"");

        let back: BitSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);

        assert!(serde_json::from_str::<BitSequence>("\"12\"").is_err());
    }
}
