//! Temporary password generation for the credential recovery flow.

use rand::Rng;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

/// Length of every generated temporary password.
const TEMP_PASSWORD_LEN: usize = 12;

// Alphabets exclude glyphs that read ambiguously in mail clients
// (0/O, 1/l/I).
const UPPER: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghjkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+?";

/// Generates fixed-length temporary passwords with at least one character
/// from each class (upper, lower, digit, symbol), using the OS RNG.
#[derive(Debug, Clone)]
pub struct TempPasswordGenerator;

impl TempPasswordGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates one temporary password.
    pub fn generate(&self) -> String {
        let mut rng = OsRng;
        let mut chars: Vec<u8> = Vec::with_capacity(TEMP_PASSWORD_LEN);

        // One guaranteed character per class.
        chars.push(UPPER[rng.gen_range(0..UPPER.len())]);
        chars.push(LOWER[rng.gen_range(0..LOWER.len())]);
        chars.push(DIGITS[rng.gen_range(0..DIGITS.len())]);
        chars.push(SYMBOLS[rng.gen_range(0..SYMBOLS.len())]);

        let pool: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();
        while chars.len() < TEMP_PASSWORD_LEN {
            chars.push(pool[rng.gen_range(0..pool.len())]);
        }

        chars.shuffle(&mut rng);
        String::from_utf8(chars).expect("alphabets are ASCII")
    }
}

impl Default for TempPasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secrets_have_fixed_length_and_all_classes() {
        let generator = TempPasswordGenerator::new();
        for _ in 0..50 {
            let secret = generator.generate();
            assert_eq!(secret.len(), TEMP_PASSWORD_LEN);
            assert!(secret.bytes().any(|b| UPPER.contains(&b)));
            assert!(secret.bytes().any(|b| LOWER.contains(&b)));
            assert!(secret.bytes().any(|b| DIGITS.contains(&b)));
            assert!(secret.bytes().any(|b| SYMBOLS.contains(&b)));
        }
    }

    #[test]
    fn ambiguous_glyphs_never_appear() {
        let generator = TempPasswordGenerator::new();
        for _ in 0..50 {
            let secret = generator.generate();
            assert!(!secret.contains(['0', 'O', '1', 'l', 'I', 'o', 'i']));
        }
    }

    #[test]
    fn consecutive_secrets_differ() {
        let generator = TempPasswordGenerator::new();
        assert_ne!(generator.generate(), generator.generate());
    }
}
