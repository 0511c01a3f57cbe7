//! Random redemption code generation.
//!
//! Codes are drawn uniformly from [`CODE_ALPHABET`] and collected by rejection
//! sampling until the requested number of distinct codes is reached. The
//! randomness source is always passed in by the caller.
//!
//! Sampling is bounded two ways: a request that cannot fit in the code space
//! (`36^length < count`) fails before any draw, and every batch gets an attempt
//! budget of `count * attempts_per_code`.

use rand::{Rng, seq::IndexedRandom};

use crate::types::CodeSet;

/// Symbols a redemption code is made of.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A batch could not be generated within the code space or attempt budget.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// Fewer distinct codes exist at this length than were requested.
    #[error("cannot generate {requested} distinct codes of length {length}: only {available} exist")]
    CodeSpaceTooSmall {
        requested: usize,
        length: usize,
        available: u128,
    },
    /// The attempt budget ran out before enough distinct codes were drawn.
    #[error("generated only {generated} of {requested} distinct codes after {attempts} attempts")]
    AttemptsExhausted {
        requested: usize,
        generated: usize,
        attempts: usize,
    },
}

/// Bounds on batch size, code length, and sampling effort.
///
/// Values above the hard caps are clamped and zero is raised to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    max_codes: usize,
    max_code_length: usize,
    attempts_per_code: usize,
}

impl GenerationLimits {
    pub const DEFAULT_MAX_CODES: usize = 250;
    pub const MAX_CODES_HARD_CAP: usize = 10_000;
    pub const DEFAULT_MAX_CODE_LENGTH: usize = 32;
    /// Shopify rejects codes longer than 255 characters.
    pub const CODE_LENGTH_HARD_CAP: usize = 255;
    pub const DEFAULT_ATTEMPTS_PER_CODE: usize = 16;
    pub const ATTEMPTS_PER_CODE_HARD_CAP: usize = 1_024;

    /// Create limits, clamping each value into `1..=hard cap`.
    #[must_use]
    pub fn new(max_codes: usize, max_code_length: usize, attempts_per_code: usize) -> Self {
        Self {
            max_codes: max_codes.clamp(1, Self::MAX_CODES_HARD_CAP),
            max_code_length: max_code_length.clamp(1, Self::CODE_LENGTH_HARD_CAP),
            attempts_per_code: attempts_per_code.clamp(1, Self::ATTEMPTS_PER_CODE_HARD_CAP),
        }
    }

    /// Largest batch a single request may ask for.
    #[must_use]
    pub const fn max_codes(&self) -> usize {
        self.max_codes
    }

    /// Longest code a single request may ask for.
    #[must_use]
    pub const fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    /// Draws allowed per requested code before giving up.
    #[must_use]
    pub const fn attempts_per_code(&self) -> usize {
        self.attempts_per_code
    }
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_CODES,
            Self::DEFAULT_MAX_CODE_LENGTH,
            Self::DEFAULT_ATTEMPTS_PER_CODE,
        )
    }
}

/// Number of distinct codes of `length`, or `None` if it exceeds `u128`.
#[must_use]
pub fn code_space(length: usize) -> Option<u128> {
    let alphabet = u128::try_from(CODE_ALPHABET.len()).ok()?;
    alphabet.checked_pow(u32::try_from(length).ok()?)
}

/// Draw one code of `length` symbols.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .filter_map(|_| CODE_ALPHABET.choose(&mut *rng))
        .map(|&symbol| char::from(symbol))
        .collect()
}

/// Generates batches of distinct redemption codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator {
    limits: GenerationLimits,
}

impl CodeGenerator {
    #[must_use]
    pub const fn new(limits: GenerationLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub const fn limits(&self) -> &GenerationLimits {
        &self.limits
    }

    /// Generate exactly `count` distinct codes of `length` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::CodeSpaceTooSmall`] when the code space cannot
    /// hold `count` codes, and [`CapacityError::AttemptsExhausted`] when the
    /// attempt budget runs out.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        length: usize,
    ) -> Result<CodeSet, CapacityError> {
        if let Some(available) = code_space(length)
            && available < u128::try_from(count).unwrap_or(u128::MAX)
        {
            return Err(CapacityError::CodeSpaceTooSmall {
                requested: count,
                length,
                available,
            });
        }

        let budget = count.saturating_mul(self.limits.attempts_per_code);
        let mut codes = CodeSet::with_capacity(count);
        let mut attempts = 0;

        while codes.len() < count {
            if attempts >= budget {
                return Err(CapacityError::AttemptsExhausted {
                    requested: count,
                    generated: codes.len(),
                    attempts,
                });
            }
            attempts += 1;
            codes.insert(random_code(rng, length));
        }

        Ok(codes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::{RngCore, SeedableRng, rngs::StdRng};

    use super::*;

    /// Always yields zero, so every draw produces the same code.
    struct ConstantRng;

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_alphabet_is_upper_alphanumeric() {
        assert_eq!(CODE_ALPHABET.len(), 36);
        assert!(
            CODE_ALPHABET
                .iter()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        );
    }

    #[test]
    fn test_random_code_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [1, 6, 8, 32] {
            let code = random_code(&mut rng, length);
            assert_eq!(code.len(), length);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_exact_count_and_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let codes = CodeGenerator::default().generate(&mut rng, 50, 6).unwrap();

        assert_eq!(codes.len(), 50);
        for code in &codes {
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_fills_entire_small_space() {
        // Every single-symbol code: the last few draws collide often
        let mut rng = StdRng::seed_from_u64(1);
        let codes = CodeGenerator::default().generate(&mut rng, 36, 1).unwrap();
        assert_eq!(codes.len(), 36);
        for symbol in CODE_ALPHABET {
            assert!(codes.contains(&char::from(*symbol).to_string()));
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let generator = CodeGenerator::default();
        let a = generator
            .generate(&mut StdRng::seed_from_u64(99), 10, 8)
            .unwrap();
        let b = generator
            .generate(&mut StdRng::seed_from_u64(99), 10, 8)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_with_thread_rng_differs_between_calls() {
        let generator = CodeGenerator::default();
        let a = generator.generate(&mut rand::rng(), 5, 8).unwrap();
        let b = generator.generate(&mut rand::rng(), 5, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_code_space_too_small() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = CodeGenerator::default()
            .generate(&mut rng, 37, 1)
            .unwrap_err();
        assert_eq!(
            err,
            CapacityError::CodeSpaceTooSmall {
                requested: 37,
                length: 1,
                available: 36,
            }
        );
    }

    #[test]
    fn test_attempt_budget_exhausted() {
        let generator = CodeGenerator::new(GenerationLimits::new(100, 32, 4));
        let err = generator.generate(&mut ConstantRng, 3, 8).unwrap_err();
        assert_eq!(
            err,
            CapacityError::AttemptsExhausted {
                requested: 3,
                generated: 1,
                attempts: 12,
            }
        );
    }

    #[test]
    fn test_code_space() {
        assert_eq!(code_space(0), Some(1));
        assert_eq!(code_space(2), Some(1_296));
        assert_eq!(code_space(255), None);
    }

    #[test]
    fn test_limits_clamped() {
        let limits = GenerationLimits::new(0, 1_000, usize::MAX);
        assert_eq!(limits.max_codes(), 1);
        assert_eq!(limits.max_code_length(), GenerationLimits::CODE_LENGTH_HARD_CAP);
        assert_eq!(
            limits.attempts_per_code(),
            GenerationLimits::ATTEMPTS_PER_CODE_HARD_CAP
        );
    }

    #[test]
    fn test_default_limits() {
        let limits = GenerationLimits::default();
        assert_eq!(limits.max_codes(), 250);
        assert_eq!(limits.max_code_length(), 32);
        assert_eq!(limits.attempts_per_code(), 16);
    }
}
