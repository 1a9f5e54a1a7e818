//! Parsing and generation of input sequences.
//!
//! User-typed lists arrive as comma-separated text; anything that is not
//! an integer is an [`EngineError::InvalidInput`] naming the offending
//! token, so the message can go straight to the status line. Random
//! sequences use the small-rng generator with an optional seed for
//! reproducible demos.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::stepper::errors::EngineError;

/// Smallest value the random generator produces.
pub const RANDOM_MIN: i64 = 3;

/// Largest value the random generator produces.
pub const RANDOM_MAX: i64 = 32;

/// Parse a comma-separated integer list.
///
/// Whitespace around tokens is ignored and empty tokens (doubled or
/// trailing commas) are skipped, so `" 5, 3 ,8,"` parses to `[5, 3, 8]`.
/// Empty text parses to an empty sequence.
pub fn parse_values(text: &str) -> Result<Vec<i64>, EngineError> {
    let mut values = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<i64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                return Err(EngineError::InvalidInput {
                    reason: format!("'{}' is not an integer", token),
                })
            }
        }
    }
    Ok(values)
}

/// Generate `count` values in `RANDOM_MIN..=RANDOM_MAX`, the range that
/// renders well as bars. A seed makes the sequence reproducible.
pub fn random_values(count: usize, seed: Option<u64>) -> Vec<i64> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    (0..count).map(|_| rng.random_range(RANDOM_MIN..=RANDOM_MAX)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spaced_and_trailing_commas() {
        assert_eq!(
            parse_values(" 5, 3 ,8,").expect("valid list"),
            vec![5, 3, 8]
        );
        assert_eq!(parse_values("-2,0,7").expect("negatives"), vec![-2, 0, 7]);
        assert_eq!(parse_values("").expect("empty"), Vec::<i64>::new());
    }

    #[test]
    fn names_the_bad_token() {
        let err = parse_values("5,abc,8").expect_err("non-integer");
        match err {
            EngineError::InvalidInput { reason } => assert!(reason.contains("abc")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = random_values(16, Some(7));
        let b = random_values(16, Some(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.iter().all(|&v| (RANDOM_MIN..=RANDOM_MAX).contains(&v)));
    }
}
