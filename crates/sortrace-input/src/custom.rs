//! Custom value parsing for user-supplied sequences.
//!
//! Accepts numbers separated by commas, semicolons or whitespace, then
//! rescales them linearly onto the configured display range so the smallest
//! input lands on `min` and the largest on `max`.

use crate::config::ValueRange;
use crate::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use sortrace_core::Sequence;

lazy_static! {
    /// Separators between values
    static ref SEPARATORS: Regex = Regex::new(r"[,;\s]+").unwrap();
}

pub const MIN_VALUES: usize = 3;
pub const MAX_VALUES: usize = 100;

/// Split and parse without rescaling.
pub fn parse_values(text: &str) -> Result<Vec<f64>, ValidationError> {
    let values = SEPARATORS
        .split(text.trim())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ValidationError::NotANumber {
                token: token.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() < MIN_VALUES {
        return Err(ValidationError::TooFew { count: values.len() });
    }
    if values.len() > MAX_VALUES {
        return Err(ValidationError::TooMany { count: values.len() });
    }
    Ok(values)
}

/// Rescale onto `range`, endpoints inclusive.
pub fn normalize(values: &[f64], range: ValueRange) -> Result<Vec<u32>, ValidationError> {
    if range.min >= range.max {
        return Err(ValidationError::InvalidRange {
            min: range.min,
            max: range.max,
        });
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return Err(ValidationError::ZeroRange);
    }

    let span = f64::from(range.max - range.min);
    Ok(values
        .iter()
        .map(|v| {
            let scaled = f64::from(range.min) + (v - lo) / (hi - lo) * span;
            scaled.round() as u32
        })
        .collect())
}

/// Parse and rescale a custom input into a fresh sequence.
pub fn parse_custom(text: &str, range: ValueRange) -> Result<Sequence, ValidationError> {
    let values = parse_values(text)?;
    let scaled = normalize(&values, range)?;
    Ok(Sequence::from(scaled))
}
