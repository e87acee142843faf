//! Run configuration
//!
//! Defaults mirror the visualizer: 50 elements, medium speed, random data on
//! a 10..=290 display range, 10 ms pacing unit.

use crate::custom;
use crate::patterns::{self, DataPattern};
use crate::ValidationError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sortrace_algorithms::AlgorithmKind;
use sortrace_core::{Pacer, Sequence};
use std::time::Duration;

/// Inclusive target range for element values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 10, max: 290 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Algorithm for single runs
    pub algorithm: AlgorithmKind,

    /// Number of generated elements (3..=100)
    pub size: usize,

    /// Speed factor (1..=10), higher is faster
    pub speed: u8,

    /// Shape of generated data
    pub pattern: DataPattern,

    pub value_range: ValueRange,

    /// Pacing unit in milliseconds. 0 disables wall-clock waits.
    pub step_unit_ms: u64,

    /// Seed for random-based patterns
    pub seed: Option<u64>,

    /// User-supplied values; replace the generated pattern when present
    pub custom_values: Option<String>,
}

impl RunConfig {
    pub const MIN_SIZE: usize = 3;
    pub const MAX_SIZE: usize = 100;

    /// Load from YAML and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ValidationError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&self.size) {
            return Err(ValidationError::SizeOutOfRange(self.size));
        }
        if !(Pacer::MIN_SPEED..=Pacer::MAX_SPEED).contains(&self.speed) {
            return Err(ValidationError::SpeedOutOfRange(self.speed));
        }
        if self.value_range.min >= self.value_range.max {
            return Err(ValidationError::InvalidRange {
                min: self.value_range.min,
                max: self.value_range.max,
            });
        }
        if let Some(text) = &self.custom_values {
            custom::parse_custom(text, self.value_range)?;
        }
        Ok(())
    }

    pub fn pacer(&self) -> Pacer {
        Pacer::new(self.speed, Duration::from_millis(self.step_unit_ms))
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate a sequence from the configured pattern.
    pub fn generate(&self, rng: &mut StdRng) -> Sequence {
        patterns::generate(self.pattern, self.size, self.value_range, rng)
    }

    /// The sequence a fresh session starts from: custom values if given,
    /// otherwise the configured pattern.
    pub fn initial_sequence(&self, rng: &mut StdRng) -> Result<Sequence, ValidationError> {
        match &self.custom_values {
            Some(text) => custom::parse_custom(text, self.value_range),
            None => Ok(self.generate(rng)),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::Bubble,
            size: 50,
            speed: 5,
            pattern: DataPattern::Random,
            value_range: ValueRange::default(),
            step_unit_ms: 10,
            seed: None,
            custom_values: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pacer(), Pacer::new(5, Duration::from_millis(10)));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RunConfig::from_yaml("algorithm: heap\nspeed: 9\npattern: mountain\n").unwrap();
        assert_eq!(config.algorithm, AlgorithmKind::Heap);
        assert_eq!(config.speed, 9);
        assert_eq!(config.pattern, DataPattern::Mountain);
        assert_eq!(config.size, 50);
        assert_eq!(config.value_range, ValueRange::default());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert_eq!(
            RunConfig::from_yaml("size: 2"),
            Err(ValidationError::SizeOutOfRange(2))
        );
        assert_eq!(
            RunConfig::from_yaml("speed: 11"),
            Err(ValidationError::SpeedOutOfRange(11))
        );
        assert_eq!(
            RunConfig::from_yaml("value_range: {min: 5, max: 5}"),
            Err(ValidationError::InvalidRange { min: 5, max: 5 })
        );
    }

    #[test]
    fn test_unknown_algorithm_is_a_yaml_error() {
        assert!(matches!(
            RunConfig::from_yaml("algorithm: bogo"),
            Err(ValidationError::Yaml(_))
        ));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = RunConfig { seed: Some(99), ..RunConfig::default() };
        let a = config.generate(&mut config.rng());
        let b = config.generate(&mut config.rng());
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn test_custom_values_override_pattern() {
        let config = RunConfig {
            custom_values: Some("3 1 2".to_string()),
            ..RunConfig::default()
        };
        let seq = config.initial_sequence(&mut config.rng()).unwrap();
        assert_eq!(seq.values(), vec![290, 10, 150]);
    }
}
