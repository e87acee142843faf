//! Data-pattern generators.
//!
//! Every pattern has a fixed shape over `size` elements spread across the
//! value range; only `random`, `nearlySorted` and `manyDuplicates` draw from
//! the RNG.

use crate::config::ValueRange;
use crate::ValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sortrace_core::Sequence;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataPattern {
    #[default]
    Random,
    Sorted,
    Reverse,
    NearlySorted,
    ManyDuplicates,
    Mountain,
}

impl DataPattern {
    pub const ALL: [DataPattern; 6] = [
        DataPattern::Random,
        DataPattern::Sorted,
        DataPattern::Reverse,
        DataPattern::NearlySorted,
        DataPattern::ManyDuplicates,
        DataPattern::Mountain,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DataPattern::Random => "random",
            DataPattern::Sorted => "sorted",
            DataPattern::Reverse => "reverse",
            DataPattern::NearlySorted => "nearlySorted",
            DataPattern::ManyDuplicates => "manyDuplicates",
            DataPattern::Mountain => "mountain",
        }
    }
}

impl FromStr for DataPattern {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DataPattern::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownPattern(s.to_string()))
    }
}

impl fmt::Display for DataPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Distinct levels used by `manyDuplicates`
const DUPLICATE_LEVELS: u64 = 5;

/// Evenly spaced point `step` of `steps` across the range.
fn ramp(range: ValueRange, step: usize, steps: usize) -> u32 {
    if steps == 0 {
        return range.min;
    }
    let span = u64::from(range.max - range.min);
    range.min + (span * step as u64 / steps as u64) as u32
}

pub fn generate<R: Rng + ?Sized>(
    pattern: DataPattern,
    size: usize,
    range: ValueRange,
    rng: &mut R,
) -> Sequence {
    let last = size.saturating_sub(1);
    let values: Vec<u32> = match pattern {
        DataPattern::Random => (0..size).map(|_| rng.gen_range(range.min..=range.max)).collect(),
        DataPattern::Sorted => (0..size).map(|i| ramp(range, i, last)).collect(),
        DataPattern::Reverse => (0..size).map(|i| ramp(range, last - i, last)).collect(),
        DataPattern::NearlySorted => {
            let mut values: Vec<u32> = (0..size).map(|i| ramp(range, i, last)).collect();
            if size > 1 {
                for _ in 0..(size / 10).max(1) {
                    let i = rng.gen_range(0..last);
                    values.swap(i, i + 1);
                }
            }
            values
        }
        DataPattern::ManyDuplicates => {
            let levels = DUPLICATE_LEVELS.min(size as u64).max(1);
            (0..size)
                .map(|_| {
                    let level = rng.gen_range(0..levels) as usize;
                    ramp(range, level, (levels - 1) as usize)
                })
                .collect()
        }
        DataPattern::Mountain => (0..size)
            .map(|i| {
                let distance = (2 * i).abs_diff(last);
                ramp(range, last - distance.min(last), last)
            })
            .collect(),
    };

    tracing::debug!(pattern = %pattern, size, "generated sequence");
    Sequence::from(values)
}
