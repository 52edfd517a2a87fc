//! Vertex / member count distributions with structural floors.

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::sample::RandomSource;

/// Count distribution.
///
/// The caller's minimum is clamped up to the shape's structural floor, never
/// down; a maximum below the clamped minimum is raised to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountRange {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl CountRange {
    #[inline]
    pub const fn between(min: usize, max: usize) -> Self {
        Self::Uniform { min, max }
    }

    /// Effective inclusive `(lo, hi)` after clamping to `floor`.
    ///
    /// A raw `min > max` is a caller error, reported under `field`.
    pub fn resolve(&self, field: &'static str, floor: usize) -> Result<(usize, usize), GenError> {
        match *self {
            CountRange::Fixed(n) => {
                let n = n.max(floor);
                Ok((n, n))
            }
            CountRange::Uniform { min, max } => {
                if min > max {
                    return Err(GenError::InvalidCount { field, min, max });
                }
                let lo = min.max(floor);
                let hi = max.max(lo);
                Ok((lo, hi))
            }
        }
    }

    pub fn sample(
        &self,
        rng: &mut dyn RandomSource,
        field: &'static str,
        floor: usize,
    ) -> Result<usize, GenError> {
        let (lo, hi) = self.resolve(field, floor)?;
        Ok(rng.int_range(lo, hi))
    }
}

/// A count distribution plus the name of the setter that configured it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountSetting {
    pub field: &'static str,
    pub range: CountRange,
}

impl CountSetting {
    #[inline]
    pub const fn new(field: &'static str, range: CountRange) -> Self {
        Self { field, range }
    }

    pub fn sample(&self, rng: &mut dyn RandomSource, floor: usize) -> Result<usize, GenError> {
        self.range.sample(rng, self.field, floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn floor_clamps_up_never_down() {
        assert_eq!(CountRange::between(0, 1).resolve("v", 4), Ok((4, 4)));
        assert_eq!(CountRange::between(2, 9).resolve("v", 4), Ok((4, 9)));
        assert_eq!(CountRange::between(6, 9).resolve("v", 4), Ok((6, 9)));
        assert_eq!(CountRange::Fixed(1).resolve("v", 2), Ok((2, 2)));
        assert_eq!(CountRange::Fixed(7).resolve("v", 2), Ok((7, 7)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            CountRange::between(8, 5).resolve("vertices", 2),
            Err(GenError::InvalidCount {
                field: "vertices",
                min: 8,
                max: 5
            })
        );
    }

    #[test]
    fn samples_within_resolved_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let c = CountRange::between(1, 6);
        for _ in 0..100 {
            let n = c.sample(&mut rng, "length", 2).unwrap();
            assert!((2..=6).contains(&n));
        }
    }

    #[test]
    fn setting_reports_its_own_field() {
        let mut rng = StdRng::seed_from_u64(10);
        let s = CountSetting::new("members", CountRange::between(4, 1));
        assert_eq!(s.sample(&mut rng, 2).unwrap_err().field(), "members");
    }
}
