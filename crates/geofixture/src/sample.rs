//! Uniform sampling primitives and the random-source seam.
//!
//! Purpose
//! - `RandomSource` is the only thing a host must supply: inclusive uniform
//!   draws over `f64` and `usize` ranges. Every `rand::Rng` qualifies.
//! - `scalar`/`coord`/`coords` draw within validated `AxisBounds`; axes are
//!   independent draws in x, y, z, m order.
//! - `ReplayToken` derives an independent, reproducible RNG per fixture.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::bounds::{AxisBounds, Interval};
use crate::geom::Coord;

/// Uniform draws consumed by generators.
///
/// Thread safety of the source is the caller's concern; generators never
/// share one internally.
pub trait RandomSource {
    /// Uniform in `[low, high]`; returns `low` when `low >= high`.
    fn double_range(&mut self, low: f64, high: f64) -> f64;
    /// Uniform in `[low, high]`; returns `low` when `low >= high`.
    fn int_range(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn double_range(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn int_range(&mut self, low: usize, high: usize) -> usize {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }
}

/// One draw in `interval`. Pre: `interval` was validated.
///
/// Intervals wider than `f64::MAX` are sampled by interpolating between the
/// endpoints, since `high - low` itself overflows.
#[inline]
pub fn scalar(rng: &mut dyn RandomSource, interval: Interval) -> f64 {
    let v = if interval.width().is_finite() {
        rng.double_range(interval.low, interval.high)
    } else {
        let t = rng.double_range(0.0, 1.0);
        interval.low * (1.0 - t) + interval.high * t
    };
    v.max(interval.low).min(interval.high)
}

/// One position; Z and M are drawn only when their bounds are set.
pub fn coord(rng: &mut dyn RandomSource, bounds: &AxisBounds) -> Coord {
    let x = scalar(rng, bounds.x);
    let y = scalar(rng, bounds.y);
    let z = bounds.z.map(|iv| scalar(rng, iv));
    let m = bounds.m.map(|iv| scalar(rng, iv));
    Coord { x, y, z, m }
}

/// `n` independent positions in draw order.
pub fn coords(rng: &mut dyn RandomSource, bounds: &AxisBounds, n: usize) -> Vec<Coord> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(coord(rng, bounds));
    }
    out
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    /// Independent RNG for fixture `index` of the stream `seed`.
    #[inline]
    pub fn rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn degenerate_interval_ignores_draws() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(scalar(&mut rng, Interval::point(10.0)), 10.0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(scalar(&mut rng, Interval::point(-2.5)), -2.5);
    }

    #[test]
    fn extreme_draws_stay_in_range() {
        let iv = Interval::new(-1.0, 1.0);
        for start in [0, u64::MAX] {
            let mut rng = StepRng::new(start, 0);
            let v = scalar(&mut rng, iv);
            assert!(iv.contains(v), "{v} outside {iv:?}");
        }
    }

    #[test]
    fn full_f64_span_does_not_overflow() {
        let iv = Interval::new(-f64::MAX, f64::MAX);
        for start in [0, u64::MAX] {
            let mut rng = StepRng::new(start, 0);
            let v = scalar(&mut rng, iv);
            assert!(v.is_finite() && iv.contains(v), "{v}");
        }
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            assert!(scalar(&mut rng, iv).is_finite());
        }
    }

    #[test]
    fn coord_draws_z_and_m_only_when_enabled() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut bounds = AxisBounds::geographic();
        let c = coord(&mut rng, &bounds);
        assert!(c.z.is_none() && c.m.is_none());
        bounds.z = Some(Interval::new(0.0, 5.0));
        let c = coord(&mut rng, &bounds);
        assert!(c.m.is_none() && bounds.contains(&c));
        bounds.m = Some(Interval::new(100.0, 200.0));
        let c = coord(&mut rng, &bounds);
        assert!(c.m.is_some() && bounds.contains(&c));
    }

    #[test]
    fn replay_tokens_are_reproducible_and_distinct() {
        let a = ReplayToken { seed: 42, index: 7 };
        let x: u64 = a.rng().gen();
        let y: u64 = a.rng().gen();
        assert_eq!(x, y);
        let b = ReplayToken { seed: 42, index: 8 };
        let z: u64 = b.rng().gen();
        assert_ne!(x, z);
    }

    #[test]
    fn int_range_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = rng.int_range(2, 4);
            seen[v - 2] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
