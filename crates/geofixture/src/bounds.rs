//! Intervals, envelopes, and corner normalization.
//!
//! Model
//! - `Interval`: closed `[low, high]` on one axis. Validated lazily at
//!   `generate` time; `low > high` is rejected, never swapped.
//! - `Envelope`/`Envelope3`: axis-aligned box from two corners stored exactly as
//!   supplied. Corner order is not trusted; `bounds()` derives the canonical
//!   min/max per axis.
//! - `OctagonalEnvelope`: min/max along x, y, `x + y` and `x - y`; the
//!   tightest octagon with 45-degree cuts around a set of positions.
//! - `AxisBounds`: the validated per-axis intervals a sampler draws from.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::geom::{Coord, Positions};

/// Closed interval on a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    /// Longitude range used when no X range is configured.
    pub const LON: Self = Self::new(-180.0, 180.0);
    /// Latitude range used when no Y range is configured.
    pub const LAT: Self = Self::new(-90.0, 90.0);
    /// Elevation range used when Z is enabled without an explicit range.
    pub const ALTITUDE: Self = Self::new(-1000.0, 1000.0);
    /// Measure range used when M is enabled without an explicit range.
    pub const MEASURE: Self = Self::new(0.0, 10_000.0);

    #[inline]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Degenerate interval; sampling it always yields `value`.
    #[inline]
    pub const fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Check finiteness and ordering; `field` names the setter in errors.
    pub fn validate(self, field: &'static str) -> Result<Self, GenError> {
        for value in [self.low, self.high] {
            if !value.is_finite() {
                return Err(GenError::NonFinite { field, value });
            }
        }
        if self.low > self.high {
            return Err(GenError::InvalidInterval {
                field,
                low: self.low,
                high: self.high,
            });
        }
        Ok(self)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Overflows to infinity for intervals wider than `f64::MAX`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Canonical bounds of a 2D envelope.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundsRecord {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundsRecord {
    #[inline]
    pub fn lon(&self) -> Interval {
        Interval::new(self.min_lon, self.max_lon)
    }
    #[inline]
    pub fn lat(&self) -> Interval {
        Interval::new(self.min_lat, self.max_lat)
    }
}

/// Derive per-axis min/max from two corners in arbitrary order.
///
/// Pure and total for finite input.
pub fn normalize_corners(a: Vector2<f64>, b: Vector2<f64>) -> BoundsRecord {
    let lo = a.inf(&b);
    let hi = a.sup(&b);
    BoundsRecord {
        min_lon: lo.x,
        max_lon: hi.x,
        min_lat: lo.y,
        max_lat: hi.y,
    }
}

/// Axis-aligned rectangle given by two corners (order not guaranteed).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
}

impl Envelope {
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            a: Vector2::new(a.0, a.1),
            b: Vector2::new(b.0, b.1),
        }
    }

    /// Argument order `(x1, x2, y1, y2)`; neither pair needs to be sorted.
    pub fn from_bounds(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self::from_corners((x1, y1), (x2, y2))
    }

    pub fn world() -> Self {
        Self::from_bounds(-180.0, 180.0, -90.0, 90.0)
    }

    /// Greater New York; corners carry the northern latitude first.
    pub fn new_york_city() -> Self {
        Self::from_corners(
            (-74.2226031143777, 40.94553036267402),
            (-73.75468910748152, 40.531048935705286),
        )
    }

    #[inline]
    pub fn bounds(&self) -> BoundsRecord {
        normalize_corners(self.a, self.b)
    }

    /// Same box with `a` holding the minimum corner.
    pub fn normalized(&self) -> Self {
        Self {
            a: self.a.inf(&self.b),
            b: self.a.sup(&self.b),
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.a.x <= self.b.x && self.a.y <= self.b.y
    }

    pub fn min(&self) -> Coord {
        self.a.inf(&self.b).into()
    }

    pub fn max(&self) -> Coord {
        self.a.sup(&self.b).into()
    }

    pub fn contains(&self, c: &Coord) -> bool {
        let r = self.bounds();
        r.lon().contains(c.x) && r.lat().contains(c.y)
    }

    pub(crate) fn validate(&self, field: &'static str) -> Result<BoundsRecord, GenError> {
        for value in self.a.iter().chain(self.b.iter()) {
            if !value.is_finite() {
                return Err(GenError::NonFinite {
                    field,
                    value: *value,
                });
            }
        }
        Ok(self.bounds())
    }
}

/// Axis-aligned cuboid given by two corners (order not guaranteed).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope3 {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
}

impl Envelope3 {
    pub fn from_corners(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self { a, b }
    }

    pub fn normalized(&self) -> Self {
        Self {
            a: self.a.inf(&self.b),
            b: self.a.sup(&self.b),
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.a.x <= self.b.x && self.a.y <= self.b.y && self.a.z <= self.b.z
    }

    pub fn min(&self) -> Coord {
        self.a.inf(&self.b).into()
    }

    pub fn max(&self) -> Coord {
        self.a.sup(&self.b).into()
    }
}

/// Octagon bounded along x, y and both diagonals (`a = x + y`, `b = x - y`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctagonalEnvelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_a: f64,
    pub max_a: f64,
    pub min_b: f64,
    pub max_b: f64,
}

impl OctagonalEnvelope {
    /// Degenerate octagon at a single position.
    pub fn at(c: &Coord) -> Self {
        let (a, b) = (c.x + c.y, c.x - c.y);
        Self {
            min_x: c.x,
            max_x: c.x,
            min_y: c.y,
            max_y: c.y,
            min_a: a,
            max_a: a,
            min_b: b,
            max_b: b,
        }
    }

    pub fn expand_to_include(&mut self, c: &Coord) {
        let (a, b) = (c.x + c.y, c.x - c.y);
        self.min_x = self.min_x.min(c.x);
        self.max_x = self.max_x.max(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_y = self.max_y.max(c.y);
        self.min_a = self.min_a.min(a);
        self.max_a = self.max_a.max(a);
        self.min_b = self.min_b.min(b);
        self.max_b = self.max_b.max(b);
    }

    /// Octagon around every position of `shape`; `None` when it has none.
    pub fn of(shape: &(impl Positions + ?Sized)) -> Option<Self> {
        let mut out: Option<Self> = None;
        shape.for_each_coord(&mut |c: &Coord| {
            let next = match out {
                Some(mut o) => {
                    o.expand_to_include(c);
                    o
                }
                None => Self::at(c),
            };
            out = Some(next);
        });
        out
    }

    /// Octagon circumscribing the four corners of `env`.
    pub fn from_envelope(env: &Envelope) -> Self {
        let (lo, hi) = (env.min(), env.max());
        let corners = [lo, Coord::xy(lo.x, hi.y), hi, Coord::xy(hi.x, lo.y)];
        let mut out = Self::at(&lo);
        for c in &corners[1..] {
            out.expand_to_include(c);
        }
        out
    }

    pub fn contains(&self, c: &Coord) -> bool {
        let (a, b) = (c.x + c.y, c.x - c.y);
        (self.min_x..=self.max_x).contains(&c.x)
            && (self.min_y..=self.max_y).contains(&c.y)
            && (self.min_a..=self.max_a).contains(&a)
            && (self.min_b..=self.max_b).contains(&b)
    }

    pub(crate) fn validate(&self, field: &'static str) -> Result<Self, GenError> {
        let pairs = [
            (self.min_x, self.max_x),
            (self.min_y, self.max_y),
            (self.min_a, self.max_a),
            (self.min_b, self.max_b),
        ];
        for (low, high) in pairs {
            Interval::new(low, high).validate(field)?;
        }
        Ok(*self)
    }
}

/// Validated sampling bounds; `z` and `m` are `None` when their generation is
/// off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub x: Interval,
    pub y: Interval,
    pub z: Option<Interval>,
    pub m: Option<Interval>,
}

impl AxisBounds {
    pub fn geographic() -> Self {
        Self {
            x: Interval::LON,
            y: Interval::LAT,
            z: None,
            m: None,
        }
    }

    pub fn contains(&self, c: &Coord) -> bool {
        fn optional(iv: Option<Interval>, v: Option<f64>) -> bool {
            match (iv, v) {
                (Some(iv), Some(v)) => iv.contains(v),
                (None, None) => true,
                _ => false,
            }
        }
        self.x.contains(c.x)
            && self.y.contains(c.y)
            && optional(self.z, c.z)
            && optional(self.m, c.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_orders_swapped_corners() {
        let r = normalize_corners(Vector2::new(10.0, 20.0), Vector2::new(-5.0, -8.0));
        assert_eq!(
            r,
            BoundsRecord {
                min_lon: -5.0,
                max_lon: 10.0,
                min_lat: -8.0,
                max_lat: 20.0
            }
        );
    }

    #[test]
    fn normalizer_handles_mixed_order() {
        // x ascending, y descending
        let r = normalize_corners(Vector2::new(1.0, 9.0), Vector2::new(3.0, -9.0));
        assert_eq!((r.min_lon, r.max_lon), (1.0, 3.0));
        assert_eq!((r.min_lat, r.max_lat), (-9.0, 9.0));
    }

    #[test]
    fn sample_envelope_has_swapped_latitudes() {
        let nyc = Envelope::new_york_city();
        assert!(!nyc.is_canonical());
        let r = nyc.bounds();
        assert!(r.min_lat < r.max_lat);
        assert!(nyc.normalized().is_canonical());
        assert!(nyc.contains(&Coord::xy(-73.9655951, 40.7825967)));
    }

    #[test]
    fn interval_validation() {
        assert!(Interval::new(1.0, 1.0).validate("x_range").is_ok());
        assert_eq!(
            Interval::new(2.0, 1.0).validate("y_range"),
            Err(GenError::InvalidInterval {
                field: "y_range",
                low: 2.0,
                high: 1.0
            })
        );
        assert!(matches!(
            Interval::new(f64::NEG_INFINITY, 0.0).validate("z_range"),
            Err(GenError::NonFinite { field: "z_range", .. })
        ));
    }

    #[test]
    fn envelope3_normalizes_every_axis() {
        let e = Envelope3::from_corners(
            Vector3::new(1.0, -1.0, 5.0),
            Vector3::new(-1.0, 1.0, -5.0),
        );
        assert!(!e.is_canonical());
        let n = e.normalized();
        assert!(n.is_canonical());
        assert_eq!(n.min(), Coord::xyz(-1.0, -1.0, -5.0));
    }

    #[test]
    fn full_span_interval_is_valid_with_infinite_width() {
        let iv = Interval::new(-f64::MAX, f64::MAX);
        assert_eq!(iv.validate("x_range"), Ok(iv));
        assert!(iv.width().is_infinite());
        assert_eq!(Interval::LAT.width(), 180.0);
    }

    #[test]
    fn octagon_tracks_both_diagonals() {
        let pts = [Coord::xy(0.0, 0.0), Coord::xy(2.0, 1.0), Coord::xy(1.0, 3.0)];
        let o = OctagonalEnvelope::of(pts.as_slice()).unwrap();
        assert_eq!((o.min_x, o.max_x, o.min_y, o.max_y), (0.0, 2.0, 0.0, 3.0));
        assert_eq!((o.min_a, o.max_a), (0.0, 4.0));
        assert_eq!((o.min_b, o.max_b), (-2.0, 1.0));
        assert!(pts.iter().all(|c| o.contains(c)));
        // inside the bounding box, outside the x + y cut
        assert!(!o.contains(&Coord::xy(2.0, 3.0)));
        let empty: [Coord; 0] = [];
        assert!(OctagonalEnvelope::of(empty.as_slice()).is_none());
    }

    #[test]
    fn octagon_of_envelope_is_its_box() {
        let o = OctagonalEnvelope::from_envelope(&Envelope::from_bounds(4.0, -2.0, 1.0, 3.0));
        assert_eq!((o.min_x, o.max_x, o.min_y, o.max_y), (-2.0, 4.0, 1.0, 3.0));
        assert_eq!((o.min_a, o.max_a), (-1.0, 7.0));
        assert_eq!((o.min_b, o.max_b), (-5.0, 3.0));
    }
}
