//! Single-position builders.

use super::{Elevated, Generate, Measured, Region, Spatial};
use crate::bounds::Interval;
use crate::error::GenError;
use crate::geom::{Coord, Point};
use crate::sample::{scalar, RandomSource};

/// Draws one `Coord`; any axis may be pinned to a fixed value.
///
/// Pinned axes consume no draws. The region is still validated so a bad
/// configuration fails even when every axis is pinned, and pinned values
/// must be finite.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordGenerator {
    region: Region,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    m: Option<f64>,
}

impl CoordGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn longitude(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn latitude(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Pins Z; the output carries a Z value even without `z_range`.
    pub fn altitude(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Pins M; the output carries a measure even without `m_range`.
    pub fn measure(mut self, m: f64) -> Self {
        self.m = Some(m);
        self
    }
}

/// Pinned value if set, otherwise a draw from `bounds` when that axis is on.
fn axis(
    rng: &mut dyn RandomSource,
    pin: Option<f64>,
    bounds: Option<Interval>,
    field: &'static str,
) -> Result<Option<f64>, GenError> {
    match (pin, bounds) {
        (Some(value), _) if !value.is_finite() => Err(GenError::NonFinite { field, value }),
        (Some(value), _) => Ok(Some(value)),
        (None, Some(iv)) => Ok(Some(scalar(rng, iv))),
        (None, None) => Ok(None),
    }
}

impl Spatial for CoordGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Elevated for CoordGenerator {}

impl Measured for CoordGenerator {}

impl Generate for CoordGenerator {
    type Output = Coord;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Coord, GenError> {
        let bounds = self.region.resolve()?;
        let x = axis(rng, self.x, Some(bounds.x), "longitude")?.unwrap_or(bounds.x.low);
        let y = axis(rng, self.y, Some(bounds.y), "latitude")?.unwrap_or(bounds.y.low);
        let z = axis(rng, self.z, bounds.z, "altitude")?;
        let m = axis(rng, self.m, bounds.m, "measure")?;
        Ok(Coord { x, y, z, m })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointGenerator {
    coord: CoordGenerator,
}

impl PointGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the point; overrides ranges and envelope.
    pub fn coordinate(mut self, x: f64, y: f64) -> Self {
        self.coord = self.coord.coordinate(x, y);
        self
    }

    pub fn measure(mut self, m: f64) -> Self {
        self.coord = self.coord.measure(m);
        self
    }
}

impl Spatial for PointGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        self.coord.update_region(f);
    }
}

impl Elevated for PointGenerator {}

impl Measured for PointGenerator {}

impl Generate for PointGenerator {
    type Output = Point;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Point, GenError> {
        self.coord.generate(rng).map(Point)
    }
}
