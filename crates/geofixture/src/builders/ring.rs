//! Closed rings and polygons.
//!
//! Ring model
//! - Draw `n` from the configured count (floor 4, default 4..=10), draw `n - 1`
//!   independent positions, then append the first position again. Closure and
//!   length >= 4 therefore hold for every output, including counts at the floor.
//! - Polygons use one generated ring as exterior and no holes unless the caller
//!   supplies interior rings.

use super::{Counted, Elevated, Generate, Region, Spatial};
use crate::count::{CountRange, CountSetting};
use crate::error::GenError;
use crate::geom::{Coord, LinearRing, Polygon, Positions};
use crate::sample::{self, RandomSource};

#[derive(Clone, Debug, PartialEq)]
pub struct LinearRingGenerator {
    region: Region,
    count: CountSetting,
    explicit: Option<Vec<Coord>>,
}

impl Default for LinearRingGenerator {
    fn default() -> Self {
        Self {
            region: Region::default(),
            count: CountSetting::new("vertices", CountRange::between(4, 10)),
            explicit: None,
        }
    }
}

impl LinearRingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `coords` as the ring, closing it if first != last.
    pub fn coordinates(mut self, coords: Vec<Coord>) -> Self {
        self.explicit = Some(coords);
        self
    }
}

impl Spatial for LinearRingGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Elevated for LinearRingGenerator {}

impl Counted for LinearRingGenerator {
    fn count_mut(&mut self) -> &mut CountSetting {
        &mut self.count
    }
}

impl Generate for LinearRingGenerator {
    type Output = LinearRing;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<LinearRing, GenError> {
        if let Some(coords) = &self.explicit {
            coords.check_finite("coordinates")?;
            return LinearRing::closing(coords.clone());
        }
        let bounds = self.region.resolve()?;
        let n = self.count.sample(rng, LinearRing::MIN_POSITIONS)?;
        let mut coords = sample::coords(rng, &bounds, n - 1);
        coords.push(coords[0]);
        LinearRing::new(coords)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonGenerator {
    ring: LinearRingGenerator,
    exterior: Option<LinearRing>,
    holes: Vec<LinearRing>,
}

impl PolygonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exterior(mut self, ring: LinearRing) -> Self {
        self.exterior = Some(ring);
        self
    }

    /// Interior rings, attached verbatim to explicit or generated exteriors.
    pub fn holes(mut self, holes: Vec<LinearRing>) -> Self {
        self.holes = holes;
        self
    }

    pub fn rings(self, exterior: LinearRing, holes: Vec<LinearRing>) -> Self {
        self.exterior(exterior).holes(holes)
    }
}

impl Spatial for PolygonGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        self.ring.update_region(f);
    }
}

impl Elevated for PolygonGenerator {}

impl Counted for PolygonGenerator {
    fn count_mut(&mut self) -> &mut CountSetting {
        self.ring.count_mut()
    }
}

impl Generate for PolygonGenerator {
    type Output = Polygon;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Polygon, GenError> {
        self.holes.check_finite("holes")?;
        let exterior = match &self.exterior {
            Some(ring) => {
                ring.check_finite("exterior")?;
                ring.clone()
            }
            None => self.ring.generate(rng)?,
        };
        Ok(Polygon::new(exterior, self.holes.clone()))
    }
}
