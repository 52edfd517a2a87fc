//! Octagonal envelopes.
//!
//! Sources, highest priority first: an explicit octagon, a geometry, an
//! envelope, one or two positions. With none set, two positions are drawn
//! from the region and the octagon around them is returned; it may be
//! degenerate when both draws coincide.

use super::{Generate, Region, Spatial};
use crate::bounds::{Envelope, OctagonalEnvelope};
use crate::error::GenError;
use crate::geom::{Coord, Geometry, Positions};
use crate::sample::{self, RandomSource};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OctagonalEnvelopeGenerator {
    region: Region,
    octagon: Option<OctagonalEnvelope>,
    geometry: Option<Geometry>,
    envelope: Option<Envelope>,
    coords: Vec<Coord>,
}

impl OctagonalEnvelopeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn octagon(mut self, octagon: OctagonalEnvelope) -> Self {
        self.octagon = Some(octagon);
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    pub fn coordinate(mut self, c: Coord) -> Self {
        self.coords = vec![c];
        self
    }

    pub fn coordinates(mut self, a: Coord, b: Coord) -> Self {
        self.coords = vec![a, b];
        self
    }
}

impl Spatial for OctagonalEnvelopeGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Generate for OctagonalEnvelopeGenerator {
    type Output = OctagonalEnvelope;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<OctagonalEnvelope, GenError> {
        if let Some(octagon) = &self.octagon {
            return octagon.validate("octagon");
        }
        if let Some(geometry) = &self.geometry {
            geometry.check_finite("geometry")?;
            return OctagonalEnvelope::of(geometry).ok_or_else(|| {
                GenError::malformed("octagonal envelope", "geometry has no positions")
            });
        }
        if let Some(envelope) = &self.envelope {
            envelope.validate("envelope")?;
            return Ok(OctagonalEnvelope::from_envelope(envelope));
        }
        let coords = if self.coords.is_empty() {
            let bounds = self.region.resolve()?;
            sample::coords(rng, &bounds, 2)
        } else {
            self.coords.check_finite("coordinates")?;
            self.coords.clone()
        };
        OctagonalEnvelope::of(coords.as_slice())
            .ok_or_else(|| GenError::malformed("octagonal envelope", "no positions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{LineString, Point};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_octagon_covers_region_draws() {
        let mut rng = StdRng::seed_from_u64(80);
        let env = Envelope::new_york_city();
        let box_oct = OctagonalEnvelope::from_envelope(&env);
        let gen = OctagonalEnvelopeGenerator::new().within(env);
        for _ in 0..50 {
            let o = gen.generate(&mut rng).unwrap();
            assert!(o.min_x <= o.max_x && o.min_a <= o.max_a && o.min_b <= o.max_b);
            for c in [Coord::xy(o.min_x, o.min_y), Coord::xy(o.max_x, o.max_y)] {
                assert!(box_oct.contains(&c));
            }
        }
    }

    #[test]
    fn single_coordinate_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(81);
        let c = Coord::xy(3.0, -1.0);
        let o = OctagonalEnvelopeGenerator::new()
            .coordinate(c)
            .generate(&mut rng)
            .unwrap();
        assert_eq!(o, OctagonalEnvelope::at(&c));
        assert_eq!((o.min_a, o.min_b), (2.0, 4.0));
    }

    #[test]
    fn geometry_wins_over_envelope_and_coordinates() {
        let mut rng = StdRng::seed_from_u64(82);
        let line = LineString::new(vec![Coord::xy(0.0, 0.0), Coord::xy(1.0, 2.0)]).unwrap();
        let o = OctagonalEnvelopeGenerator::new()
            .coordinate(Coord::xy(50.0, 50.0))
            .envelope(Envelope::world())
            .geometry(Geometry::LineString(line.clone()))
            .generate(&mut rng)
            .unwrap();
        assert_eq!(Some(o), OctagonalEnvelope::of(&line));
        assert_eq!((o.max_x, o.max_y, o.max_a), (1.0, 2.0, 3.0));
    }

    #[test]
    fn explicit_octagon_is_validated() {
        let mut rng = StdRng::seed_from_u64(83);
        let mut bad = OctagonalEnvelope::at(&Coord::xy(0.0, 0.0));
        bad.min_a = 1.0;
        let err = OctagonalEnvelopeGenerator::new()
            .octagon(bad)
            .generate(&mut rng)
            .unwrap_err();
        assert!(matches!(err, GenError::InvalidInterval { field: "octagon", .. }));
    }

    #[test]
    fn non_finite_sources_are_rejected() {
        let mut rng = StdRng::seed_from_u64(84);
        let err = OctagonalEnvelopeGenerator::new()
            .geometry(Geometry::Point(Point(Coord::xy(f64::NAN, 0.0))))
            .generate(&mut rng)
            .unwrap_err();
        assert_eq!(err.field(), "geometry");
        let err = OctagonalEnvelopeGenerator::new()
            .coordinates(Coord::xy(0.0, 0.0), Coord::xy(f64::INFINITY, 0.0))
            .generate(&mut rng)
            .unwrap_err();
        assert_eq!(err.field(), "coordinates");
    }
}
