//! Open paths: line strings, segments, triangles.

use super::{Counted, Elevated, Generate, Region, Spatial};
use crate::count::{CountRange, CountSetting};
use crate::error::GenError;
use crate::geom::{Coord, LineSegment, LineString, Positions, Triangle};
use crate::sample::{self, RandomSource};

/// Line string with a uniformly drawn vertex count (floor 2, default 2..=8).
///
/// Points are independent draws kept in draw order; nothing is sorted.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStringGenerator {
    region: Region,
    count: CountSetting,
    explicit: Option<Vec<Coord>>,
}

impl Default for LineStringGenerator {
    fn default() -> Self {
        Self {
            region: Region::default(),
            count: CountSetting::new("vertices", CountRange::between(2, 8)),
            explicit: None,
        }
    }
}

impl LineStringGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `coords` verbatim; bypasses sampling and the count draw.
    pub fn coordinates(mut self, coords: Vec<Coord>) -> Self {
        self.explicit = Some(coords);
        self
    }
}

impl Spatial for LineStringGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Elevated for LineStringGenerator {}

impl Counted for LineStringGenerator {
    fn count_mut(&mut self) -> &mut CountSetting {
        &mut self.count
    }
}

impl Generate for LineStringGenerator {
    type Output = LineString;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<LineString, GenError> {
        if let Some(coords) = &self.explicit {
            coords.check_finite("coordinates")?;
            return LineString::new(coords.clone());
        }
        let bounds = self.region.resolve()?;
        let n = self.count.sample(rng, LineString::MIN_POSITIONS)?;
        LineString::new(sample::coords(rng, &bounds, n))
    }
}

/// Two independent draws; start/end keep draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineSegmentGenerator {
    region: Region,
}

impl LineSegmentGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Spatial for LineSegmentGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Generate for LineSegmentGenerator {
    type Output = LineSegment;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<LineSegment, GenError> {
        let bounds = self.region.resolve()?;
        let start = sample::coord(rng, &bounds);
        let end = sample::coord(rng, &bounds);
        Ok(LineSegment { start, end })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleGenerator {
    region: Region,
    explicit: Option<[Coord; 3]>,
}

impl TriangleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(mut self, p0: Coord, p1: Coord, p2: Coord) -> Self {
        self.explicit = Some([p0, p1, p2]);
        self
    }
}

impl Spatial for TriangleGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Generate for TriangleGenerator {
    type Output = Triangle;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Triangle, GenError> {
        if let Some(vertices) = self.explicit {
            vertices.as_slice().check_finite("points")?;
            return Ok(Triangle { vertices });
        }
        let bounds = self.region.resolve()?;
        let vertices = [
            sample::coord(rng, &bounds),
            sample::coord(rng, &bounds),
            sample::coord(rng, &bounds),
        ];
        Ok(Triangle { vertices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Envelope;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn vertices_two_to_five() {
        let mut rng = StdRng::seed_from_u64(17);
        let gen = LineStringGenerator::new().vertices(2, 5);
        for _ in 0..100 {
            let line = gen.generate(&mut rng).unwrap();
            assert!((2..=5).contains(&line.len()));
        }
    }

    #[test]
    fn fixed_length_below_floor_is_clamped() {
        let mut rng = StdRng::seed_from_u64(18);
        let line = LineStringGenerator::new().length(1).generate(&mut rng).unwrap();
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn explicit_coordinates_are_verbatim() {
        let mut rng = StdRng::seed_from_u64(19);
        let road = vec![
            Coord::xy(-103.83824088381995, 35.26271184639255),
            Coord::xy(-103.97311253960697, 35.31496876106283),
            Coord::xy(-103.9784028338242, 35.31931221471413),
        ];
        let line = LineStringGenerator::new()
            .vertices(5, 6)
            .coordinates(road.clone())
            .generate(&mut rng)
            .unwrap();
        assert_eq!(line.coords(), road.as_slice());
    }

    #[test]
    fn segment_and_triangle_stay_within_envelope() {
        let mut rng = StdRng::seed_from_u64(20);
        let env = Envelope::new_york_city();
        let seg = LineSegmentGenerator::new().within(env).generate(&mut rng).unwrap();
        assert!(env.contains(&seg.start) && env.contains(&seg.end));
        let tri = TriangleGenerator::new().within(env).generate(&mut rng).unwrap();
        assert!(tri.vertices.iter().all(|c| env.contains(c)));
    }

    #[test]
    fn non_finite_explicit_input_is_rejected() {
        let mut rng = StdRng::seed_from_u64(21);
        let err = LineStringGenerator::new()
            .coordinates(vec![Coord::xy(0.0, 0.0), Coord::xy(f64::INFINITY, 1.0)])
            .generate(&mut rng)
            .unwrap_err();
        assert_eq!(err.field(), "coordinates");
        let err = TriangleGenerator::new()
            .points(Coord::xy(0.0, 0.0), Coord::xy(1.0, 0.0), Coord::xyz(0.0, 1.0, f64::NAN))
            .generate(&mut rng)
            .unwrap_err();
        assert!(matches!(err, GenError::NonFinite { field: "points", value } if value.is_nan()));
    }

    #[test]
    fn count_errors_name_the_setter_used() {
        let mut rng = StdRng::seed_from_u64(22);
        let err = LineStringGenerator::new()
            .length_range(6, 3)
            .generate(&mut rng)
            .unwrap_err();
        assert_eq!(err.field(), "length_range");
        let err = LineStringGenerator::new()
            .vertices(6, 3)
            .generate(&mut rng)
            .unwrap_err();
        assert_eq!(err.field(), "vertices");
    }
}
