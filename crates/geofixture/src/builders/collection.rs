//! Heterogeneous geometry collections.

use serde::{Deserialize, Serialize};

use super::{
    Counted, Elevated, Generate, LineStringGenerator, MultiLineStringGenerator,
    MultiPointGenerator, MultiPolygonGenerator, PointGenerator, PolygonGenerator, Region, Spatial,
};
use crate::count::{CountRange, CountSetting};
use crate::error::GenError;
use crate::geom::{Geometry, GeometryCollection, Positions};
use crate::sample::RandomSource;

/// Shape families a collection may draw members from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

/// Collection of `k` members (floor 2, default 2..=6); each member's kind is
/// drawn uniformly from the enabled set, then generated by that kind's
/// template. Default kinds: point, line string, polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionGenerator {
    kinds: Vec<ShapeKind>,
    count: CountSetting,
    explicit: Option<Vec<Geometry>>,
    point: PointGenerator,
    line: LineStringGenerator,
    polygon: PolygonGenerator,
    multi_point: MultiPointGenerator,
    multi_line: MultiLineStringGenerator,
    multi_polygon: MultiPolygonGenerator,
}

impl Default for CollectionGenerator {
    fn default() -> Self {
        Self {
            kinds: vec![ShapeKind::Point, ShapeKind::LineString, ShapeKind::Polygon],
            count: CountSetting::new("length", CountRange::between(2, 6)),
            explicit: None,
            point: PointGenerator::default(),
            line: LineStringGenerator::default(),
            polygon: PolygonGenerator::default(),
            multi_point: MultiPointGenerator::default(),
            multi_line: MultiLineStringGenerator::default(),
            multi_polygon: MultiPolygonGenerator::default(),
        }
    }
}

impl CollectionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled kinds; duplicates are dropped, order is kept.
    pub fn kinds(mut self, kinds: impl IntoIterator<Item = ShapeKind>) -> Self {
        self.kinds.clear();
        for kind in kinds {
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
        self
    }

    pub fn members(mut self, members: Vec<Geometry>) -> Self {
        self.explicit = Some(members);
        self
    }

    pub fn polygon_template(mut self, template: PolygonGenerator) -> Self {
        self.polygon = template;
        self
    }

    pub fn line_template(mut self, template: LineStringGenerator) -> Self {
        self.line = template;
        self
    }

    fn generate_kind(
        &self,
        kind: ShapeKind,
        rng: &mut dyn RandomSource,
    ) -> Result<Geometry, GenError> {
        Ok(match kind {
            ShapeKind::Point => Geometry::Point(self.point.generate(rng)?),
            ShapeKind::LineString => Geometry::LineString(self.line.generate(rng)?),
            ShapeKind::Polygon => Geometry::Polygon(self.polygon.generate(rng)?),
            ShapeKind::MultiPoint => Geometry::MultiPoint(self.multi_point.generate(rng)?),
            ShapeKind::MultiLineString => {
                Geometry::MultiLineString(self.multi_line.generate(rng)?)
            }
            ShapeKind::MultiPolygon => Geometry::MultiPolygon(self.multi_polygon.generate(rng)?),
        })
    }
}

impl Spatial for CollectionGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        self.point.update_region(f);
        self.line.update_region(f);
        self.polygon.update_region(f);
        self.multi_point.update_region(f);
        self.multi_line.update_region(f);
        self.multi_polygon.update_region(f);
    }
}

impl Elevated for CollectionGenerator {}

impl Counted for CollectionGenerator {
    fn count_mut(&mut self) -> &mut CountSetting {
        &mut self.count
    }
}

impl Generate for CollectionGenerator {
    type Output = GeometryCollection;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<GeometryCollection, GenError> {
        if let Some(members) = &self.explicit {
            members.check_finite("members")?;
            return GeometryCollection::new(members.clone());
        }
        if self.kinds.is_empty() {
            return Err(GenError::malformed(
                "geometry collection",
                "no shape kinds enabled",
            ));
        }
        let k = self.count.sample(rng, GeometryCollection::MIN_MEMBERS)?;
        let mut members = Vec::with_capacity(k);
        for _ in 0..k {
            let kind = self.kinds[rng.int_range(0, self.kinds.len() - 1)];
            members.push(self.generate_kind(kind, rng)?);
        }
        GeometryCollection::new(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Envelope;
    use crate::geom::{Coord, Point};
    use rand::{rngs::StdRng, SeedableRng};

    fn kind_of(g: &Geometry) -> ShapeKind {
        match g {
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::LineString(_) => ShapeKind::LineString,
            Geometry::Polygon(_) => ShapeKind::Polygon,
            Geometry::MultiPoint(_) => ShapeKind::MultiPoint,
            Geometry::MultiLineString(_) => ShapeKind::MultiLineString,
            Geometry::MultiPolygon(_) => ShapeKind::MultiPolygon,
        }
    }

    #[test]
    fn members_come_from_enabled_kinds() {
        let mut rng = StdRng::seed_from_u64(50);
        let gen = CollectionGenerator::new()
            .kinds([ShapeKind::MultiPoint, ShapeKind::Polygon, ShapeKind::Polygon])
            .length_range(3, 8);
        for _ in 0..50 {
            let c = gen.generate(&mut rng).unwrap();
            assert!((3..=8).contains(&c.len()));
            assert!(c
                .members()
                .iter()
                .all(|g| matches!(kind_of(g), ShapeKind::MultiPoint | ShapeKind::Polygon)));
        }
    }

    #[test]
    fn every_default_kind_shows_up() {
        let mut rng = StdRng::seed_from_u64(51);
        let gen = CollectionGenerator::new().length(6);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..30 {
            for g in gen.generate(&mut rng).unwrap().members() {
                seen.insert(kind_of(g));
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn no_kinds_is_malformed() {
        let mut rng = StdRng::seed_from_u64(52);
        let err = CollectionGenerator::new()
            .kinds(Vec::new())
            .generate(&mut rng)
            .unwrap_err();
        assert!(matches!(err, GenError::MalformedInput { .. }));
    }

    #[test]
    fn explicit_members_and_envelope() {
        let mut rng = StdRng::seed_from_u64(53);
        let members = vec![
            Geometry::Point(Point(Coord::xy(1.0, 1.0))),
            Geometry::Point(Point(Coord::xy(2.0, 2.0))),
        ];
        let c = CollectionGenerator::new()
            .members(members.clone())
            .generate(&mut rng)
            .unwrap();
        assert_eq!(c.members(), members.as_slice());

        let env = Envelope::from_corners((5.0, 5.0), (6.0, 6.0));
        let c = CollectionGenerator::new()
            .kinds([ShapeKind::Point])
            .within(env)
            .generate(&mut rng)
            .unwrap();
        for g in c.members() {
            let Geometry::Point(p) = g else {
                panic!("expected point")
            };
            assert!(env.contains(&p.coord()));
        }
    }

    #[test]
    fn non_finite_member_is_rejected() {
        let mut rng = StdRng::seed_from_u64(54);
        let err = CollectionGenerator::new()
            .members(vec![
                Geometry::Point(Point(Coord::xy(1.0, 1.0))),
                Geometry::Point(Point(Coord::xym(2.0, 2.0, f64::NAN))),
            ])
            .generate(&mut rng)
            .unwrap_err();
        assert!(matches!(err, GenError::NonFinite { field: "members", .. }));
    }

    #[test]
    fn member_floor_holds_for_tiny_counts() {
        let mut rng = StdRng::seed_from_u64(55);
        let c = CollectionGenerator::new().length(0).generate(&mut rng).unwrap();
        assert_eq!(c.len(), GeometryCollection::MIN_MEMBERS);
    }
}
