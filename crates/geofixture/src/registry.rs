//! Type-key registry consulted by a host before its own default construction.
//!
//! Lifecycle
//! - Built once through `RegistryBuilder`, immutable afterwards. Lookups take
//!   `&self` and the registry is `Send + Sync`, so one instance can serve
//!   every worker of a session.
//! - Lookup is by exact key. A miss returns `None` so the host can fall back
//!   to whatever it would have done without the registry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::bounds::{Envelope, Envelope3, Interval, OctagonalEnvelope};
use crate::builders::{
    CellIndexGenerator, CellIndexer, CircleGenerator, CollectionGenerator, CoordGenerator,
    Elevated, Envelope3Generator, EnvelopeGenerator, Generate, LineSegmentGenerator,
    LineStringGenerator, LinearRingGenerator, Measured, MultiLineStringGenerator,
    MultiPointGenerator, MultiPolygonGenerator, OctagonalEnvelopeGenerator, PointGenerator,
    PolygonGenerator, TriangleGenerator,
};
use crate::config::FixtureConfig;
use crate::error::GenError;
use crate::geom::{
    Circle, Coord, GeometryCollection, LineSegment, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Triangle,
};
use crate::sample::RandomSource;

/// Concrete target types a generator can be registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKey {
    Coordinate,
    CoordinateXym,
    CoordinateXyzm,
    Point,
    LineString,
    LineSegment,
    Triangle,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Envelope,
    Envelope3,
    OctagonalEnvelope,
    Circle,
    CellIndex,
}

impl TypeKey {
    pub const ALL: [TypeKey; 18] = [
        TypeKey::Coordinate,
        TypeKey::CoordinateXym,
        TypeKey::CoordinateXyzm,
        TypeKey::Point,
        TypeKey::LineString,
        TypeKey::LineSegment,
        TypeKey::Triangle,
        TypeKey::LinearRing,
        TypeKey::Polygon,
        TypeKey::MultiPoint,
        TypeKey::MultiLineString,
        TypeKey::MultiPolygon,
        TypeKey::GeometryCollection,
        TypeKey::Envelope,
        TypeKey::Envelope3,
        TypeKey::OctagonalEnvelope,
        TypeKey::Circle,
        TypeKey::CellIndex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKey::Coordinate => "coordinate",
            TypeKey::CoordinateXym => "coordinate_xym",
            TypeKey::CoordinateXyzm => "coordinate_xyzm",
            TypeKey::Point => "point",
            TypeKey::LineString => "line_string",
            TypeKey::LineSegment => "line_segment",
            TypeKey::Triangle => "triangle",
            TypeKey::LinearRing => "linear_ring",
            TypeKey::Polygon => "polygon",
            TypeKey::MultiPoint => "multi_point",
            TypeKey::MultiLineString => "multi_line_string",
            TypeKey::MultiPolygon => "multi_polygon",
            TypeKey::GeometryCollection => "geometry_collection",
            TypeKey::Envelope => "envelope",
            TypeKey::Envelope3 => "envelope3",
            TypeKey::OctagonalEnvelope => "octagonal_envelope",
            TypeKey::Circle => "circle",
            TypeKey::CellIndex => "cell_index",
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown type key `{0}`")]
pub struct UnknownTypeKey(pub String);

impl FromStr for TypeKey {
    type Err = UnknownTypeKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownTypeKey(s.to_string()))
    }
}

/// Output of any registered generator.
///
/// Measured coordinates share the `coordinate` tag; their key follows from
/// which optional ordinates are present.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Fixture {
    Coordinate(Coord),
    Point(Point),
    LineString(LineString),
    LineSegment(LineSegment),
    Triangle(Triangle),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
    Envelope(Envelope),
    Envelope3(Envelope3),
    OctagonalEnvelope(OctagonalEnvelope),
    Circle(Circle),
    CellIndex(u64),
}

macro_rules! fixture_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Fixture {
            fn from(v: $ty) -> Self {
                Fixture::$variant(v)
            }
        })*
    };
}

fixture_from! {
    Coord => Coordinate,
    Point => Point,
    LineString => LineString,
    LineSegment => LineSegment,
    Triangle => Triangle,
    LinearRing => LinearRing,
    Polygon => Polygon,
    MultiPoint => MultiPoint,
    MultiLineString => MultiLineString,
    MultiPolygon => MultiPolygon,
    GeometryCollection => GeometryCollection,
    Envelope => Envelope,
    Envelope3 => Envelope3,
    OctagonalEnvelope => OctagonalEnvelope,
    Circle => Circle,
    u64 => CellIndex,
}

impl Fixture {
    pub fn key(&self) -> TypeKey {
        match self {
            Fixture::Coordinate(c) => match (c.z, c.m) {
                (_, None) => TypeKey::Coordinate,
                (None, Some(_)) => TypeKey::CoordinateXym,
                (Some(_), Some(_)) => TypeKey::CoordinateXyzm,
            },
            Fixture::Point(_) => TypeKey::Point,
            Fixture::LineString(_) => TypeKey::LineString,
            Fixture::LineSegment(_) => TypeKey::LineSegment,
            Fixture::Triangle(_) => TypeKey::Triangle,
            Fixture::LinearRing(_) => TypeKey::LinearRing,
            Fixture::Polygon(_) => TypeKey::Polygon,
            Fixture::MultiPoint(_) => TypeKey::MultiPoint,
            Fixture::MultiLineString(_) => TypeKey::MultiLineString,
            Fixture::MultiPolygon(_) => TypeKey::MultiPolygon,
            Fixture::GeometryCollection(_) => TypeKey::GeometryCollection,
            Fixture::Envelope(_) => TypeKey::Envelope,
            Fixture::Envelope3(_) => TypeKey::Envelope3,
            Fixture::OctagonalEnvelope(_) => TypeKey::OctagonalEnvelope,
            Fixture::Circle(_) => TypeKey::Circle,
            Fixture::CellIndex(_) => TypeKey::CellIndex,
        }
    }
}

/// Object-safe view of a configured builder.
pub trait FixtureGenerator: Send + Sync {
    fn generate_fixture(&self, rng: &mut dyn RandomSource) -> Result<Fixture, GenError>;
}

impl<G> FixtureGenerator for G
where
    G: Generate + Send + Sync,
    G::Output: Into<Fixture>,
{
    fn generate_fixture(&self, rng: &mut dyn RandomSource) -> Result<Fixture, GenError> {
        self.generate(rng).map(Into::into)
    }
}

pub struct Registry {
    entries: BTreeMap<TypeKey, Box<dyn FixtureGenerator>>,
}

impl Registry {
    /// Every built-in generator with its default configuration. The cell
    /// index generator needs an indexer and is only added via the builder.
    pub fn with_defaults() -> Self {
        RegistryBuilder::new().builtins().build()
    }

    pub fn from_config(config: &FixtureConfig) -> Self {
        RegistryBuilder::new().config(config.clone()).builtins().build()
    }

    pub fn lookup(&self, key: TypeKey) -> Option<&dyn FixtureGenerator> {
        let hit = self.entries.get(&key).map(|g| g.as_ref());
        if hit.is_none() {
            tracing::trace!(key = %key, "no generator registered");
        }
        hit
    }

    /// `None` on a miss; otherwise the generator's result.
    pub fn generate(
        &self,
        key: TypeKey,
        rng: &mut dyn RandomSource,
    ) -> Option<Result<Fixture, GenError>> {
        self.lookup(key).map(|g| g.generate_fixture(rng))
    }

    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn contains(&self, key: TypeKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Collects registrations; `build` freezes them into a [`Registry`].
///
/// Explicit `register` calls override built-ins for the same key.
#[derive(Default)]
pub struct RegistryBuilder {
    config: FixtureConfig,
    builtins: bool,
    indexer: Option<Arc<dyn CellIndexer>>,
    custom: Vec<(TypeKey, Box<dyn FixtureGenerator>)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides applied to built-in generators.
    pub fn config(mut self, config: FixtureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn builtins(mut self) -> Self {
        self.builtins = true;
        self
    }

    pub fn cell_indexer(mut self, indexer: Arc<dyn CellIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    pub fn register<G: FixtureGenerator + 'static>(mut self, key: TypeKey, gen: G) -> Self {
        self.custom.push((key, Box::new(gen)));
        self
    }

    pub fn build(self) -> Registry {
        let mut entries: BTreeMap<TypeKey, Box<dyn FixtureGenerator>> = BTreeMap::new();
        let cfg = &self.config;
        if self.builtins {
            for (key, gen) in builtin_generators(cfg) {
                entries.insert(key, gen);
            }
        }
        if let Some(indexer) = self.indexer {
            let mut gen = cfg.spatial(CellIndexGenerator::new(indexer));
            if let Some(res) = cfg.resolution {
                gen = gen.resolution(res);
            }
            entries.insert(TypeKey::CellIndex, Box::new(gen));
        }
        let custom = self.custom.len();
        for (key, gen) in self.custom {
            entries.insert(key, gen);
        }
        tracing::debug!(
            generators = entries.len(),
            custom,
            configured = !cfg.is_empty(),
            "fixture registry built"
        );
        Registry { entries }
    }
}

fn entry<G: FixtureGenerator + 'static>(
    key: TypeKey,
    gen: G,
) -> (TypeKey, Box<dyn FixtureGenerator>) {
    (key, Box::new(gen))
}

fn builtin_generators(cfg: &FixtureConfig) -> Vec<(TypeKey, Box<dyn FixtureGenerator>)> {
    let line = || cfg.vertices(LineStringGenerator::new());
    let polygon = || cfg.vertices(PolygonGenerator::new());
    let collection = CollectionGenerator::new()
        .line_template(line())
        .polygon_template(polygon());
    let xym = CoordGenerator::new().m_range(Interval::MEASURE.low, Interval::MEASURE.high);
    let xyzm = xym
        .clone()
        .z_range(Interval::ALTITUDE.low, Interval::ALTITUDE.high);
    vec![
        entry(TypeKey::Coordinate, cfg.elevated(CoordGenerator::new())),
        entry(TypeKey::CoordinateXym, cfg.measured(cfg.spatial(xym))),
        entry(TypeKey::CoordinateXyzm, cfg.measured(cfg.elevated(xyzm))),
        entry(TypeKey::Point, cfg.elevated(PointGenerator::new())),
        entry(TypeKey::LineString, cfg.elevated(line())),
        entry(TypeKey::LineSegment, cfg.spatial(LineSegmentGenerator::new())),
        entry(TypeKey::Triangle, cfg.spatial(TriangleGenerator::new())),
        entry(
            TypeKey::LinearRing,
            cfg.elevated(cfg.vertices(LinearRingGenerator::new())),
        ),
        entry(TypeKey::Polygon, cfg.elevated(polygon())),
        entry(
            TypeKey::MultiPoint,
            cfg.elevated(cfg.members(MultiPointGenerator::new())),
        ),
        entry(
            TypeKey::MultiLineString,
            cfg.elevated(cfg.members(MultiLineStringGenerator::new().member(line()))),
        ),
        entry(
            TypeKey::MultiPolygon,
            cfg.elevated(cfg.members(MultiPolygonGenerator::new().member(polygon()))),
        ),
        entry(
            TypeKey::GeometryCollection,
            cfg.elevated(cfg.members(collection)),
        ),
        entry(TypeKey::Envelope, cfg.spatial(EnvelopeGenerator::new())),
        entry(TypeKey::Envelope3, cfg.elevated(Envelope3Generator::new())),
        entry(
            TypeKey::OctagonalEnvelope,
            cfg.spatial(OctagonalEnvelopeGenerator::new()),
        ),
        entry(TypeKey::Circle, cfg.radius(cfg.elevated(CircleGenerator::new()))),
    ]
}
