//! Constrained random geometry fixtures.
//!
//! Layout
//! - `bounds`, `count`, `sample`: intervals, count distributions, and the
//!   uniform draws every builder is made of.
//! - `geom`: output value types with their structural invariants.
//! - `builders`: one fluent generator per shape.
//! - `registry`: type-key lookup for hosts that construct test data by type.
//! - `config`: session-wide overrides applied when a registry is built.
//!
//! Every generator is deterministic given its `RandomSource`; seed a
//! `StdRng` (or derive one from a `ReplayToken`) to reproduce a fixture.

pub mod bounds;
pub mod builders;
pub mod config;
pub mod count;
pub mod error;
pub mod geom;
pub mod registry;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::GenError;

/// Builders, capability traits and value types for quick imports in tests.
pub mod prelude {
    pub use crate::bounds::{
        normalize_corners, BoundsRecord, Envelope, Envelope3, Interval, OctagonalEnvelope,
    };
    pub use crate::builders::{
        CellIndexGenerator, CellIndexer, CircleGenerator, CollectionGenerator, CoordGenerator,
        Counted, Elevated, Envelope3Generator, EnvelopeGenerator, Generate, LineSegmentGenerator,
        LineStringGenerator, LinearRingGenerator, Measured, MultiLineStringGenerator,
        MultiPointGenerator, MultiPolygonGenerator, OctagonalEnvelopeGenerator, PointGenerator,
        PolygonGenerator, Radial, ShapeKind, Spatial, TriangleGenerator,
    };
    pub use crate::config::FixtureConfig;
    pub use crate::count::{CountRange, CountSetting};
    pub use crate::error::GenError;
    pub use crate::geom::{
        Circle, Coord, Geometry, GeometryCollection, LineSegment, LineString, LinearRing,
        MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Positions, Triangle,
    };
    pub use crate::registry::{Fixture, FixtureGenerator, Registry, RegistryBuilder, TypeKey};
    pub use crate::sample::{RandomSource, ReplayToken};
}
