//! Builder family: one configurable generator per geometry shape.
//!
//! Lifecycle
//! - Construct with defaults, configure through the fluent capability traits
//!   below, then call `generate` any number of times. `generate` takes `&self`
//!   and never mutates the builder, so a configured builder may be shared
//!   across threads as long as each thread brings its own `RandomSource`.
//! - All validation happens in `generate`; setters only store values.
//!
//! Capabilities
//! - `Spatial`: `x_range`, `y_range`, `within` (envelope wins over ranges).
//! - `Elevated`: `z_range` (turns Z generation on).
//! - `Measured`: `m_range` (turns M generation on).
//! - `Counted`: `vertices`, `length`, `length_range`; count errors name the
//!   setter that was used last.
//! - `Radial`: `radius_range`.
//! A builder implements exactly the capabilities its shape supports; compound
//! builders forward them to their member templates.

mod cell;
mod circle;
mod collection;
mod envelope;
mod line;
mod multi;
mod octagon;
mod point;
mod region;
mod ring;

pub use cell::{CellIndexGenerator, CellIndexer};
pub use circle::CircleGenerator;
pub use collection::{CollectionGenerator, ShapeKind};
pub use envelope::{Envelope3Generator, EnvelopeGenerator};
pub use line::{LineSegmentGenerator, LineStringGenerator, TriangleGenerator};
pub use multi::{
    MultiGenerator, MultiLineStringGenerator, MultiPointGenerator, MultiPolygonGenerator,
};
pub use octagon::OctagonalEnvelopeGenerator;
pub use point::{CoordGenerator, PointGenerator};
pub use region::Region;
pub use ring::{LinearRingGenerator, PolygonGenerator};

use crate::bounds::{Envelope, Interval};
use crate::count::{CountRange, CountSetting};
use crate::error::GenError;
use crate::sample::RandomSource;

/// Terminal operation shared by all builders.
pub trait Generate {
    type Output;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Self::Output, GenError>;
}

/// X/Y range and envelope constraints.
pub trait Spatial: Sized {
    /// Apply `f` to every region this builder samples from.
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region));

    fn x_range(mut self, min: f64, max: f64) -> Self {
        self.update_region(&mut |r: &mut Region| r.x = Some(Interval::new(min, max)));
        self
    }

    fn y_range(mut self, min: f64, max: f64) -> Self {
        self.update_region(&mut |r: &mut Region| r.y = Some(Interval::new(min, max)));
        self
    }

    /// Constrain X/Y sampling to `envelope`, overriding `x_range`/`y_range`.
    fn within(mut self, envelope: Envelope) -> Self {
        self.update_region(&mut |r: &mut Region| r.within = Some(envelope));
        self
    }
}

/// Optional third axis.
pub trait Elevated: Spatial {
    fn z_range(mut self, min: f64, max: f64) -> Self {
        self.update_region(&mut |r: &mut Region| r.z = Some(Interval::new(min, max)));
        self
    }
}

/// Optional measure axis.
pub trait Measured: Spatial {
    fn m_range(mut self, min: f64, max: f64) -> Self {
        self.update_region(&mut |r: &mut Region| r.m = Some(Interval::new(min, max)));
        self
    }
}

/// Vertex or member count.
pub trait Counted: Sized {
    fn count_mut(&mut self) -> &mut CountSetting;

    fn vertices(mut self, min: usize, max: usize) -> Self {
        *self.count_mut() = CountSetting::new("vertices", CountRange::between(min, max));
        self
    }

    fn length(mut self, exact: usize) -> Self {
        *self.count_mut() = CountSetting::new("length", CountRange::Fixed(exact));
        self
    }

    fn length_range(mut self, min: usize, max: usize) -> Self {
        *self.count_mut() = CountSetting::new("length_range", CountRange::between(min, max));
        self
    }
}

/// Radius interval for round shapes.
pub trait Radial: Sized {
    fn radius_mut(&mut self) -> &mut Interval;

    fn radius_range(mut self, min: f64, max: f64) -> Self {
        *self.radius_mut() = Interval::new(min, max);
        self
    }
}

#[cfg(test)]
mod tests;
