//! Bounding boxes. Every output is normalized so `a` is the minimum corner,
//! regardless of how the caller or the sampler ordered the corners.

use nalgebra::Vector3;

use super::{Elevated, Generate, Region, Spatial};
use crate::bounds::{Envelope, Envelope3, Interval};
use crate::error::GenError;
use crate::geom::Coord;
use crate::sample::{self, RandomSource};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvelopeGenerator {
    region: Region,
    explicit: Option<Envelope>,
}

impl EnvelopeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Argument order `(x1, x2, y1, y2)`.
    pub fn bounds(mut self, x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        self.explicit = Some(Envelope::from_bounds(x1, x2, y1, y2));
        self
    }

    pub fn corners(mut self, a: (f64, f64), b: (f64, f64)) -> Self {
        self.explicit = Some(Envelope::from_corners(a, b));
        self
    }

    pub fn envelope(mut self, envelope: Envelope) -> Self {
        self.explicit = Some(envelope);
        self
    }
}

impl Spatial for EnvelopeGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Generate for EnvelopeGenerator {
    type Output = Envelope;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Envelope, GenError> {
        if let Some(env) = &self.explicit {
            env.validate("envelope")?;
            return Ok(env.normalized());
        }
        let bounds = self.region.resolve()?;
        let a = sample::coord(rng, &bounds).to_vector2();
        let b = sample::coord(rng, &bounds).to_vector2();
        Ok(Envelope { a, b }.normalized())
    }
}

/// 3D box; Z is always generated, from `z_range` or the default extent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope3Generator {
    region: Region,
}

impl Envelope3Generator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Spatial for Envelope3Generator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        f(&mut self.region);
    }
}

impl Elevated for Envelope3Generator {}

impl Generate for Envelope3Generator {
    type Output = Envelope3;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Envelope3, GenError> {
        let mut bounds = self.region.resolve()?;
        bounds.z.get_or_insert(Interval::ALTITUDE);
        let a = sample::coord(rng, &bounds);
        let b = sample::coord(rng, &bounds);
        Ok(Envelope3::from_corners(lift(a), lift(b)).normalized())
    }
}

fn lift(c: Coord) -> Vector3<f64> {
    Vector3::new(c.x, c.y, c.z.unwrap_or_default())
}
