//! Circles: a center position plus a strictly positive radius.

use super::{Elevated, Generate, PointGenerator, Radial, Region, Spatial};
use crate::bounds::Interval;
use crate::error::GenError;
use crate::geom::Circle;
use crate::sample::{scalar, RandomSource};

/// Default radius interval.
pub const DEFAULT_RADIUS: Interval = Interval::new(0.1, 10.0);

/// Center point followed by one radius draw.
///
/// A radius interval whose low bound is `<= 0` is rejected rather than
/// clamped, so a returned circle always has a strictly positive radius.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleGenerator {
    center: PointGenerator,
    radius: Interval,
}

impl Default for CircleGenerator {
    fn default() -> Self {
        Self {
            center: PointGenerator::default(),
            radius: DEFAULT_RADIUS,
        }
    }
}

impl CircleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the center; the radius is still drawn.
    pub fn center(mut self, x: f64, y: f64) -> Self {
        self.center = self.center.coordinate(x, y);
        self
    }

    fn checked_radius(&self) -> Result<Interval, GenError> {
        let iv = self.radius.validate("radius_range")?;
        if iv.low <= 0.0 {
            return Err(GenError::NonPositiveRadius {
                field: "radius_range",
                value: iv.low,
            });
        }
        Ok(iv)
    }
}

impl Spatial for CircleGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        self.center.update_region(f);
    }
}

impl Elevated for CircleGenerator {}

impl Radial for CircleGenerator {
    fn radius_mut(&mut self) -> &mut Interval {
        &mut self.radius
    }
}

impl Generate for CircleGenerator {
    type Output = Circle;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Circle, GenError> {
        let radius = self.checked_radius()?;
        let center = self.center.generate(rng)?.coord();
        Circle::new(center, scalar(rng, radius))
    }
}
