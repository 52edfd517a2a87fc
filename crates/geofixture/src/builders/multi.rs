//! Homogeneous multi-geometries built from a member template.

use super::{
    Counted, Elevated, Generate, LineStringGenerator, Measured, PointGenerator, PolygonGenerator,
    Region, Spatial,
};
use crate::count::{CountRange, CountSetting};
use crate::error::GenError;
use crate::geom::{LineString, Multi, Point, Polygon, Positions};
use crate::sample::RandomSource;

/// Draws `k` members (floor 2, default 2..=5) from the template `G`.
///
/// Spatial settings forward to the template; `length`/`length_range` set the
/// member count. An explicit member list is returned verbatim without any
/// count draw.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiGenerator<G, T> {
    member: G,
    count: CountSetting,
    explicit: Option<Vec<T>>,
}

pub type MultiPointGenerator = MultiGenerator<PointGenerator, Point>;
pub type MultiLineStringGenerator = MultiGenerator<LineStringGenerator, LineString>;
pub type MultiPolygonGenerator = MultiGenerator<PolygonGenerator, Polygon>;

impl<G: Default, T> Default for MultiGenerator<G, T> {
    fn default() -> Self {
        Self {
            member: G::default(),
            count: CountSetting::new("length", CountRange::between(2, 5)),
            explicit: None,
        }
    }
}

impl<G: Default, T> MultiGenerator<G, T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G, T> MultiGenerator<G, T> {
    /// Replace the member template, e.g. to set per-member vertex counts.
    pub fn member(mut self, template: G) -> Self {
        self.member = template;
        self
    }

    pub fn members(mut self, members: Vec<T>) -> Self {
        self.explicit = Some(members);
        self
    }
}

impl<G: Spatial, T> Spatial for MultiGenerator<G, T> {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        self.member.update_region(f);
    }
}

impl<G: Elevated, T> Elevated for MultiGenerator<G, T> {}

impl<G: Measured, T> Measured for MultiGenerator<G, T> {}

impl<G, T> Counted for MultiGenerator<G, T> {
    fn count_mut(&mut self) -> &mut CountSetting {
        &mut self.count
    }
}

impl<G> Generate for MultiGenerator<G, G::Output>
where
    G: Generate,
    G::Output: Clone + Positions,
{
    type Output = Multi<G::Output>;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<Self::Output, GenError> {
        if let Some(members) = &self.explicit {
            members.check_finite("members")?;
            return Multi::new(members.clone());
        }
        let k = self.count.sample(rng, Multi::<G::Output>::MIN_MEMBERS)?;
        let mut members = Vec::with_capacity(k);
        for _ in 0..k {
            members.push(self.member.generate(rng)?);
        }
        Multi::new(members)
    }
}
