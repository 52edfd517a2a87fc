//! Session-wide overrides applied to every generator with the matching
//! capability.
//!
//! Policy
//! - Every field is optional; `None` leaves the generator's own default.
//! - Values are stored, not validated; bad values surface from `generate`
//!   exactly as if the fluent setter had been called by hand.
//! - `vertices` applies to path/ring builders, `members` to multi-geometry
//!   and collection builders.
//! - `m_range` applies only to the measured coordinate keys; every other key
//!   stays unmeasured.

use serde::{Deserialize, Serialize};

use crate::bounds::{Envelope, Interval};
use crate::builders::{Counted, Elevated, Measured, Radial, Region, Spatial};
use crate::count::{CountRange, CountSetting};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConfig {
    pub x_range: Option<Interval>,
    pub y_range: Option<Interval>,
    pub z_range: Option<Interval>,
    pub m_range: Option<Interval>,
    pub within: Option<Envelope>,
    pub vertices: Option<CountRange>,
    pub members: Option<CountRange>,
    pub radius_range: Option<Interval>,
    pub resolution: Option<i32>,
}

impl FixtureConfig {
    /// Field-wise merge; values set in `overrides` win.
    pub fn merge(self, overrides: FixtureConfig) -> FixtureConfig {
        FixtureConfig {
            x_range: overrides.x_range.or(self.x_range),
            y_range: overrides.y_range.or(self.y_range),
            z_range: overrides.z_range.or(self.z_range),
            m_range: overrides.m_range.or(self.m_range),
            within: overrides.within.or(self.within),
            vertices: overrides.vertices.or(self.vertices),
            members: overrides.members.or(self.members),
            radius_range: overrides.radius_range.or(self.radius_range),
            resolution: overrides.resolution.or(self.resolution),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FixtureConfig::default()
    }

    pub fn spatial<G: Spatial>(&self, mut gen: G) -> G {
        let (x, y, within) = (self.x_range, self.y_range, self.within);
        gen.update_region(&mut |r: &mut Region| {
            if x.is_some() {
                r.x = x;
            }
            if y.is_some() {
                r.y = y;
            }
            if within.is_some() {
                r.within = within;
            }
        });
        gen
    }

    pub fn elevated<G: Elevated>(&self, gen: G) -> G {
        let mut gen = self.spatial(gen);
        if let Some(z) = self.z_range {
            gen.update_region(&mut |r: &mut Region| r.z = Some(z));
        }
        gen
    }

    /// M axis only; X/Y come from `spatial` or `elevated`.
    pub fn measured<G: Measured>(&self, mut gen: G) -> G {
        if let Some(m) = self.m_range {
            gen.update_region(&mut |r: &mut Region| r.m = Some(m));
        }
        gen
    }

    pub fn vertices<G: Counted>(&self, mut gen: G) -> G {
        if let Some(count) = self.vertices {
            *gen.count_mut() = CountSetting::new("vertices", count);
        }
        gen
    }

    pub fn members<G: Counted>(&self, mut gen: G) -> G {
        if let Some(count) = self.members {
            *gen.count_mut() = CountSetting::new("members", count);
        }
        gen
    }

    pub fn radius<G: Radial>(&self, mut gen: G) -> G {
        if let Some(iv) = self.radius_range {
            *gen.radius_mut() = iv;
        }
        gen
    }
}
