//! Spatial configuration shared by every coordinate-drawing builder.

use serde::{Deserialize, Serialize};

use crate::bounds::{AxisBounds, Envelope, Interval};
use crate::error::GenError;

/// Unvalidated spatial settings; `resolve` freezes them into `AxisBounds`.
///
/// Precedence
/// - `within` overrides `x`/`y` entirely (envelope corners are normalized).
/// - `x`/`y` default to longitude/latitude ranges.
/// - `z` set means Z generation is on; `m` likewise for measures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub x: Option<Interval>,
    pub y: Option<Interval>,
    pub z: Option<Interval>,
    pub m: Option<Interval>,
    pub within: Option<Envelope>,
}

impl Region {
    pub fn resolve(&self) -> Result<AxisBounds, GenError> {
        let (x, y) = match &self.within {
            Some(envelope) => {
                let r = envelope.validate("within")?;
                (r.lon(), r.lat())
            }
            None => (
                self.x.unwrap_or(Interval::LON).validate("x_range")?,
                self.y.unwrap_or(Interval::LAT).validate("y_range")?,
            ),
        };
        let z = self.z.map(|iv| iv.validate("z_range")).transpose()?;
        let m = self.m.map(|iv| iv.validate("m_range")).transpose()?;
        Ok(AxisBounds { x, y, z, m })
    }
}
