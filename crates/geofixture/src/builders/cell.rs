//! Hierarchical cell identifiers from a pluggable indexer.
//!
//! The indexing scheme itself is a black box: the builder only draws a
//! lat/lng pair and hands it to a `CellIndexer` at the configured resolution.

use std::fmt;
use std::sync::Arc;

use super::{Generate, PointGenerator, Region, Spatial};
use crate::error::GenError;
use crate::sample::RandomSource;

pub const MIN_RESOLUTION: u8 = 0;
pub const MAX_RESOLUTION: u8 = 15;
pub const DEFAULT_RESOLUTION: u8 = 7;

/// Maps a position to a cell identifier at `resolution` (`0..=15`).
pub trait CellIndexer: Send + Sync {
    fn cell(
        &self,
        lat: f64,
        lng: f64,
        resolution: u8,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Clone)]
pub struct CellIndexGenerator {
    indexer: Arc<dyn CellIndexer>,
    position: PointGenerator,
    resolution: u8,
}

impl CellIndexGenerator {
    pub fn new(indexer: Arc<dyn CellIndexer>) -> Self {
        Self {
            indexer,
            position: PointGenerator::default(),
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Clamped into `0..=15`.
    pub fn resolution(mut self, resolution: i32) -> Self {
        self.resolution =
            resolution.clamp(MIN_RESOLUTION as i32, MAX_RESOLUTION as i32) as u8;
        self
    }

    pub fn lat_range(self, min: f64, max: f64) -> Self {
        self.y_range(min, max)
    }

    pub fn lng_range(self, min: f64, max: f64) -> Self {
        self.x_range(min, max)
    }

    pub fn current_resolution(&self) -> u8 {
        self.resolution
    }
}

impl fmt::Debug for CellIndexGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellIndexGenerator")
            .field("position", &self.position)
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

impl Spatial for CellIndexGenerator {
    fn update_region(&mut self, f: &mut dyn FnMut(&mut Region)) {
        self.position.update_region(f);
    }
}

impl Generate for CellIndexGenerator {
    type Output = u64;

    fn generate(&self, rng: &mut dyn RandomSource) -> Result<u64, GenError> {
        let c = self.position.generate(rng)?.coord();
        self.indexer
            .cell(c.y, c.x, self.resolution)
            .map_err(|e| GenError::external("cell indexer", e.to_string()))
    }
}
