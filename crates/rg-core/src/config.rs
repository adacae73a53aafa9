//! Grid and run configuration.

use crate::{Position, RgError, RgResult, Tick};

/// Top-level configuration for building a grid and running the tick driver.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the grid builder and simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of tiles along `x`.
    pub width: u32,

    /// Number of tiles along `z`.
    pub depth: u32,

    /// Edge length of one square tile in world units.
    pub tile_size: f32,

    /// World position of the corner of tile `(0, 0)`.
    pub origin: Position,

    /// Default agent speed in world units per tick.
    pub agent_speed: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed for applications that randomize agent start times.
    pub seed: u64,

    /// Emit a tile snapshot every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width:                   8,
            depth:                   8,
            tile_size:               1.0,
            origin:                  Position::ORIGIN,
            agent_speed:             1.0,
            total_ticks:             100,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}

impl GridConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Number of tiles in the grid.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    /// Reject configurations that cannot produce a usable grid.
    pub fn validate(&self) -> RgResult<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(RgError::Config(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.width, self.depth
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.depth).is_err() {
            return Err(RgError::Config("grid dimensions exceed i32 range".into()));
        }
        if !(self.tile_size > 0.0) {
            return Err(RgError::Config(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if !(self.agent_speed > 0.0) {
            return Err(RgError::Config(format!(
                "agent_speed must be positive, got {}",
                self.agent_speed
            )));
        }
        Ok(())
    }
}
