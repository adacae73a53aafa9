//! Walkability oracle: the boundary to level geometry.
//!
//! How walkability is decided (mesh overlap tests, a bitmap, a level file)
//! is the environment's business.  A tile only asks once, at construction,
//! and keeps the answer for its lifetime.

use rg_core::{GridCoord, Position};

/// The square, flat area a tile covers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileFootprint {
    pub coord:  GridCoord,
    pub center: Position,
    /// Edge length of the square.
    pub size:   f32,
}

impl TileFootprint {
    /// Axis-aligned bounds on the `x`/`z` plane as `(min, max)` corners.
    pub fn bounds(&self) -> ([f32; 2], [f32; 2]) {
        let h = self.size * 0.5;
        (
            [self.center.x - h, self.center.z - h],
            [self.center.x + h, self.center.z + h],
        )
    }
}

/// Decides whether a tile footprint can be walked on.
///
/// Any `Fn(&TileFootprint) -> bool` closure is an oracle.
pub trait WalkabilityOracle {
    fn is_walkable(&self, footprint: &TileFootprint) -> bool;
}

impl<F> WalkabilityOracle for F
where
    F: Fn(&TileFootprint) -> bool,
{
    #[inline]
    fn is_walkable(&self, footprint: &TileFootprint) -> bool {
        self(footprint)
    }
}

/// Oracle giving the same answer for every tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Uniform(pub bool);

impl WalkabilityOracle for Uniform {
    #[inline]
    fn is_walkable(&self, _footprint: &TileFootprint) -> bool {
        self.0
    }
}
