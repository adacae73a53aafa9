//! World-space positions and integer grid coordinates.
//!
//! The grid lies on the horizontal `x`/`z` plane; `y` is height and is carried
//! through unchanged so tile centers sit on whatever surface the environment
//! placed them on.

use std::fmt;

// ── Position ──────────────────────────────────────────────────────────────────

/// A point in 3-D world space, single precision.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line (Euclidean) distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Translate by `(dx, dy, dz)`.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32, dz: f32) -> Position {
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── GridCoord ─────────────────────────────────────────────────────────────────

/// Integer cell coordinates on the `x`/`z` plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub x: i32,
    pub z: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Manhattan (L1) distance in cells.
    #[inline]
    pub fn manhattan(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// `true` if `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self.manhattan(other) == 1
    }

    /// The four orthogonal neighbours in W, E, S, N order.  May lie outside
    /// any particular grid; bounds are the grid's concern.
    pub fn orthogonal(self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x - 1, self.z),
            GridCoord::new(self.x + 1, self.z),
            GridCoord::new(self.x, self.z - 1),
            GridCoord::new(self.x, self.z + 1),
        ]
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
