//! Tile arena and builder.
//!
//! # Data layout
//!
//! Tiles are stored row-major in one `Vec<Tile>`:
//!
//! ```text
//! TileId = z * width + x
//! ```
//!
//! Neighbour lists hold `TileId`s into the same vector, so the grid is the
//! only owner and no tile references another directly.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over tile centers on the `x`/`z` plane maps a
//! world position to the nearest tile.  Used to place agents that arrive
//! with a world position rather than grid coordinates.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use rg_core::{GridConfig, GridCoord, Position, RgError, RgResult, TickOffset, TileId};

use crate::{PathGraph, Tile, TileResult, Uniform, WalkabilityOracle};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a tile center projected to `[x, z]`.
#[derive(Clone)]
struct TileEntry {
    point: [f32; 2],
    id:    TileId,
}

impl RTreeObject for TileEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for TileEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── TileGrid ──────────────────────────────────────────────────────────────────

/// All tiles of one grid, plus a spatial index for position snapping.
///
/// Construct with [`TileGridBuilder`].
pub struct TileGrid {
    width:       u32,
    depth:       u32,
    tile_size:   f32,
    tiles:       Vec<Tile>,
    spatial_idx: RTree<TileEntry>,
}

impl TileGrid {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.z >= 0 && (coord.x as u32) < self.width && (coord.z as u32) < self.depth
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Id of the tile at `coord`, or `None` outside the grid.
    #[inline]
    pub fn id_at(&self, coord: GridCoord) -> Option<TileId> {
        self.contains(coord)
            .then(|| TileId(coord.z as u32 * self.width + coord.x as u32))
    }

    /// Direct access by id.
    ///
    /// # Panics
    /// Panics if `id` is not a tile of this grid.  Use [`get`](Self::get)
    /// for ids of unknown origin.
    #[inline]
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Mutable direct access by id.
    ///
    /// # Panics
    /// Panics if `id` is not a tile of this grid.
    #[inline]
    pub fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    pub fn get(&self, id: TileId) -> RgResult<&Tile> {
        self.tiles.get(id.index()).ok_or(RgError::TileNotFound(id))
    }

    pub fn get_mut(&mut self, id: TileId) -> RgResult<&mut Tile> {
        self.tiles.get_mut(id.index()).ok_or(RgError::TileNotFound(id))
    }

    pub fn tile_at(&self, coord: GridCoord) -> Option<&Tile> {
        self.id_at(coord).map(|id| self.tile(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    // ── Environment flags ─────────────────────────────────────────────────

    pub fn set_entrance(&mut self, coord: GridCoord, entrance: bool) -> RgResult<()> {
        let id = self.id_at(coord).ok_or(RgError::OutOfBounds(coord))?;
        self.tile_mut(id).set_entrance(entrance);
        Ok(())
    }

    pub fn set_exit(&mut self, coord: GridCoord, exit: bool) -> RgResult<()> {
        let id = self.id_at(coord).ok_or(RgError::OutOfBounds(coord))?;
        self.tile_mut(id).set_exit(exit);
        Ok(())
    }

    pub fn entrances(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().filter(|t| t.is_entrance()).map(Tile::id)
    }

    pub fn exits(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().filter(|t| t.is_exit()).map(Tile::id)
    }

    /// A grid is usable when at least one walkable entrance and one walkable
    /// exit exist.
    pub fn is_valid_grid(&self) -> bool {
        let walkable = |id: &TileId| self.tile(*id).is_walkable();
        self.entrances().any(|id| walkable(&id)) && self.exits().any(|id| walkable(&id))
    }

    // ── Claims ────────────────────────────────────────────────────────────

    /// Reserve tile `id` over `[start, start + duration)`.
    pub fn add_claim(&mut self, id: TileId, start: TickOffset, duration: TickOffset) -> TileResult<()> {
        self.get_mut(id)?.add_claim(start, duration)
    }

    /// Run per-tick maintenance on every tile.  Returns the total number of
    /// expired claims.
    pub fn update_all(&mut self) -> usize {
        self.tiles.iter_mut().map(Tile::update).sum()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The tile whose center is nearest to `pos` (height ignored).
    ///
    /// Returns `None` only for an empty grid.
    pub fn snap_to_tile(&self, pos: Position) -> Option<TileId> {
        self.spatial_idx.nearest_neighbor(&[pos.x, pos.z]).map(|e| e.id)
    }

    /// The walkable tile whose center is nearest to `pos`.
    pub fn snap_to_walkable(&self, pos: Position) -> Option<TileId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x, pos.z])
            .map(|e| e.id)
            .find(|&id| self.tile(id).is_walkable())
    }
}

impl PathGraph for TileGrid {
    type Node = Tile;

    fn node(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }
}

// ── TileGridBuilder ───────────────────────────────────────────────────────────

/// Construct a [`TileGrid`] from a [`GridConfig`] and a walkability oracle.
///
/// # Example
///
/// ```
/// use rg_core::{GridConfig, GridCoord};
/// use rg_tile::{TileFootprint, TileGridBuilder};
///
/// let config = GridConfig { width: 4, depth: 3, ..GridConfig::default() };
/// let grid = TileGridBuilder::new(&config)
///     .oracle(|fp: &TileFootprint| fp.coord.x != 2) // wall at x = 2
///     .entrance(GridCoord::new(0, 0))
///     .exit(GridCoord::new(3, 2))
///     .build()
///     .unwrap();
/// assert_eq!(grid.len(), 12);
/// assert!(!grid.tile_at(GridCoord::new(2, 1)).unwrap().is_walkable());
/// ```
pub struct TileGridBuilder<O = Uniform> {
    config:    GridConfig,
    oracle:    O,
    entrances: Vec<GridCoord>,
    exits:     Vec<GridCoord>,
}

impl TileGridBuilder<Uniform> {
    /// Every tile walkable until an oracle is supplied.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            config:    config.clone(),
            oracle:    Uniform(true),
            entrances: Vec::new(),
            exits:     Vec::new(),
        }
    }
}

impl<O: WalkabilityOracle> TileGridBuilder<O> {
    /// Use `oracle` to decide walkability, once per tile.
    pub fn oracle<P: WalkabilityOracle>(self, oracle: P) -> TileGridBuilder<P> {
        TileGridBuilder {
            config:    self.config,
            oracle,
            entrances: self.entrances,
            exits:     self.exits,
        }
    }

    pub fn entrance(mut self, coord: GridCoord) -> Self {
        self.entrances.push(coord);
        self
    }

    pub fn exit(mut self, coord: GridCoord) -> Self {
        self.exits.push(coord);
        self
    }

    /// Validate the config, create every tile, wire 4-neighbourhoods, apply
    /// entrance/exit flags, and bulk-load the R-tree.
    pub fn build(self) -> TileResult<TileGrid> {
        let cfg = &self.config;
        cfg.validate()?;
        if u32::try_from(cfg.tile_count()).is_err() {
            return Err(RgError::Config(format!(
                "{}x{} tiles exceed the TileId range",
                cfg.width, cfg.depth
            ))
            .into());
        }

        let size = cfg.tile_size;
        let mut tiles = Vec::with_capacity(cfg.tile_count());
        for z in 0..cfg.depth {
            for x in 0..cfg.width {
                let id = TileId(z * cfg.width + x);
                let corner = cfg.origin.offset(x as f32 * size, 0.0, z as f32 * size);
                let coord = GridCoord::new(x as i32, z as i32);
                tiles.push(Tile::new(id, corner, coord, size, &self.oracle));
            }
        }

        let mut grid = TileGrid {
            width:       cfg.width,
            depth:       cfg.depth,
            tile_size:   size,
            tiles,
            spatial_idx: RTree::new(),
        };

        // Neighbours: in-bounds orthogonal cells in W, E, S, N order.
        let neighbor_lists: Vec<Vec<TileId>> = grid
            .tiles
            .iter()
            .map(|t| {
                t.coord()
                    .orthogonal()
                    .into_iter()
                    .filter_map(|c| grid.id_at(c))
                    .collect()
            })
            .collect();
        for (tile, neighbors) in grid.tiles.iter_mut().zip(neighbor_lists) {
            tile.set_neighbors(neighbors);
        }

        for &coord in &self.entrances {
            grid.set_entrance(coord, true)?;
        }
        for &coord in &self.exits {
            grid.set_exit(coord, true)?;
        }

        let entries: Vec<TileEntry> = grid
            .tiles
            .iter()
            .map(|t| TileEntry { point: [t.center().x, t.center().z], id: t.id() })
            .collect();
        grid.spatial_idx = RTree::bulk_load(entries);

        debug!(
            width = grid.width,
            depth = grid.depth,
            walkable = grid.tiles.iter().filter(|t| t.is_walkable()).count(),
            "tile grid built"
        );
        Ok(grid)
    }
}
