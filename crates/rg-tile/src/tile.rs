//! The `Tile`: one grid cell with its claim ledger.
//!
//! # Edge cost
//!
//! Moving from tile `a` to tile `b` at `speed` world units per tick costs
//!
//! ```text
//! travel = floor(|b.center - a.center| / speed)
//! delay  = b.ledger.find_delay(start + travel / 2, travel)
//! cost   = travel + delay
//! ```
//!
//! where `start` is the planned departure, relative to the current tick.
//! Contention at the destination makes the edge more expensive, which steers
//! a search away from busy tiles.

use rg_core::{GridCoord, Position, TickOffset, TileId};
use rg_ledger::ClaimLedger;

use crate::{PathAction, TileAction, TileFootprint, TileResult, WalkabilityOracle};

/// One cell of the navigation grid.
///
/// Coordinates, center, and walkability are fixed at construction.  The
/// entrance/exit flags are assigned afterwards by whoever sets up the grid.
#[derive(Debug, Clone)]
pub struct Tile {
    id:        TileId,
    coord:     GridCoord,
    center:    Position,
    walkable:  bool,
    entrance:  bool,
    exit:      bool,
    ledger:    ClaimLedger,
    /// Adjacent tiles, resolved through the owning grid.
    neighbors: Vec<TileId>,
}

impl Tile {
    /// Create the tile whose square footprint has its minimum corner at
    /// `corner`.  The oracle is consulted exactly once.
    pub fn new<O>(id: TileId, corner: Position, coord: GridCoord, size: f32, oracle: &O) -> Self
    where
        O: WalkabilityOracle + ?Sized,
    {
        let center = corner.offset(size * 0.5, 0.0, size * 0.5);
        let walkable = oracle.is_walkable(&TileFootprint { coord, center, size });
        Self {
            id,
            coord,
            center,
            walkable,
            entrance:  false,
            exit:      false,
            ledger:    ClaimLedger::new(),
            neighbors: Vec::new(),
        }
    }

    // ── Static attributes ─────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[inline]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    #[inline]
    pub fn center(&self) -> Position {
        self.center
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// A tile can take part in a path iff it is walkable.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.walkable
    }

    #[inline]
    pub fn is_entrance(&self) -> bool {
        self.entrance
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.exit
    }

    pub fn set_entrance(&mut self, entrance: bool) {
        self.entrance = entrance;
    }

    pub fn set_exit(&mut self, exit: bool) {
        self.exit = exit;
    }

    #[inline]
    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    /// Replace the neighbour list.  Supplied by the grid owner.
    pub fn set_neighbors(&mut self, neighbors: Vec<TileId>) {
        self.neighbors = neighbors;
    }

    // ── Claims ────────────────────────────────────────────────────────────

    #[inline]
    pub fn ledger(&self) -> &ClaimLedger {
        &self.ledger
    }

    /// Reserve this tile over `[start, start + duration)`.
    pub fn add_claim(&mut self, start: TickOffset, duration: TickOffset) -> TileResult<()> {
        self.ledger.add_claim(start, duration)?;
        Ok(())
    }

    #[inline]
    pub fn is_currently_claimed(&self) -> bool {
        self.ledger.is_currently_claimed()
    }

    #[inline]
    pub fn has_conflict(&self) -> bool {
        self.ledger.has_conflict()
    }

    /// Per-tick maintenance.  Returns the number of expired claims.
    pub fn update(&mut self) -> usize {
        self.ledger.maintain()
    }

    /// The action this tile applies to an agent that reaches it, if any.
    pub fn tile_action(&self) -> Option<TileAction> {
        self.exit.then_some(TileAction::Exit)
    }

    // ── Costing ───────────────────────────────────────────────────────────

    /// Manhattan distance in grid cells.  Search guidance only.
    pub fn distance_heuristic(&self, other: &Tile) -> f32 {
        self.coord.manhattan(other.coord) as f32
    }

    /// Whole ticks needed to travel to `other`, rounded down.
    ///
    /// `speed` must be positive (debug builds assert it).  A vanishing speed yields
    /// `TickOffset::MAX` (float-to-int casts saturate), and every sum built
    /// on it below saturates rather than wraps.
    pub fn travel_ticks(&self, other: &Tile, speed: f32) -> TickOffset {
        debug_assert!(speed > 0.0, "speed must be positive, got {speed}");
        (self.center.distance(other.center) / speed).floor() as TickOffset
    }

    /// `(travel, delay)` for a hop to `other` departing at `start`.
    fn hop(&self, other: &Tile, start: TickOffset, speed: f32) -> (TickOffset, TickOffset) {
        let travel = self.travel_ticks(other, speed);
        let delay = other.ledger.find_delay(start.saturating_add(travel / 2), travel);
        (travel, delay)
    }

    /// True edge cost to `other`: travel ticks plus the wait the
    /// destination's claims impose on an arrival around
    /// `current_tick + travel / 2`.
    ///
    /// Does not check validity; callers filter invalid tiles first.
    pub fn distance(&self, other: &Tile, current_tick: TickOffset, speed: f32) -> f32 {
        let (travel, delay) = self.hop(other, current_tick, speed);
        travel.saturating_add(delay) as f32
    }

    /// Actions that take an agent from this tile to `other`, departing at
    /// `*running_time`.
    ///
    /// Emits `Wait` (on this tile) only when the destination imposes a
    /// positive delay, then always exactly one `Move`.  Advances
    /// `running_time` by `travel + delay` so consecutive hops chain.
    pub fn path_to(&self, other: &Tile, speed: f32, running_time: &mut TickOffset) -> Vec<PathAction> {
        let (travel, delay) = self.hop(other, *running_time, speed);

        let mut actions = Vec::with_capacity(2);
        if delay > 0 {
            actions.push(PathAction::Wait { origin: self.id, delay });
        }
        actions.push(PathAction::Move { origin: self.id, destination: other.id });

        *running_time = running_time.saturating_add(travel.saturating_add(delay));
        actions
    }
}
