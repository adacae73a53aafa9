//! Plain data rows handed to writers.

use rg_core::Tick;
use rg_sim::TickSummary;
use rg_tile::Tile;

/// State of one tile at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSnapshotRow {
    pub tick:     u64,
    pub x:        i32,
    pub z:        i32,
    pub walkable: bool,
    pub entrance: bool,
    pub exit:     bool,
    /// The earliest claim has started.
    pub claimed:  bool,
    /// More than one claim is in effect.
    pub conflict: bool,
    /// Claims held, active or future.
    pub claims:   u32,
}

impl TileSnapshotRow {
    pub fn from_tile(tick: Tick, tile: &Tile) -> Self {
        let coord = tile.coord();
        Self {
            tick:     tick.0,
            x:        coord.x,
            z:        coord.z,
            walkable: tile.is_walkable(),
            entrance: tile.is_entrance(),
            exit:     tile.is_exit(),
            claimed:  tile.is_currently_claimed(),
            conflict: tile.has_conflict(),
            claims:   u32::try_from(tile.ledger().len()).unwrap_or(u32::MAX),
        }
    }
}

/// Counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub active_agents:  u64,
    pub claimed_tiles:  u64,
    pub conflicts:      u64,
    pub expired_claims: u64,
}

impl TickSummaryRow {
    pub fn new(tick: Tick, summary: &TickSummary) -> Self {
        Self {
            tick:           tick.0,
            active_agents:  summary.active_agents as u64,
            claimed_tiles:  summary.claimed_tiles as u64,
            conflicts:      summary.conflicts as u64,
            expired_claims: summary.expired_claims as u64,
        }
    }
}
