//! Observer trait for diagnostics, reporting, and visualization.

use rg_core::{AgentId, Tick, TileId};
use rg_tile::{Tile, TileGrid};

/// Per-tick counters handed to [`GridObserver::on_tick_end`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Agents still in the simulation after this tick.
    pub active_agents:  usize,
    /// Tiles with a claim in effect during this tick.
    pub claimed_tiles:  usize,
    /// Tiles with more than one claim in effect during this tick.
    pub conflicts:      usize,
    /// Claims aged out by this tick's maintenance.
    pub expired_claims: usize,
}

/// Callbacks invoked by [`GridSim`][crate::GridSim] during the tick loop.
///
/// All methods default to no-ops.  Observers only read state; nothing they
/// do feeds back into the simulation.
pub trait GridObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// An agent completed a move onto `tile`.
    fn on_agent_arrived(&mut self, _tick: Tick, _agent: AgentId, _tile: TileId) {}

    /// An agent left the simulation through the exit at `tile`.
    fn on_agent_exit(&mut self, _tick: Tick, _agent: AgentId, _tile: TileId) {}

    /// `tile` has more than one claim in effect.  Claim issuance should
    /// have prevented this.
    fn on_conflict(&mut self, _tick: Tick, _tile: &Tile) {}

    /// More than one agent physically stands on `tile` at the end of the
    /// tick.
    fn on_collision(&mut self, _tick: Tick, _tile: TileId, _agents: &[AgentId]) {}

    /// Called every `config.snapshot_interval_ticks` ticks, before
    /// maintenance, with read-only access to every tile.
    fn on_snapshot(&mut self, _tick: Tick, _grid: &TileGrid) {}

    /// Called at the end of each tick, after maintenance.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`GridObserver`] that does nothing.
pub struct NoopObserver;

impl GridObserver for NoopObserver {}
