//! `rg-sim` — tick driver for the tile reservation grid.
//!
//! # Tick loop
//!
//! ```text
//! for tick in clock..config.end_tick():
//!   1. Execute   agents spend one tick on their plans, ascending AgentId;
//!                arrivals on an exit tile unspawn the agent.
//!   2. Diagnose  conflicts (>1 active claim) and collisions (>1 agent).
//!   3. Snapshot  every snapshot_interval_ticks.
//!   4. Maintain  every ledger ages by one tick.
//! ```
//!
//! Claims issued between ticks are relative to the tick about to run.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the per-tick occupancy index.                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rg_core::{GridConfig, GridCoord};
//! use rg_sim::{GridSim, NoopObserver};
//! use rg_tile::TileGridBuilder;
//!
//! let config = GridConfig::default();
//! let grid = TileGridBuilder::new(&config).build()?;
//! let mut sim = GridSim::new(config, grid);
//! sim.dispatch(&hops, 0, 1)?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod agent;
pub mod error;
pub mod observer;
pub mod plan;
pub mod sim;

#[cfg(test)]
mod tests;

pub use agent::AgentState;
pub use error::{SimError, SimResult};
pub use observer::{GridObserver, NoopObserver, TickSummary};
pub use plan::{RoutePlan, plan_route};
pub use sim::GridSim;
