//! corridor — agents crossing a walled room through two doorways.
//!
//! ```text
//! z=4  . . . . # . . . .
//! z=3  E . . . . . . . X
//! z=2  . . . . # . . . .
//! z=1  E . . . . . . . X
//! z=0  . . . . # . . . .
//! ```
//!
//! Agents appear on a random entrance at a random tick, reserve the lane to
//! the opposite exit, and leave the room when they reach it.  Later agents
//! wait wherever the lane is already claimed.
//!
//! Usage: `corridor [config.json] [output-dir]`.  Without a config file the
//! 9×5 room above runs for 60 ticks.  Set `RUST_LOG=debug` for per-tick logs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rg_core::{AgentId, GridConfig, GridCoord, Tick, TickOffset, TileId};
use rg_output::{CsvWriter, GridOutputObserver, OutputWriter};
use rg_sim::{GridObserver, GridSim, TickSummary};
use rg_tile::{Tile, TileFootprint, TileGrid, TileGridBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:  usize      = 16;
/// Agents appear during the first `SPAWN_WINDOW` ticks.
const SPAWN_WINDOW: u64        = 30;
/// Ticks an agent lingers on each tile after arriving.
const HOLD:         TickOffset = 0;

fn default_config() -> GridConfig {
    GridConfig {
        width: 9,
        depth: 5,
        total_ticks: 60,
        ..GridConfig::default()
    }
}

fn load_config(path: &Path) -> Result<GridConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: GridConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Room ──────────────────────────────────────────────────────────────────────

/// The two rows that pass through the wall.
fn lanes(config: &GridConfig) -> [i32; 2] {
    [1, config.depth as i32 - 2]
}

fn build_room(config: &GridConfig) -> Result<TileGrid> {
    ensure!(config.width >= 3 && config.depth >= 3, "room must be at least 3×3");

    let wall = config.width as i32 / 2;
    let doors = lanes(config);
    let last = config.width as i32 - 1;

    let mut builder = TileGridBuilder::new(config)
        .oracle(move |fp: &TileFootprint| fp.coord.x != wall || doors.contains(&fp.coord.z));
    for z in doors {
        builder = builder.entrance(GridCoord::new(0, z)).exit(GridCoord::new(last, z));
    }
    let grid = builder.build()?;
    ensure!(grid.is_valid_grid(), "room has no walkable entrance and exit");
    Ok(grid)
}

/// Tiles from the entrance to the exit of lane `z`.
fn lane_route(grid: &TileGrid, z: i32) -> Vec<TileId> {
    (0..grid.width() as i32).filter_map(|x| grid.id_at(GridCoord::new(x, z))).collect()
}

// ── Observer wrapper to count events ─────────────────────────────────────────

struct Tally<W: OutputWriter> {
    inner:      GridOutputObserver<W>,
    arrivals:   usize,
    exits:      usize,
    conflicts:  usize,
    collisions: usize,
}

impl<W: OutputWriter> Tally<W> {
    fn new(inner: GridOutputObserver<W>) -> Self {
        Self { inner, arrivals: 0, exits: 0, conflicts: 0, collisions: 0 }
    }
}

impl<W: OutputWriter> GridObserver for Tally<W> {
    fn on_agent_arrived(&mut self, _tick: Tick, _agent: AgentId, _tile: TileId) {
        self.arrivals += 1;
    }

    fn on_agent_exit(&mut self, tick: Tick, agent: AgentId, tile: TileId) {
        self.exits += 1;
        info!(%tick, %agent, %tile, "agent left the room");
    }

    fn on_conflict(&mut self, _tick: Tick, _tile: &Tile) {
        self.conflicts += 1;
    }

    fn on_collision(&mut self, tick: Tick, tile: TileId, agents: &[AgentId]) {
        self.collisions += 1;
        warn!(%tick, %tile, count = agents.len(), "agents share a tile");
    }

    fn on_snapshot(&mut self, tick: Tick, grid: &TileGrid) {
        self.inner.on_snapshot(tick, grid);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.inner.on_tick_end(tick, summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => default_config(),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "output".to_owned()));

    // 1. Room.
    let grid = build_room(&config)?;
    info!(width = grid.width(), depth = grid.depth(), "room built");

    // 2. Spawn schedule: (tick, lane), sorted by tick.
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let window = SPAWN_WINDOW.min(config.total_ticks).max(1);
    let doors = lanes(&config);
    let mut schedule: Vec<(u64, i32)> = (0..AGENT_COUNT)
        .map(|_| (rng.gen_range(0..window), doors[rng.gen_range(0..doors.len())]))
        .collect();
    schedule.sort_unstable();

    // 3. Output.
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut obs = Tally::new(GridOutputObserver::new(CsvWriter::new(&out_dir)?));

    // 4. Run.  Agents are dispatched on the tick they appear, so their
    //    claims are planned against the ledgers as they stand at that tick.
    let mut sim = GridSim::new(config, grid);
    let routes = doors.map(|z| lane_route(&sim.grid, z));
    let mut pending = schedule.into_iter().peekable();
    let mut waited: TickOffset = 0;

    let t0 = Instant::now();
    while sim.clock.current_tick < sim.config.end_tick() {
        let now = sim.clock.current_tick.0;
        while let Some((_, z)) = pending.next_if(|&(t, _)| t <= now) {
            let route = if z == doors[0] { &routes[0] } else { &routes[1] };
            let plan = sim.plan(route, 0)?;
            plan.reserve(&mut sim.grid, HOLD)?;
            waited += plan.wait_ticks();
            let agent = sim.spawn_agent(&plan)?;
            info!(tick = now, %agent, lane = z, eta = plan.arrival(), "agent appeared");
        }
        sim.step(&mut obs);
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing output");
    }

    info!(
        agents = AGENT_COUNT,
        exited = obs.exits,
        still_inside = sim.agents().len(),
        arrivals = obs.arrivals,
        planned_wait_ticks = waited,
        conflicts = obs.conflicts,
        collisions = obs.collisions,
        elapsed_ms = elapsed.as_millis() as u64,
        output = %out_dir.display(),
        "simulation complete"
    );
    Ok(())
}
