//! The `GridSim` struct and its tick loop.

use rg_core::{AgentId, GridConfig, SimClock, Tick, TickOffset, TileId};
use rg_tile::{PathAction, TileGrid};
use tracing::{debug, info, trace, warn};

use crate::plan::plan_route;
use crate::{AgentState, GridObserver, RoutePlan, SimError, SimResult, TickSummary};

#[cfg(feature = "fx-hash")]
type OccupancyIndex = rustc_hash::FxHashMap<TileId, Vec<AgentId>>;
#[cfg(not(feature = "fx-hash"))]
type OccupancyIndex = std::collections::HashMap<TileId, Vec<AgentId>>;

/// Owns the grid and the agents walking it, and drives both one tick at a
/// time.
///
/// # Tick phases
///
/// 1. **Execute**: every agent, in ascending `AgentId` order, spends one
///    tick on its plan.  An agent completing a move onto an exit tile is
///    unspawned by the tile's action and removed.
/// 2. **Diagnose**: tiles with more than one claim in effect are reported
///    as conflicts; tiles holding more than one agent as collisions.
/// 3. **Snapshot** (every `snapshot_interval_ticks`).
/// 4. **Maintain**: every tile ledger ages by one tick.  Claims are
///    relative to the current tick, so planning between two calls to
///    [`step`](Self::step) always sees maintained ledgers.
pub struct GridSim {
    pub config: GridConfig,
    pub clock:  SimClock,
    pub grid:   TileGrid,

    /// Sorted by id; ids are issued in increasing order.
    agents:     Vec<AgentState>,
    next_agent: u32,
}

impl GridSim {
    pub fn new(config: GridConfig, grid: TileGrid) -> Self {
        Self {
            config,
            clock: SimClock::new(),
            grid,
            agents: Vec::new(),
            next_agent: 0,
        }
    }

    // ── Agents ────────────────────────────────────────────────────────────

    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.agents
            .binary_search_by_key(&id, AgentState::id)
            .ok()
            .map(|i| &self.agents[i])
    }

    /// Plan a route along `hops` at the configured agent speed, departing
    /// `start` ticks from now.  Does not reserve anything.
    pub fn plan(&self, hops: &[TileId], start: TickOffset) -> SimResult<RoutePlan> {
        plan_route(&self.grid, hops, self.config.agent_speed, start)
    }

    /// Add an agent that will execute `plan`, standing on `plan.origin`
    /// until its departure.
    ///
    /// Every tile the plan names must belong to this grid and the speed
    /// must be positive; plans from [`plan`](Self::plan) always are.
    pub fn spawn_agent(&mut self, plan: &RoutePlan) -> SimResult<AgentId> {
        if plan.start < 0 {
            return Err(SimError::StartInPast(-plan.start));
        }
        if !(plan.speed > 0.0) {
            return Err(SimError::InvalidSpeed(plan.speed));
        }
        self.grid.get(plan.origin)?;
        for action in &plan.actions {
            self.grid.get(action.origin())?;
            self.grid.get(action.target())?;
        }

        let id = AgentId(self.next_agent);
        self.next_agent += 1;

        let idle = (plan.start > 0).then_some(PathAction::Wait { origin: plan.origin, delay: plan.start });
        let actions = idle.into_iter().chain(plan.actions.iter().copied());
        self.agents.push(AgentState::new(id, plan.origin, plan.speed, actions));

        trace!(
            agent = %id,
            origin = %plan.origin,
            departs = ?self.clock.absolute(plan.start),
            steps = plan.actions.len(),
            "agent spawned"
        );
        Ok(id)
    }

    /// Plan `hops`, reserve the route, and spawn an agent to walk it.
    pub fn dispatch(&mut self, hops: &[TileId], start: TickOffset, hold: TickOffset) -> SimResult<AgentId> {
        let plan = self.plan(hops, start)?;
        plan.reserve(&mut self.grid, hold)?;
        self.spawn_agent(&plan)
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: GridObserver>(&mut self, observer: &mut O) {
        info!(
            from = %self.clock.current_tick,
            to = %self.config.end_tick(),
            agents = self.agents.len(),
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, agents = self.agents.len(), "simulation finished");
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: GridObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process the current tick and advance the clock.
    pub fn step<O: GridObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.execute_agents(now, observer);
        let (claimed_tiles, conflicts) = self.report_conflicts(now, observer);
        self.report_collisions(now, observer);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.grid);
        }

        let expired_claims = self.grid.update_all();

        let summary = TickSummary {
            active_agents: self.agents.len(),
            claimed_tiles,
            conflicts,
            expired_claims,
        };
        debug!(
            tick = %now,
            agents = summary.active_agents,
            claimed = summary.claimed_tiles,
            expired = summary.expired_claims,
            "tick processed"
        );
        observer.on_tick_end(now, &summary);
        self.clock.advance();
        summary
    }

    fn execute_agents<O: GridObserver>(&mut self, now: Tick, observer: &mut O) {
        let grid = &self.grid;
        for agent in &mut self.agents {
            let Some(reached) = agent.advance(grid) else {
                continue;
            };
            observer.on_agent_arrived(now, agent.id(), reached);

            if let Some(action) = grid.tile(reached).tile_action() {
                action.apply(agent);
                if agent.is_exited() {
                    trace!(agent = %agent.id(), tile = %reached, "agent exited");
                    observer.on_agent_exit(now, agent.id(), reached);
                }
            }
        }
        self.agents.retain(|a| !a.is_exited());
    }

    /// Returns `(claimed tiles, conflicting tiles)`.
    fn report_conflicts<O: GridObserver>(&self, now: Tick, observer: &mut O) -> (usize, usize) {
        let mut claimed = 0;
        let mut conflicts = 0;
        for tile in self.grid.iter() {
            if !tile.is_currently_claimed() {
                continue;
            }
            claimed += 1;
            if tile.has_conflict() {
                conflicts += 1;
                observer.on_conflict(now, tile);
            }
        }
        if conflicts > 0 {
            warn!(tick = %now, conflicts, "tiles with overlapping active claims");
        }
        (claimed, conflicts)
    }

    fn report_collisions<O: GridObserver>(&self, now: Tick, observer: &mut O) {
        let mut index = OccupancyIndex::default();
        for agent in &self.agents {
            index.entry(agent.tile()).or_default().push(agent.id());
        }

        let mut crowded: Vec<(TileId, Vec<AgentId>)> =
            index.into_iter().filter(|(_, agents)| agents.len() > 1).collect();
        crowded.sort_unstable_by_key(|(tile, _)| *tile);
        for (tile, agents) in crowded {
            observer.on_collision(now, tile, &agents);
        }
    }
}
