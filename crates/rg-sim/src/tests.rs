//! Integration tests for rg-sim.

use rg_core::{AgentId, GridConfig, GridCoord, Tick, TileId};
use rg_tile::{Tile, TileFootprint, TileGrid, TileGridBuilder};

use crate::{GridObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(width: u32, depth: u32, total_ticks: u64) -> GridConfig {
    GridConfig {
        width,
        depth,
        tile_size: 1.0,
        agent_speed: 1.0,
        total_ticks,
        snapshot_interval_ticks: 1,
        ..GridConfig::default()
    }
}

/// Single row of `width` open unit tiles.
fn line(width: u32) -> TileGrid {
    TileGridBuilder::new(&config(width, 1, 10)).build().unwrap()
}

/// 5×3 grid, wall at x = 2 except the gap at (2, 1), exit at (4, 1).
///
/// ```text
/// z=2  . . # . .
/// z=1  E . . . X
/// z=0  . . # . .
/// ```
fn gap_grid() -> TileGrid {
    TileGridBuilder::new(&config(5, 3, 10))
        .oracle(|fp: &TileFootprint| fp.coord.x != 2 || fp.coord.z == 1)
        .entrance(GridCoord::new(0, 1))
        .exit(GridCoord::new(4, 1))
        .build()
        .unwrap()
}

fn id(grid: &TileGrid, x: i32, z: i32) -> TileId {
    grid.id_at(GridCoord::new(x, z)).unwrap()
}

/// Tiles along row `z` from `x = from` to `x = to` inclusive.
fn row(grid: &TileGrid, z: i32, from: i32, to: i32) -> Vec<TileId> {
    (from..=to).map(|x| id(grid, x, z)).collect()
}

#[derive(Default)]
struct Recorder {
    ticks_started: Vec<Tick>,
    arrivals:      Vec<(Tick, AgentId, TileId)>,
    exits:         Vec<(Tick, AgentId, TileId)>,
    conflicts:     Vec<(Tick, TileId)>,
    collisions:    Vec<(Tick, TileId, Vec<AgentId>)>,
    snapshots:     Vec<Tick>,
    summaries:     Vec<TickSummary>,
    ended:         Option<Tick>,
}

impl GridObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.ticks_started.push(tick);
    }
    fn on_agent_arrived(&mut self, tick: Tick, agent: AgentId, tile: TileId) {
        self.arrivals.push((tick, agent, tile));
    }
    fn on_agent_exit(&mut self, tick: Tick, agent: AgentId, tile: TileId) {
        self.exits.push((tick, agent, tile));
    }
    fn on_conflict(&mut self, tick: Tick, tile: &Tile) {
        self.conflicts.push((tick, tile.id()));
    }
    fn on_collision(&mut self, tick: Tick, tile: TileId, agents: &[AgentId]) {
        self.collisions.push((tick, tile, agents.to_vec()));
    }
    fn on_snapshot(&mut self, tick: Tick, _grid: &TileGrid) {
        self.snapshots.push(tick);
    }
    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        self.summaries.push(*summary);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── plan_route ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plan_tests {
    use rg_core::{RgError, TileId};
    use rg_tile::PathAction;

    use super::*;
    use crate::{SimError, plan_route};

    #[test]
    fn uncontended_route_is_all_moves() {
        let grid = line(4);
        let hops = row(&grid, 0, 0, 3);
        let plan = plan_route(&grid, &hops, 1.0, 0).unwrap();

        assert_eq!(plan.actions.len(), 3);
        assert!(plan.actions.iter().all(|a| !a.is_wait()));
        assert_eq!(plan.origin, hops[0]);
        assert_eq!(plan.destination(), hops[3]);
        assert_eq!(plan.total_ticks, 3);
        assert_eq!(plan.arrival(), 3);
        assert_eq!(plan.wait_ticks(), 0);
    }

    #[test]
    fn single_hop_stays_put() {
        let grid = line(2);
        let plan = plan_route(&grid, &[TileId(1)], 1.0, 4).unwrap();
        assert!(plan.actions.is_empty());
        assert_eq!(plan.destination(), TileId(1));
        assert_eq!(plan.total_ticks, 0);
        assert_eq!(plan.arrival(), 4);
    }

    #[test]
    fn contended_hop_waits_for_the_claim() {
        let mut grid = line(2);
        grid.add_claim(TileId(1), 0, 5).unwrap();

        let plan = plan_route(&grid, &[TileId(0), TileId(1)], 1.0, 0).unwrap();
        assert_eq!(
            plan.actions,
            vec![
                PathAction::Wait { origin: TileId(0), delay: 5 },
                PathAction::Move { origin: TileId(0), destination: TileId(1) },
            ]
        );
        assert_eq!(plan.total_ticks, 6);
        assert_eq!(plan.wait_ticks(), 5);
    }

    #[test]
    fn empty_route_rejected() {
        let grid = line(2);
        assert!(matches!(plan_route(&grid, &[], 1.0, 0), Err(SimError::EmptyRoute)));
    }

    #[test]
    fn non_positive_speed_rejected() {
        let grid = line(2);
        let hops = [TileId(0), TileId(1)];
        assert!(matches!(plan_route(&grid, &hops, 0.0, 0), Err(SimError::InvalidSpeed(_))));
        assert!(matches!(plan_route(&grid, &hops, -1.0, 0), Err(SimError::InvalidSpeed(_))));
        assert!(matches!(plan_route(&grid, &hops, f32::NAN, 0), Err(SimError::InvalidSpeed(_))));
    }

    #[test]
    fn wall_tile_rejected() {
        let grid = gap_grid();
        let wall = id(&grid, 2, 0);
        let hops = [id(&grid, 1, 0), wall];
        assert!(matches!(plan_route(&grid, &hops, 1.0, 0), Err(SimError::InvalidTile(t)) if t == wall));
    }

    #[test]
    fn unknown_tile_rejected() {
        let grid = line(2);
        let err = plan_route(&grid, &[TileId(0), TileId(99)], 1.0, 0).unwrap_err();
        assert!(matches!(err, SimError::Grid(RgError::TileNotFound(TileId(99)))));
    }

    #[test]
    fn skipping_a_tile_rejected() {
        let grid = line(3);
        let err = plan_route(&grid, &[TileId(0), TileId(2)], 1.0, 0).unwrap_err();
        assert!(matches!(err, SimError::NotAdjacent { from: TileId(0), to: TileId(2) }));
    }

    #[test]
    fn route_through_the_gap_is_accepted() {
        let grid = gap_grid();
        let hops = row(&grid, 1, 0, 4);
        let plan = plan_route(&grid, &hops, 1.0, 0).unwrap();
        assert_eq!(plan.destination(), id(&grid, 4, 1));
        assert_eq!(plan.total_ticks, 4);
    }
}

// ── Reservation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod reserve_tests {
    use rg_ledger::Claim;

    use super::*;
    use crate::plan_route;

    fn claims(grid: &TileGrid, tile: TileId) -> Vec<Claim> {
        grid.tile(tile).ledger().iter().collect()
    }

    #[test]
    fn moves_claim_destinations_in_sequence() {
        let mut grid = line(3);
        let plan = plan_route(&grid, &[TileId(0), TileId(1), TileId(2)], 1.0, 0).unwrap();
        plan.reserve(&mut grid, 0).unwrap();

        assert!(claims(&grid, TileId(0)).is_empty());
        assert_eq!(claims(&grid, TileId(1)), vec![Claim::new(0, 1)]);
        assert_eq!(claims(&grid, TileId(2)), vec![Claim::new(1, 2)]);
    }

    #[test]
    fn hold_extends_each_claim() {
        let mut grid = line(2);
        let plan = plan_route(&grid, &[TileId(0), TileId(1)], 1.0, 2).unwrap();
        plan.reserve(&mut grid, 3).unwrap();
        assert_eq!(claims(&grid, TileId(1)), vec![Claim::new(2, 6)]);
    }

    #[test]
    fn wait_claims_origin_and_delays_the_move() {
        let mut grid = line(2);
        grid.add_claim(TileId(1), 0, 5).unwrap();

        let plan = plan_route(&grid, &[TileId(0), TileId(1)], 1.0, 0).unwrap();
        plan.reserve(&mut grid, 0).unwrap();

        assert_eq!(claims(&grid, TileId(0)), vec![Claim::new(0, 5)]);
        assert_eq!(claims(&grid, TileId(1)), vec![Claim::new(0, 5), Claim::new(5, 6)]);
        assert!(!grid.tile(TileId(1)).has_conflict());
    }

    #[test]
    fn second_agent_is_routed_behind_the_first() {
        let mut grid = line(3);
        let hops = [TileId(0), TileId(1), TileId(2)];

        let first = plan_route(&grid, &hops, 1.0, 0).unwrap();
        first.reserve(&mut grid, 0).unwrap();
        let second = plan_route(&grid, &hops, 1.0, 0).unwrap();

        assert!(second.wait_ticks() > 0);
        assert!(second.arrival() > first.arrival());
    }

    #[test]
    fn claims_age_with_maintenance() {
        let mut grid = line(3);
        let plan = plan_route(&grid, &[TileId(0), TileId(1), TileId(2)], 1.0, 0).unwrap();
        plan.reserve(&mut grid, 0).unwrap();

        assert!(grid.tile(TileId(1)).is_currently_claimed());
        assert!(!grid.tile(TileId(2)).is_currently_claimed());

        assert_eq!(grid.update_all(), 1);
        assert!(!grid.tile(TileId(1)).is_currently_claimed());
        assert!(grid.tile(TileId(2)).is_currently_claimed());
    }
}

// ── Agent executor ────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_tests {
    use rg_tile::{PathAction, TileAction};

    use super::*;
    use crate::AgentState;

    fn mv(from: u32, to: u32) -> PathAction {
        PathAction::Move { origin: TileId(from), destination: TileId(to) }
    }

    #[test]
    fn one_tick_per_unit_hop() {
        let grid = line(3);
        let mut agent = AgentState::new(AgentId(0), TileId(0), 1.0, [mv(0, 1), mv(1, 2)]);

        assert_eq!(agent.advance(&grid), Some(TileId(1)));
        assert_eq!(agent.tile(), TileId(1));
        assert_eq!(agent.advance(&grid), Some(TileId(2)));
        assert!(agent.is_idle());
        assert_eq!(agent.advance(&grid), None);
        assert_eq!(agent.tile(), TileId(2));
    }

    #[test]
    fn wait_counts_down_before_moving() {
        let grid = line(2);
        let wait = PathAction::Wait { origin: TileId(0), delay: 2 };
        let mut agent = AgentState::new(AgentId(0), TileId(0), 1.0, [wait, mv(0, 1)]);

        assert_eq!(agent.advance(&grid), None);
        assert!(!agent.is_idle());
        assert_eq!(agent.advance(&grid), None);
        assert_eq!(agent.tile(), TileId(0));
        assert_eq!(agent.advance(&grid), Some(TileId(1)));
    }

    #[test]
    fn slow_move_stays_on_origin_until_complete() {
        let grid = line(2);
        let mut agent = AgentState::new(AgentId(0), TileId(0), 0.5, [mv(0, 1)]);

        assert_eq!(agent.advance(&grid), None);
        assert!(agent.is_moving());
        assert_eq!(agent.tile(), TileId(0));
        assert_eq!(agent.advance(&grid), Some(TileId(1)));
        assert!(!agent.is_moving());
    }

    #[test]
    fn zero_wait_is_skipped() {
        let grid = line(2);
        let wait = PathAction::Wait { origin: TileId(0), delay: 0 };
        let mut agent = AgentState::new(AgentId(0), TileId(0), 1.0, [wait, mv(0, 1)]);
        assert_eq!(agent.advance(&grid), Some(TileId(1)));
    }

    #[test]
    fn fast_moves_complete_one_per_tick() {
        let grid = line(3);
        let mut agent = AgentState::new(AgentId(0), TileId(0), 10.0, [mv(0, 1), mv(1, 2)]);
        assert_eq!(agent.advance(&grid), Some(TileId(1)));
        assert_eq!(agent.pending(), 1);
        assert_eq!(agent.advance(&grid), Some(TileId(2)));
    }

    #[test]
    fn exit_action_unspawns() {
        let grid = line(3);
        let mut agent = AgentState::new(AgentId(0), TileId(0), 1.0, [mv(0, 1), mv(1, 2)]);
        agent.advance(&grid);

        TileAction::Exit.apply(&mut agent);
        assert!(agent.is_exited());
        assert!(agent.is_idle());
        assert_eq!(agent.advance(&grid), None);
        assert_eq!(agent.tile(), TileId(1));
    }
}

// ── GridSim ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use rg_core::RgError;
    use rg_tile::PathAction;

    use super::*;
    use crate::{GridSim, NoopObserver, RoutePlan, SimError, plan_route};

    fn gap_sim(total_ticks: u64) -> GridSim {
        GridSim::new(config(5, 3, total_ticks), gap_grid())
    }

    #[test]
    fn agent_walks_to_exit_and_leaves() {
        let mut sim = gap_sim(10);
        let hops = row(&sim.grid, 1, 0, 4);
        let exit = hops[4];
        let agent = sim.dispatch(&hops, 0, 0).unwrap();

        let mut obs = Recorder::default();
        sim.run_ticks(4, &mut obs);

        let arrived: Vec<TileId> = obs.arrivals.iter().map(|&(_, _, t)| t).collect();
        assert_eq!(arrived, hops[1..].to_vec());
        assert_eq!(obs.exits, vec![(Tick(3), agent, exit)]);
        assert!(sim.agents().is_empty());
        assert!(sim.agent(agent).is_none());
        assert!(obs.conflicts.is_empty());
        assert_eq!(obs.summaries.last().unwrap().active_agents, 0);
    }

    #[test]
    fn delayed_start_idles_on_origin() {
        let mut sim = gap_sim(10);
        let hops = row(&sim.grid, 1, 0, 1);
        let agent = sim.dispatch(&hops, 2, 0).unwrap();

        sim.run_ticks(2, &mut NoopObserver);
        assert_eq!(sim.agent(agent).unwrap().tile(), hops[0]);

        // The destination claim becomes active exactly when the move lands.
        assert!(sim.grid.tile(hops[1]).is_currently_claimed());
        sim.step(&mut NoopObserver);
        assert_eq!(sim.agent(agent).unwrap().tile(), hops[1]);
    }

    #[test]
    fn start_in_the_past_rejected() {
        let mut sim = gap_sim(10);
        let hops = row(&sim.grid, 1, 0, 1);
        let plan = plan_route(&sim.grid, &hops, 1.0, -3).unwrap();
        assert!(matches!(sim.spawn_agent(&plan), Err(SimError::StartInPast(3))));
        assert!(sim.agents().is_empty());
    }

    fn hand_plan(actions: Vec<PathAction>, speed: f32) -> RoutePlan {
        RoutePlan { actions, origin: TileId(0), start: 0, total_ticks: 1, speed }
    }

    #[test]
    fn plan_leaving_the_grid_rejected() {
        let mut sim = GridSim::new(config(3, 1, 10), line(3));
        let plan = hand_plan(vec![PathAction::Move { origin: TileId(0), destination: TileId(99) }], 1.0);

        let err = sim.spawn_agent(&plan).unwrap_err();
        assert!(matches!(err, SimError::Grid(RgError::TileNotFound(TileId(99)))));
        assert!(sim.agents().is_empty());

        // Nothing was admitted, so the tick runs cleanly.
        sim.step(&mut NoopObserver);
        let next = sim.spawn_agent(&hand_plan(vec![], 1.0)).unwrap();
        assert_eq!(next, AgentId(0));
    }

    #[test]
    fn plan_with_bad_origin_or_wait_tile_rejected() {
        let mut sim = GridSim::new(config(3, 1, 10), line(3));
        let wait = PathAction::Wait { origin: TileId(7), delay: 2 };
        assert!(matches!(
            sim.spawn_agent(&hand_plan(vec![wait], 1.0)),
            Err(SimError::Grid(RgError::TileNotFound(TileId(7))))
        ));
    }

    #[test]
    fn plan_with_non_positive_speed_rejected() {
        let mut sim = GridSim::new(config(3, 1, 10), line(3));
        let mv = PathAction::Move { origin: TileId(0), destination: TileId(1) };
        for speed in [0.0, -2.0, f32::NAN] {
            assert!(matches!(sim.spawn_agent(&hand_plan(vec![mv], speed)), Err(SimError::InvalidSpeed(_))));
        }
        assert!(sim.agents().is_empty());
    }

    #[test]
    fn agent_ids_are_sequential() {
        let mut sim = gap_sim(10);
        let (upper, lower) = (row(&sim.grid, 1, 0, 1), row(&sim.grid, 0, 0, 1));
        let a = sim.dispatch(&upper, 0, 0).unwrap();
        let b = sim.dispatch(&lower, 0, 0).unwrap();
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert_eq!(sim.agent(b).unwrap().id(), b);
    }

    #[test]
    fn overlapping_claims_reported_as_conflict() {
        let mut sim = gap_sim(10);
        let tile = id(&sim.grid, 3, 0);
        sim.grid.add_claim(tile, 0, 3).unwrap();
        sim.grid.add_claim(tile, 0, 3).unwrap();

        let mut obs = Recorder::default();
        let summary = sim.step(&mut obs);

        assert_eq!(obs.conflicts, vec![(Tick(0), tile)]);
        assert_eq!(summary.conflicts, 1);
        assert_eq!(summary.claimed_tiles, 1);
        assert_eq!(summary.expired_claims, 0);

        sim.run_ticks(2, &mut obs);
        let expired: usize = obs.summaries.iter().map(|s| s.expired_claims).sum();
        assert_eq!(expired, 2);
        assert!(sim.grid.tile(tile).ledger().is_empty());
    }

    #[test]
    fn agents_sharing_a_tile_reported_as_collision() {
        let mut sim = gap_sim(10);
        let origin = id(&sim.grid, 1, 1);
        let plan = plan_route(&sim.grid, &[origin], 1.0, 0).unwrap();
        let a = sim.spawn_agent(&plan).unwrap();
        let b = sim.spawn_agent(&plan).unwrap();

        let mut obs = Recorder::default();
        sim.step(&mut obs);
        assert_eq!(obs.collisions, vec![(Tick(0), origin, vec![a, b])]);
    }

    #[test]
    fn maintenance_runs_after_diagnostics() {
        let mut sim = gap_sim(10);
        let tile = id(&sim.grid, 0, 0);
        sim.grid.add_claim(tile, 0, 1).unwrap();

        let first = sim.step(&mut NoopObserver);
        assert_eq!(first.claimed_tiles, 1);
        assert_eq!(first.expired_claims, 1);

        let second = sim.step(&mut NoopObserver);
        assert_eq!(second.claimed_tiles, 0);
    }

    #[test]
    fn run_stops_at_end_tick() {
        let mut cfg = config(5, 3, 5);
        cfg.snapshot_interval_ticks = 2;
        let mut sim = GridSim::new(cfg, gap_grid());

        let mut obs = Recorder::default();
        sim.run(&mut obs);

        assert_eq!(obs.ticks_started, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(2), Tick(4)]);
        assert_eq!(obs.summaries.len(), 5);
        assert_eq!(obs.ended, Some(Tick(5)));
        assert_eq!(sim.clock.current_tick, Tick(5));
    }

    #[test]
    fn zero_snapshot_interval_disables_snapshots() {
        let mut cfg = config(5, 3, 3);
        cfg.snapshot_interval_ticks = 0;
        let mut sim = GridSim::new(cfg, gap_grid());

        let mut obs = Recorder::default();
        sim.run(&mut obs);
        assert!(obs.snapshots.is_empty());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::{GridSim, NoopObserver};

    proptest! {
        /// On an empty line the agent lands on the last tile during tick
        /// `arrival - 1` and not before.
        #[test]
        fn arrival_matches_plan(len in 2u32..8, start in 0i64..5) {
            let mut sim = GridSim::new(config(len, 1, 32), line(len));
            let hops = row(&sim.grid, 0, 0, len as i32 - 1);
            let plan = sim.plan(&hops, start).unwrap();
            let arrival = plan.arrival();
            prop_assert_eq!(arrival, start + len as i64 - 1);

            plan.reserve(&mut sim.grid, 0).unwrap();
            let agent = sim.spawn_agent(&plan).unwrap();

            sim.run_ticks(arrival as u64 - 1, &mut NoopObserver);
            prop_assert_ne!(sim.agent(agent).unwrap().tile(), plan.destination());
            sim.step(&mut NoopObserver);
            prop_assert_eq!(sim.agent(agent).unwrap().tile(), plan.destination());
        }

        /// A single reserved route never conflicts with itself.
        #[test]
        fn lone_route_never_conflicts(len in 2u32..8, start in 0i64..5, hold in 0i64..3) {
            let mut sim = GridSim::new(config(len, 1, 32), line(len));
            let hops = row(&sim.grid, 0, 0, len as i32 - 1);
            sim.dispatch(&hops, start, hold).unwrap();

            for _ in 0..(start + len as i64 + hold) {
                prop_assert_eq!(sim.step(&mut NoopObserver).conflicts, 0);
            }
        }
    }
}
