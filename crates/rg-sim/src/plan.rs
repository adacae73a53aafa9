//! Turning a chosen sequence of tiles into timed actions and claims.
//!
//! The search that picks the tiles is not part of this crate; it hands over
//! the hop sequence it settled on, and [`plan_route`] asks every hop for its
//! path segment through the [`PathNode`] contract.

use rg_core::{RgError, TickOffset, TileId};
use rg_tile::{PathAction, PathGraph, PathNode, TileGrid};
use tracing::trace;

use crate::{SimError, SimResult};

/// An executable route for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    /// Actions in execution order.
    pub actions: Vec<PathAction>,
    /// Tile the agent starts on.
    pub origin: TileId,
    /// Departure, relative to the current tick.
    pub start: TickOffset,
    /// Ticks from departure to arrival at the last tile, waits included.
    pub total_ticks: TickOffset,
    /// Speed the plan was costed at, world units per tick.
    pub speed: f32,
}

impl RoutePlan {
    /// The tile the plan ends on.
    pub fn destination(&self) -> TileId {
        self.actions.last().map_or(self.origin, PathAction::target)
    }

    /// Relative tick at which the agent reaches the destination.
    pub fn arrival(&self) -> TickOffset {
        self.start + self.total_ticks
    }

    /// Total ticks spent waiting for contended tiles.
    pub fn wait_ticks(&self) -> TickOffset {
        self.actions
            .iter()
            .map(|a| match *a {
                PathAction::Wait { delay, .. } => delay,
                PathAction::Move { .. } => 0,
            })
            .sum()
    }

    /// Issue the claims this plan needs.
    ///
    /// - `Wait` reserves its origin for the length of the wait.
    /// - `Move` reserves its destination from the middle of the hop for
    ///   `travel + hold` ticks (at least one), the same window other
    ///   agents' delay queries test against.
    ///
    /// `hold` is how long the agent is expected to linger after arriving.
    /// Claims cannot be withdrawn, so reserve only a plan that will run.
    pub fn reserve(&self, grid: &mut TileGrid, hold: TickOffset) -> SimResult<()> {
        let mut t = self.start;
        for action in &self.actions {
            match *action {
                PathAction::Wait { origin, delay } => {
                    grid.add_claim(origin, t, delay)?;
                    t += delay;
                }
                PathAction::Move { origin, destination } => {
                    let travel = grid.get(origin)?.travel_ticks(grid.get(destination)?, self.speed);
                    let duration = (travel + hold).max(1);
                    grid.add_claim(destination, t + travel / 2, duration)?;
                    trace!(%destination, from = t + travel / 2, duration, "tile reserved");
                    t += travel;
                }
            }
        }
        Ok(())
    }
}

/// Build the plan for walking `hops` in order, departing at `start`.
///
/// Every hop must be a valid node and each consecutive pair must be
/// neighbours.  A single hop yields an empty plan that stays put.
pub fn plan_route<G: PathGraph>(
    graph: &G,
    hops:  &[TileId],
    speed: f32,
    start: TickOffset,
) -> SimResult<RoutePlan> {
    if !(speed > 0.0) {
        return Err(SimError::InvalidSpeed(speed));
    }
    let Some(&origin) = hops.first() else {
        return Err(SimError::EmptyRoute);
    };

    valid_node(graph, origin)?;

    let mut running = start;
    let mut actions = Vec::with_capacity(hops.len() * 2);
    for pair in hops.windows(2) {
        let (from, to) = (valid_node(graph, pair[0])?, valid_node(graph, pair[1])?);
        if !from.neighbors().contains(&to.id()) {
            return Err(SimError::NotAdjacent { from: from.id(), to: to.id() });
        }
        actions.extend(from.path_to(to, speed, &mut running));
    }

    Ok(RoutePlan {
        actions,
        origin,
        start,
        total_ticks: running - start,
        speed,
    })
}

fn valid_node<G: PathGraph>(graph: &G, id: TileId) -> SimResult<&G::Node> {
    let node = graph.node(id).ok_or(RgError::TileNotFound(id))?;
    if node.is_valid() {
        Ok(node)
    } else {
        Err(SimError::InvalidTile(id))
    }
}
