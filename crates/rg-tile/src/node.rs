//! The contract between tiles and a path search.
//!
//! A search algorithm (A*, Dijkstra, anything informed) only ever sees
//! [`PathGraph`] and [`PathNode`]: it resolves ids to nodes, filters by
//! validity, ranks by the heuristic, prices edges with the true distance,
//! and finally asks each hop of the chosen route for its actions.  How the
//! next node to expand is picked is entirely the search's decision.

use rg_core::{TickOffset, TileId};

use crate::{PathAction, Tile};

/// A node a path search can expand.
pub trait PathNode {
    fn id(&self) -> TileId;

    /// Invalid nodes must never appear in a route.
    fn is_valid(&self) -> bool;

    /// Adjacent nodes, in a stable order.
    fn neighbors(&self) -> &[TileId];

    /// Admissible estimate of the cost to `other`.
    fn distance_heuristic(&self, other: &Self) -> f32;

    /// Edge cost to `other` for a departure at `current_tick`.
    fn distance(&self, other: &Self, current_tick: TickOffset, speed: f32) -> f32;

    /// Executable actions for the hop to `other`; advances `running_time`.
    fn path_to(&self, other: &Self, speed: f32, running_time: &mut TickOffset) -> Vec<PathAction>;
}

impl PathNode for Tile {
    #[inline]
    fn id(&self) -> TileId {
        Tile::id(self)
    }

    #[inline]
    fn is_valid(&self) -> bool {
        Tile::is_valid(self)
    }

    #[inline]
    fn neighbors(&self) -> &[TileId] {
        Tile::neighbors(self)
    }

    fn distance_heuristic(&self, other: &Self) -> f32 {
        Tile::distance_heuristic(self, other)
    }

    fn distance(&self, other: &Self, current_tick: TickOffset, speed: f32) -> f32 {
        Tile::distance(self, other, current_tick, speed)
    }

    fn path_to(&self, other: &Self, speed: f32, running_time: &mut TickOffset) -> Vec<PathAction> {
        Tile::path_to(self, other, speed, running_time)
    }
}

/// Resolves node ids for a search.
pub trait PathGraph {
    type Node: PathNode;

    /// `None` for ids outside the graph.
    fn node(&self, id: TileId) -> Option<&Self::Node>;
}
