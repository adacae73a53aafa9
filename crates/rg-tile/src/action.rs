//! Path segments and tile-triggered agent actions.

use rg_core::{TickOffset, TileId};

/// One step of an executable route.
///
/// A search layer concatenates the actions returned by
/// [`Tile::path_to`][crate::Tile::path_to] for every hop into an agent's
/// plan; the executor consumes them in order with an exhaustive `match`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathAction {
    /// Stay on `origin` for `delay` ticks.
    Wait { origin: TileId, delay: TickOffset },

    /// Travel from `origin` to `destination`.
    Move { origin: TileId, destination: TileId },
}

impl PathAction {
    /// The tile the action starts on.
    #[inline]
    pub fn origin(&self) -> TileId {
        match *self {
            PathAction::Wait { origin, .. } | PathAction::Move { origin, .. } => origin,
        }
    }

    /// The tile the agent is on once the action completes.
    #[inline]
    pub fn target(&self) -> TileId {
        match *self {
            PathAction::Wait { origin, .. } => origin,
            PathAction::Move { destination, .. } => destination,
        }
    }

    #[inline]
    pub fn is_wait(&self) -> bool {
        matches!(self, PathAction::Wait { .. })
    }
}

/// The agent capability a tile may act upon.
pub trait Unspawn {
    /// Remove the agent from the simulation.
    fn unspawn(&mut self);
}

/// Something a tile does to an agent standing on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileAction {
    /// The tile is an exit: the agent leaves the simulation.
    Exit,
}

impl TileAction {
    pub fn apply<A: Unspawn + ?Sized>(self, agent: &mut A) {
        match self {
            TileAction::Exit => agent.unspawn(),
        }
    }
}
