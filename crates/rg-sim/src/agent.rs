//! Agent executor: consumes a plan's actions one tick at a time.

use std::collections::VecDeque;

use rg_core::{AgentId, TickOffset, TileId};
use rg_tile::{PathAction, TileGrid, Unspawn};

/// The action in progress and the ticks it still needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    action:    PathAction,
    remaining: TickOffset,
}

/// Execution state of one agent.
///
/// The agent logically stays on its origin tile for the whole of a `Move`
/// and appears on the destination when the move completes.
#[derive(Debug, Clone)]
pub struct AgentState {
    id:      AgentId,
    tile:    TileId,
    speed:   f32,
    pending: VecDeque<PathAction>,
    current: Option<Step>,
    exited:  bool,
}

impl AgentState {
    pub fn new(id: AgentId, tile: TileId, speed: f32, actions: impl IntoIterator<Item = PathAction>) -> Self {
        Self {
            id,
            tile,
            speed,
            pending: actions.into_iter().collect(),
            current: None,
            exited:  false,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The tile the agent currently stands on.
    #[inline]
    pub fn tile(&self) -> TileId {
        self.tile
    }

    #[inline]
    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// `true` when no action is in progress or queued.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }

    /// `true` while a `Move` is in progress.
    pub fn is_moving(&self) -> bool {
        matches!(self.current, Some(Step { action: PathAction::Move { .. }, .. }))
    }

    /// Actions not yet started.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Spend one tick on the plan.  Returns the tile reached if a move
    /// completed.
    ///
    /// Zero-length waits are skipped.  A zero-length move still completes
    /// on the tick it is started, one move per call.
    ///
    /// # Panics
    /// Panics if a queued move names a tile outside `grid`.
    pub fn advance(&mut self, grid: &TileGrid) -> Option<TileId> {
        if self.exited {
            return None;
        }
        loop {
            let mut step = match self.current.take() {
                Some(step) => step,
                None => {
                    let action = self.pending.pop_front()?;
                    Step { action, remaining: self.duration_of(action, grid) }
                }
            };

            if step.remaining > 0 {
                step.remaining -= 1;
                if step.remaining > 0 {
                    self.current = Some(step);
                    return None;
                }
                return self.complete(step.action);
            }
            if let Some(reached) = self.complete(step.action) {
                return Some(reached);
            }
        }
    }

    fn duration_of(&self, action: PathAction, grid: &TileGrid) -> TickOffset {
        match action {
            PathAction::Wait { delay, .. } => delay,
            PathAction::Move { origin, destination } => {
                grid.tile(origin).travel_ticks(grid.tile(destination), self.speed)
            }
        }
    }

    fn complete(&mut self, action: PathAction) -> Option<TileId> {
        match action {
            PathAction::Wait { .. } => None,
            PathAction::Move { destination, .. } => {
                self.tile = destination;
                Some(destination)
            }
        }
    }
}

impl Unspawn for AgentState {
    fn unspawn(&mut self) {
        self.exited = true;
        self.current = None;
        self.pending.clear();
    }
}
