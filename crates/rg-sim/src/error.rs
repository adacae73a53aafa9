use rg_core::{RgError, TickOffset, TileId};
use rg_tile::TileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("route is empty")]
    EmptyRoute,

    #[error("{0} is not walkable")]
    InvalidTile(TileId),

    #[error("{from} and {to} are not neighbours")]
    NotAdjacent { from: TileId, to: TileId },

    #[error("speed must be positive, got {0}")]
    InvalidSpeed(f32),

    #[error("plan departs {0} ticks in the past")]
    StartInPast(TickOffset),

    #[error(transparent)]
    Grid(#[from] RgError),

    #[error("tile error: {0}")]
    Tile(#[from] TileError),
}

pub type SimResult<T> = Result<T, SimError>;
