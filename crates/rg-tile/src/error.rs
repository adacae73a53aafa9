//! Tile-subsystem error type.

use rg_core::RgError;
use rg_ledger::LedgerError;
use thiserror::Error;

/// Errors produced by `rg-tile`.
#[derive(Debug, Error)]
pub enum TileError {
    #[error("claim rejected: {0}")]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Grid(#[from] RgError),
}

pub type TileResult<T> = Result<T, TileError>;
