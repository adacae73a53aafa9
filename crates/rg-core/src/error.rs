//! Grid-wide error type.
//!
//! Sub-crates define their own error enums and wrap `RgError` as one variant
//! where they need to surface lookup or configuration failures.

use thiserror::Error;

use crate::{GridCoord, TileId};

/// The top-level error type for `rg-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RgError {
    #[error("tile {0} not found")]
    TileNotFound(TileId),

    #[error("grid coordinate {0} is outside the grid")]
    OutOfBounds(GridCoord),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `rg-*` crates.
pub type RgResult<T> = Result<T, RgError>;
