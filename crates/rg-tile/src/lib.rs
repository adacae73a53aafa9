//! `rg-tile` — grid tiles and the contract a path search consumes.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`tile`]   | `Tile` — coordinates, flags, one `ClaimLedger`, edge costing  |
//! | [`oracle`] | `WalkabilityOracle`, `TileFootprint`, `Uniform`               |
//! | [`action`] | `PathAction` (Wait / Move), `TileAction`, `Unspawn`           |
//! | [`node`]   | `PathNode`, `PathGraph` — the search-facing contract          |
//! | [`grid`]   | `TileGrid` arena (+ R-tree snapping), `TileGridBuilder`       |
//! | [`error`]  | `TileError`, `TileResult<T>`                                  |
//!
//! # Ownership
//!
//! Tiles never own each other.  [`TileGrid`] holds every tile in a flat
//! `Vec` indexed by [`rg_core::TileId`]; a tile's neighbours are a list of
//! ids resolved through the grid.

pub mod action;
pub mod error;
pub mod grid;
pub mod node;
pub mod oracle;
pub mod tile;


pub use action::{PathAction, TileAction, Unspawn};
pub use error::{TileError, TileResult};
pub use grid::{TileGrid, TileGridBuilder};
pub use node::{PathGraph, PathNode};
pub use oracle::{TileFootprint, Uniform, WalkabilityOracle};
pub use tile::Tile;
