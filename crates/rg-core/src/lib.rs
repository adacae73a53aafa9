//! `rg-core` — foundational types for the tile reservation grid.
//!
//! This crate is a dependency of every other `rg-*` crate.  It has no `rg-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `TileId`, `AgentId`                                    |
//! | [`geo`]    | `Position` (3-D world space), `GridCoord` (x, z)       |
//! | [`time`]   | `Tick`, `TickOffset`, `SimClock`                       |
//! | [`config`] | `GridConfig`                                           |
//! | [`error`]  | `RgError`, `RgResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::GridConfig;
pub use error::{RgError, RgResult};
pub use geo::{GridCoord, Position};
pub use ids::{AgentId, TileId};
pub use time::{SimClock, Tick, TickOffset};
