//! `rg-output` — CSV reporting for the tile reservation grid.
//!
//! | File                  | One row per                                 |
//! |-----------------------|---------------------------------------------|
//! | `tile_snapshots.csv`  | tile, at every snapshot tick                |
//! | `tick_summaries.csv`  | tick                                        |
//!
//! [`GridOutputObserver`] implements `rg_sim::GridObserver` and feeds any
//! [`OutputWriter`]; [`CsvWriter`] is the bundled backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rg_output::{CsvWriter, GridOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = GridOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     tracing::error!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::GridOutputObserver;
pub use row::{TickSummaryRow, TileSnapshotRow};
pub use writer::OutputWriter;
