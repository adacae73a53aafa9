//! CSV backend.
//!
//! Creates `tile_snapshots.csv` and `tick_summaries.csv` in the output
//! directory.  Booleans are written as `0`/`1`.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TileSnapshotRow};

pub const SNAPSHOT_FILE: &str = "tile_snapshots.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create both files in `dir` (which must exist) and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record([
            "tick", "x", "z", "walkable", "entrance", "exit", "claimed", "conflict", "claims",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "active_agents", "claimed_tiles", "conflicts", "expired_claims"])?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

fn flag(b: bool) -> String {
    (b as u8).to_string()
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[TileSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.x.to_string(),
                row.z.to_string(),
                flag(row.walkable),
                flag(row.entrance),
                flag(row.exit),
                flag(row.claimed),
                flag(row.conflict),
                row.claims.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.active_agents.to_string(),
            row.claimed_tiles.to_string(),
            row.conflicts.to_string(),
            row.expired_claims.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
