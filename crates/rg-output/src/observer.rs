//! `GridOutputObserver<W>` bridges `GridObserver` to an `OutputWriter`.

use rg_core::Tick;
use rg_sim::{GridObserver, TickSummary};
use rg_tile::TileGrid;
use tracing::warn;

use crate::row::{TickSummaryRow, TileSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`GridObserver`] that writes tile snapshots and tick summaries to any
/// [`OutputWriter`].
///
/// Observer callbacks cannot fail, so the first write error is kept and
/// returned by [`take_error`][Self::take_error] once the run is over.
pub struct GridOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> GridOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "report write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> GridObserver for GridOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, grid: &TileGrid) {
        let rows: Vec<TileSnapshotRow> = grid.iter().map(|t| TileSnapshotRow::from_tile(tick, t)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::new(tick, summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
