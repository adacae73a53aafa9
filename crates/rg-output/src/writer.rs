//! The `OutputWriter` trait implemented by report backends.

use crate::{OutputResult, TickSummaryRow, TileSnapshotRow};

/// A sink for report rows.
///
/// The observer never propagates these errors into the tick loop; it keeps
/// the first one for [`GridOutputObserver::take_error`][crate::GridOutputObserver::take_error].
pub trait OutputWriter {
    /// Write every tile of one snapshot.
    fn write_snapshots(&mut self, rows: &[TileSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
