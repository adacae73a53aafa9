//! Integration tests for rg-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_FILE, SUMMARY_FILE};
    use crate::row::{TickSummaryRow, TileSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(x: i32, tick: u64) -> TileSnapshotRow {
        TileSnapshotRow {
            tick,
            x,
            z:        0,
            walkable: true,
            entrance: x == 0,
            exit:     false,
            claimed:  false,
            conflict: false,
            claims:   0,
        }
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join(SNAPSHOT_FILE)),
            ["tick", "x", "z", "walkable", "entrance", "exit", "claimed", "conflict", "claims"]
        );
        assert_eq!(
            headers(&dir.path().join(SUMMARY_FILE)),
            ["tick", "active_agents", "claimed_tiles", "conflicts", "expired_claims"]
        );
    }

    #[test]
    fn csv_snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5"); // tick
        assert_eq!(&rows[0][4], "1"); // entrance
        assert_eq!(&rows[1][1], "1"); // x
        assert_eq!(&rows[1][4], "0");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow { tick: 3, active_agents: 2, claimed_tiles: 4, conflicts: 0, expired_claims: 1 };
        w.write_tick_summary(&row).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "2", "4", "0", "1"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use rg_core::{GridConfig, GridCoord, TileId};
    use rg_sim::GridSim;
    use rg_tile::TileGridBuilder;

    use crate::{
        CsvWriter, GridOutputObserver, OutputError, OutputResult, OutputWriter, TickSummaryRow,
        TileSnapshotRow,
    };

    fn config(total_ticks: u64, interval: u64) -> GridConfig {
        GridConfig {
            width: 3,
            depth: 1,
            total_ticks,
            snapshot_interval_ticks: interval,
            ..GridConfig::default()
        }
    }

    fn sim(total_ticks: u64, interval: u64) -> GridSim {
        let cfg = config(total_ticks, interval);
        let grid = TileGridBuilder::new(&cfg).entrance(GridCoord::new(0, 0)).build().unwrap();
        GridSim::new(cfg, grid)
    }

    /// Collects rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        snapshots: Vec<TileSnapshotRow>,
        summaries: Vec<TickSummaryRow>,
        finished:  usize,
    }

    impl OutputWriter for MemoryWriter {
        fn write_snapshots(&mut self, rows: &[TileSnapshotRow]) -> OutputResult<()> {
            self.snapshots.extend_from_slice(rows);
            Ok(())
        }
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every summary write.
    struct BrokenWriter;

    impl OutputWriter for BrokenWriter {
        fn write_snapshots(&mut self, _rows: &[TileSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn records_snapshots_and_summaries() {
        let mut sim = sim(4, 2);
        sim.dispatch(&[TileId(0), TileId(1), TileId(2)], 0, 0).unwrap();

        let mut obs = GridOutputObserver::new(MemoryWriter::default());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());
        let w = obs.into_writer();

        // Snapshot ticks 0 and 2, three tiles each.
        assert_eq!(w.snapshots.len(), 6);
        assert_eq!(w.summaries.len(), 4);
        assert_eq!(w.finished, 1);

        let first = &w.snapshots[..3];
        assert!(first[0].entrance);
        assert!(!first[0].claimed);
        assert!(first[1].claimed);
        assert_eq!(first[2].claims, 1);
        assert!(!first[2].claimed);

        assert_eq!(w.summaries[0].active_agents, 1);
        assert_eq!(w.summaries[0].claimed_tiles, 1);
        assert_eq!(w.summaries[0].expired_claims, 1);
        assert_eq!(w.summaries[3].tick, 3);
    }

    #[test]
    fn first_write_error_is_kept() {
        let mut sim = sim(3, 1);
        let mut obs = GridOutputObserver::new(BrokenWriter);
        sim.run(&mut obs);

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn end_to_end_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim(2, 1);

        let mut obs = GridOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join(crate::csv::SNAPSHOT_FILE)).unwrap();
        assert_eq!(rdr.records().count(), 6);
        let mut rdr = csv::Reader::from_path(dir.path().join(crate::csv::SUMMARY_FILE)).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }
}
