//! Integration tests for ma-output.

use ma_agent::{AgentBehavior, MobileAgent, MobileAgentStop, Relay, StopContext, StopRegistry};
use ma_core::{AgentId, StopId, Task};
use tempfile::TempDir;

use crate::row::{TraceKind, TraceRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn row(seq: u64, kind: TraceKind) -> TraceRow {
    TraceRow {
        seq,
        kind,
        agent_id:         7,
        source_code:      u32::MAX,
        destination_code: 20,
        mode:             "fetch",
        movement:         1,
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
struct Fetch;

impl Task for Fetch {
    fn identifier(&self) -> &'static str {
        "fetch"
    }
}

struct Counter(u32);

impl MobileAgentStop for Counter {
    fn diagnostics_type_code(&self) -> u32 {
        self.0
    }
}

/// Activate, fetch at `shelf`, finish.
struct Errand {
    shelf: StopId,
}

impl AgentBehavior for Errand {
    type Task = Fetch;

    fn activated(&mut self, ctx: &mut StopContext<'_, Fetch>) {
        ctx.go_to(self.shelf, Fetch);
    }

    fn execute(&mut self, _task: Fetch, ctx: &mut StopContext<'_, Fetch>) {
        ctx.finish();
    }
}

/// Stops with codes 10, 20, 30; returns (registry, door, shelf, exit).
fn shop() -> (StopRegistry, StopId, StopId, StopId) {
    let mut stops = StopRegistry::new();
    let door = stops.register(Counter(10));
    let shelf = stops.register(Counter(20));
    let exit = stops.register(Counter(30));
    (stops, door, shelf, exit)
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::CsvTraceWriter;
    use crate::observer::JourneyOutputObserver;
    use crate::writer::TraceWriter;

    fn read_records(dir: &TempDir) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join("journey_trace.csv")).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let _w = CsvTraceWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("journey_trace.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("output").join("goat_list");
        let _w = CsvTraceWriter::new(&nested).unwrap();
        assert!(nested.join("journey_trace.csv").exists());
    }

    #[test]
    fn csv_header_correct() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("journey_trace.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["seq", "kind", "agent_id", "source_code", "destination_code", "mode", "movement"]
        );
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_rows(&[row(0, TraceKind::Relay), row(1, TraceKind::Hello)]).unwrap();
        w.finish().unwrap();

        let rows = read_records(&dir);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "relay");
        assert_eq!(&rows[0][3], "4294967295"); // u32::MAX: no source
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "hello");
        assert_eq!(&rows[1][5], "fetch");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_rows(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        let (stops, door, shelf, exit) = shop();
        let dir = tmp();
        let mut obs = JourneyOutputObserver::new(CsvTraceWriter::new(dir.path()).unwrap());
        {
            let mut relay = Relay::new(&stops, &mut obs);
            let mut agent = MobileAgent::new(AgentId(3), Errand { shelf });
            agent.activate_at_stop(door, Some(exit), &mut relay).unwrap();
        }
        assert_eq!(obs.rows_seen(), 6);
        obs.finish().unwrap();

        let rows = read_records(&dir);
        let kinds: Vec<&str> = rows.iter().map(|r| &r[1]).collect();
        assert_eq!(kinds, ["relay", "hello", "relay", "hello", "relay", "parked"]);

        // Activation relay: no source, door, activating, normal.
        assert_eq!(&rows[0][2], "3");
        assert_eq!(&rows[0][3], "4294967295");
        assert_eq!(&rows[0][4], "10");
        assert_eq!(&rows[0][5], "activating");
        assert_eq!(&rows[0][6], "1");

        // Park relay: shelf → exit, movement 3.
        assert_eq!(&rows[4][3], "20");
        assert_eq!(&rows[4][4], "30");
        assert_eq!(&rows[4][5], "finished");
        assert_eq!(&rows[4][6], "3");

        assert_eq!(&rows[5][5], "finished");
        assert_eq!(&rows[5][6], "0");
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::observer::JourneyOutputObserver;
    use crate::writer::TraceWriter;
    use crate::{OutputError, OutputResult};

    /// Keeps rows in memory; fails every write after the first `ok_batches`.
    #[derive(Default)]
    struct MemoryWriter {
        batches:    Vec<Vec<TraceRow>>,
        ok_batches: Option<usize>,
        finishes:   usize,
    }

    impl TraceWriter for MemoryWriter {
        fn write_rows(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
            if self.ok_batches.is_some_and(|n| self.batches.len() >= n) {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.batches.push(rows.to_vec());
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    fn run_errands(obs: &mut JourneyOutputObserver<MemoryWriter>, count: u32) {
        let (stops, door, shelf, exit) = shop();
        let mut relay = Relay::new(&stops, obs);
        for n in 0..count {
            let mut agent = MobileAgent::new(AgentId(n), Errand { shelf });
            agent.activate_at_stop(door, Some(exit), &mut relay).unwrap();
        }
    }

    #[test]
    fn rows_flushed_once_per_park() {
        let mut obs = JourneyOutputObserver::new(MemoryWriter::default());
        run_errands(&mut obs, 2);
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.batches.len(), 2);
        assert!(writer.batches.iter().all(|b| b.len() == 6));
        assert_eq!(writer.batches[1][0].seq, 6);
        assert_eq!(writer.batches[1][0].agent_id, 1);
        assert_eq!(writer.batches[0][5].kind, TraceKind::Parked);
    }

    #[test]
    fn hello_row_carries_stop_as_destination() {
        let mut obs = JourneyOutputObserver::new(MemoryWriter::default());
        run_errands(&mut obs, 1);
        let writer = obs.into_writer();
        let hello = writer.batches[0][3];
        assert_eq!(hello.kind, TraceKind::Hello);
        assert_eq!(hello.source_code, u32::MAX);
        assert_eq!(hello.destination_code, 20);
        assert_eq!(hello.mode, "fetch");
    }

    #[test]
    fn first_write_error_kept() {
        let writer = MemoryWriter { ok_batches: Some(1), ..MemoryWriter::default() };
        let mut obs = JourneyOutputObserver::new(writer);
        run_errands(&mut obs, 3);

        let err = obs.take_error().expect("write error stored");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none(), "error taken only once");
    }

    #[test]
    fn finish_reports_stored_error_and_finishes_writer() {
        let writer = MemoryWriter { ok_batches: Some(0), ..MemoryWriter::default() };
        let mut obs = JourneyOutputObserver::new(writer);
        run_errands(&mut obs, 1);

        assert!(matches!(obs.finish(), Err(OutputError::Io(_))));
        assert!(obs.finish().is_ok());
        assert_eq!(obs.into_writer().finishes, 2);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::observer::JourneyOutputObserver;
    use crate::sqlite::SqliteTraceWriter;
    use crate::writer::TraceWriter;

    fn open(dir: &TempDir) -> rusqlite::Connection {
        rusqlite::Connection::open(dir.path().join("journey_trace.db")).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteTraceWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("journey_trace.db").exists());
    }

    #[test]
    fn sqlite_row_count() {
        let dir = tmp();
        let mut w = SqliteTraceWriter::new(dir.path()).unwrap();
        w.write_rows(&[row(0, TraceKind::Relay), row(1, TraceKind::Hello), row(2, TraceKind::Parked)])
            .unwrap();
        w.finish().unwrap();

        let count: i64 = open(&dir)
            .query_row("SELECT COUNT(*) FROM journey_trace", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_missing_stop_stored() {
        let dir = tmp();
        let mut w = SqliteTraceWriter::new(dir.path()).unwrap();
        w.write_rows(&[row(0, TraceKind::Relay)]).unwrap();
        w.finish().unwrap();

        // SQLite INTEGER is signed 64-bit; u32::MAX fits without loss.
        let (kind, source): (String, i64) = open(&dir)
            .query_row("SELECT kind, source_code FROM journey_trace WHERE seq = 0", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(kind, "relay");
        assert_eq!(source, u32::MAX as i64);
    }

    #[test]
    fn integration_sqlite() {
        let (stops, door, shelf, exit) = shop();
        let dir = tmp();
        let mut obs = JourneyOutputObserver::new(SqliteTraceWriter::new(dir.path()).unwrap());
        {
            let mut relay = Relay::new(&stops, &mut obs);
            let mut agent = MobileAgent::new(AgentId(0), Errand { shelf });
            agent.activate_at_stop(door, Some(exit), &mut relay).unwrap();
        }
        obs.finish().unwrap();

        let parked: i64 = open(&dir)
            .query_row("SELECT COUNT(*) FROM journey_trace WHERE kind = 'parked'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(parked, 1);
        let movement: i64 = open(&dir)
            .query_row("SELECT movement FROM journey_trace WHERE seq = 4", [], |r| r.get(0))
            .unwrap();
        assert_eq!(movement, 3);
    }
}
