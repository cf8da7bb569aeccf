//! SQLite output backend (feature `sqlite`).
//!
//! Creates `journey_trace.db` in the configured output directory with a
//! single `journey_trace` table.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::TraceWriter;
use crate::{OutputResult, TraceRow};

/// Writes a journey trace to an SQLite database.
pub struct SqliteTraceWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteTraceWriter {
    /// Open (or create) `journey_trace.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("journey_trace.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS journey_trace (
                 seq              INTEGER NOT NULL,
                 kind             TEXT    NOT NULL,
                 agent_id         INTEGER NOT NULL,
                 source_code      INTEGER NOT NULL,
                 destination_code INTEGER NOT NULL,
                 mode             TEXT    NOT NULL,
                 movement         INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl TraceWriter for SqliteTraceWriter {
    fn write_rows(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO journey_trace \
                 (seq, kind, agent_id, source_code, destination_code, mode, movement) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq as i64,
                    row.kind.as_str(),
                    row.agent_id,
                    row.source_code,
                    row.destination_code,
                    row.mode,
                    row.movement,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
