//! CSV output backend.
//!
//! Creates `journey_trace.csv` in the configured output directory.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, TraceRow};

pub(crate) const HEADER: [&str; 7] =
    ["seq", "kind", "agent_id", "source_code", "destination_code", "mode", "movement"];

/// Writes a journey trace to a single CSV file.
pub struct CsvTraceWriter {
    rows:     Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open `journey_trace.csv` in it, and write the
    /// header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let mut rows = Writer::from_path(dir.join("journey_trace.csv"))?;
        rows.write_record(HEADER)?;
        Ok(Self { rows, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_rows(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        for row in rows {
            self.rows.write_record(&[
                row.seq.to_string(),
                row.kind.as_str().to_owned(),
                row.agent_id.to_string(),
                row.source_code.to_string(),
                row.destination_code.to_string(),
                row.mode.to_owned(),
                row.movement.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
