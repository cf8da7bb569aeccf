//! `JourneyOutputObserver<W>` — bridges `RelayObserver` to a `TraceWriter`.

use ma_agent::{HelloEvent, ParkEvent, RelayEvent, RelayObserver};
use ma_core::MovementType;

use crate::row::{TraceKind, TraceRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

const NO_STOP: u32 = u32::MAX;

/// A [`RelayObserver`] that writes every relay, hello, and park event to any
/// [`TraceWriter`] backend.
///
/// Rows are buffered and handed to the writer in one batch each time an
/// agent parks, and on [`finish`][Self::finish].
///
/// Errors from the writer are stored internally because `RelayObserver`
/// methods have no return value.  After the journeys are done, check for
/// errors with [`take_error`][Self::take_error].
pub struct JourneyOutputObserver<W: TraceWriter> {
    writer:     W,
    pending:    Vec<TraceRow>,
    next_seq:   u64,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> JourneyOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), next_seq: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of events observed so far.
    pub fn rows_seen(&self) -> u64 {
        self.next_seq
    }

    /// Write any buffered rows and finish the writer.
    ///
    /// Returns the first error seen, including ones stored earlier.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush();
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    ///
    /// Buffered rows that were never flushed are dropped.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn push(
        &mut self,
        kind:        TraceKind,
        agent_id:    u32,
        source:      Option<u32>,
        destination: Option<u32>,
        mode:        &'static str,
        movement:    MovementType,
    ) {
        self.pending.push(TraceRow {
            seq:              self.next_seq,
            kind,
            agent_id,
            source_code:      source.unwrap_or(NO_STOP),
            destination_code: destination.unwrap_or(NO_STOP),
            mode,
            movement:         movement.raw_value(),
        });
        self.next_seq += 1;
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_rows(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> RelayObserver for JourneyOutputObserver<W> {
    fn on_relay(&mut self, e: &RelayEvent) {
        self.push(TraceKind::Relay, e.agent.0, e.source_code, e.destination_code, e.mode, e.movement);
    }

    fn on_hello(&mut self, e: &HelloEvent) {
        self.push(TraceKind::Hello, e.agent.0, None, e.stop_code, e.mode, e.movement);
    }

    fn on_parked(&mut self, e: &ParkEvent) {
        self.push(TraceKind::Parked, e.agent.0, None, None, e.mode, MovementType::Unset);
        self.flush();
    }
}
