//! The `TraceWriter` trait implemented by all backend writers.

use crate::{OutputResult, TraceRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`JourneyOutputObserver::take_error`][crate::JourneyOutputObserver::take_error].
pub trait TraceWriter {
    /// Append a batch of rows.
    fn write_rows(&mut self, rows: &[TraceRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
