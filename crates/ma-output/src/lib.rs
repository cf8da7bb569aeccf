//! `ma-output` — offline journey trace writers for the rust_ma framework.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created        |
//! |-----------|---------|----------------------|
//! | *(none)*  | CSV     | `journey_trace.csv`  |
//! | `sqlite`  | SQLite  | `journey_trace.db`   |
//!
//! Both backends implement [`TraceWriter`] and are driven by
//! [`JourneyOutputObserver`], which implements `ma_agent::RelayObserver`.
//!
//! # Columns
//!
//! | Column             | Meaning                                            |
//! |--------------------|----------------------------------------------------|
//! | `seq`              | event order, from 0                                |
//! | `kind`             | `relay`, `hello`, or `parked`                      |
//! | `agent_id`         | `AgentId`                                          |
//! | `source_code`      | diagnostics code of the stop left (`u32::MAX` = none) |
//! | `destination_code` | diagnostics code of the stop reached (`u32::MAX` = none) |
//! | `mode`             | mode identifier                                    |
//! | `movement`         | `MovementType` raw value (0–3)                     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ma_output::{CsvTraceWriter, JourneyOutputObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./output"))?;
//! let mut obs = JourneyOutputObserver::new(writer);
//! let mut relay = Relay::new(&stops, &mut obs);
//! agent.activate_at_stop(first, Some(last), &mut relay)?;
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::JourneyOutputObserver;
pub use row::{TraceKind, TraceRow};
pub use writer::TraceWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteTraceWriter;
