//! `hn-output`: run output writers for the hetnet-energy workspace.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                 |
//! |-----------|---------|---------------------------------------------------------------|
//! | *(none)*  | CSV     | `energy_samples.csv`, `attachments.csv`, `diagnostics.csv`    |
//! | `sqlite`  | SQLite  | `output.db`                                                   |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `hn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AttachmentRow, DiagnosticRow, EnergySampleRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
