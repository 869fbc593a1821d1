//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use hn_attach::AttachmentTable;
use hn_core::IntervalIndex;
use hn_energy::EnergySample;
use hn_sim::{Diagnostic, SimObserver};

use crate::row::{AttachmentRow, DiagnosticRow, EnergySampleRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes samples, attachment tables and diagnostics
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
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

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_attached(&mut self, interval: IntervalIndex, table: &AttachmentTable) {
        let rows: Vec<AttachmentRow> = table.records().map(|r| AttachmentRow::new(interval, r)).collect();
        let result = self.writer.write_attachments(&rows);
        self.store_err(result);
    }

    fn on_interval_end(&mut self, _interval: IntervalIndex, samples: &[EnergySample]) {
        let rows: Vec<EnergySampleRow> = samples.iter().map(EnergySampleRow::from).collect();
        let result = self.writer.write_samples(&rows);
        self.store_err(result);
    }

    fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        let result = self.writer.write_diagnostic(&DiagnosticRow::from(diagnostic));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _intervals_run: u32) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
