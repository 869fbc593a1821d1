//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AttachmentRow, DiagnosticRow, EnergySampleRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the observer, which stores the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the samples of one interval.
    fn write_samples(&mut self, rows: &[EnergySampleRow]) -> OutputResult<()>;

    /// Write one attachment table (initial or re-attachment).
    fn write_attachments(&mut self, rows: &[AttachmentRow]) -> OutputResult<()>;

    fn write_diagnostic(&mut self, row: &DiagnosticRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
