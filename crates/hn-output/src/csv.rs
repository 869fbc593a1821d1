//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `energy_samples.csv`
//! - `attachments.csv`
//! - `diagnostics.csv`

use std::fs::File;
use std::io;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AttachmentRow, DiagnosticRow, EnergySampleRow, OutputResult};

/// Writes run output to three CSV streams, normally files.
pub struct CsvWriter<F: io::Write = File> {
    samples:     Writer<F>,
    attachments: Writer<F>,
    diagnostics: Writer<F>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Self::from_writers(
            File::create(dir.join("energy_samples.csv"))?,
            File::create(dir.join("attachments.csv"))?,
            File::create(dir.join("diagnostics.csv"))?,
        )
    }
}

impl<F: io::Write> CsvWriter<F> {
    /// Write the header rows to three arbitrary sinks.
    pub fn from_writers(samples: F, attachments: F, diagnostics: F) -> OutputResult<Self> {
        let mut samples = Writer::from_writer(samples);
        samples.write_record(["terminal_id", "interval", "processing_energy", "migration_energy"])?;

        let mut attachments = Writer::from_writer(attachments);
        attachments.write_record(["interval", "terminal_id", "rat", "cell_id", "distance_m"])?;

        let mut diagnostics = Writer::from_writer(diagnostics);
        diagnostics.write_record(["kind", "terminal_id", "interval", "detail"])?;

        Ok(Self { samples, attachments, diagnostics, finished: false })
    }
}

impl<F: io::Write> OutputWriter for CsvWriter<F> {
    fn write_samples(&mut self, rows: &[EnergySampleRow]) -> OutputResult<()> {
        for row in rows {
            self.samples.write_record(&[
                row.terminal_id.to_string(),
                row.interval.to_string(),
                row.processing_energy.to_string(),
                row.migration_energy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_attachments(&mut self, rows: &[AttachmentRow]) -> OutputResult<()> {
        for row in rows {
            self.attachments.write_record(&[
                row.interval.to_string(),
                row.terminal_id.to_string(),
                row.rat.to_string(),
                row.cell_id.to_string(),
                row.distance_m.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_diagnostic(&mut self, row: &DiagnosticRow) -> OutputResult<()> {
        self.diagnostics.write_record(&[
            row.kind.to_string(),
            row.terminal_id.to_string(),
            row.interval.map(|k| k.to_string()).unwrap_or_default(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.samples.flush()?;
        self.attachments.flush()?;
        self.diagnostics.flush()?;
        self.finished = true;
        Ok(())
    }
}
