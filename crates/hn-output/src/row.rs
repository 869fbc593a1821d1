//! Plain data row types written by output backends.

use hn_attach::AttachmentRecord;
use hn_core::IntervalIndex;
use hn_energy::EnergySample;
use hn_sim::Diagnostic;

/// One energy sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySampleRow {
    pub terminal_id:       u32,
    pub interval:          u32,
    pub processing_energy: f64,
    pub migration_energy:  f64,
}

impl From<&EnergySample> for EnergySampleRow {
    fn from(s: &EnergySample) -> Self {
        Self {
            terminal_id:       s.terminal.0,
            interval:          s.interval.0,
            processing_energy: s.processing_energy,
            migration_energy:  s.migration_energy,
        }
    }
}

/// One attachment record, tagged with the interval at which it was decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentRow {
    pub interval:    u32,
    pub terminal_id: u32,
    /// `"lte"` or `"mmwave"`.
    pub rat:         &'static str,
    pub cell_id:     u32,
    pub distance_m:  f64,
}

impl AttachmentRow {
    pub fn new(interval: IntervalIndex, record: &AttachmentRecord) -> Self {
        Self {
            interval:    interval.0,
            terminal_id: record.terminal.0,
            rat:         record.rat.as_str(),
            cell_id:     record.cell.0,
            distance_m:  record.distance_m,
        }
    }
}

/// One recoverable problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRow {
    pub kind:        &'static str,
    pub terminal_id: u32,
    /// `None` for problems not tied to an interval (attachment).
    pub interval:    Option<u32>,
    pub detail:      String,
}

impl From<&Diagnostic> for DiagnosticRow {
    fn from(d: &Diagnostic) -> Self {
        let (interval, detail) = match d {
            Diagnostic::Unattached { rat, .. } => (None, format!("no {rat} cells")),
            Diagnostic::SkippedTerminal { interval, reason, .. } => (Some(interval.0), reason.clone()),
        };
        Self { kind: d.kind(), terminal_id: d.terminal().0, interval, detail }
    }
}
