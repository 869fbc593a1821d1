//! CSV workload loader.
//!
//! # CSV format
//!
//! ```csv
//! terminal_id,interval,processing_load,capacity,data_volume
//! 0,,0.5,1.0,10
//! 3,2,0.9,0.0,4
//! ```
//!
//! An empty `interval` applies the row to every interval of that terminal.
//! Terminals absent from the file use the default workload.  A capacity of
//! zero is accepted here; the driver reports it when the interval is
//! evaluated.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use hn_core::{IntervalIndex, NodeId};

use crate::{EnergyError, EnergyResult, TableWorkload, Workload};

#[derive(Deserialize)]
struct WorkloadRecord {
    terminal_id:     u32,
    interval:        Option<u32>,
    processing_load: f64,
    capacity:        f64,
    data_volume:     f64,
}

/// Load a [`TableWorkload`] from a CSV file.
pub fn load_workloads_csv(path: &Path, default: Workload) -> EnergyResult<TableWorkload> {
    let file = std::fs::File::open(path)?;
    load_workloads_reader(file, default)
}

/// Like [`load_workloads_csv`] but accepts any `Read` source.
pub fn load_workloads_reader<R: Read>(reader: R, default: Workload) -> EnergyResult<TableWorkload> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = TableWorkload::new(default);

    for (line, result) in csv_reader.deserialize::<WorkloadRecord>().enumerate() {
        let row = result.map_err(|e| EnergyError::Parse(e.to_string()))?;
        // +2: header line, 1-based numbering.
        let line = line + 2;
        if !(0.0..=1.0).contains(&row.processing_load) {
            return Err(EnergyError::Parse(format!(
                "line {line}: processing_load {} outside [0, 1]",
                row.processing_load
            )));
        }
        if !row.data_volume.is_finite() || row.data_volume < 0.0 {
            return Err(EnergyError::Parse(format!(
                "line {line}: data_volume {} must be finite and >= 0",
                row.data_volume
            )));
        }
        let workload = Workload {
            processing_load: row.processing_load,
            capacity:        row.capacity,
            data_volume:     row.data_volume,
        };
        let terminal = NodeId(row.terminal_id);
        match row.interval {
            Some(k) => table.set_interval(terminal, IntervalIndex(k), workload),
            None => table.set_terminal(terminal, workload),
        }
    }

    debug!(overrides = table.len(), "workloads loaded");
    Ok(table)
}
