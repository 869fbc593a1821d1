//! Per-terminal, per-interval workload inputs.

use std::collections::HashMap;

use hn_core::{IntervalIndex, NodeId};

/// Inputs to the energy model for one terminal in one interval.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workload {
    /// Normalized processing load in `[0, 1]`.
    pub processing_load: f64,
    /// Processing capacity.  Must be `> 0` for the interval to be accounted.
    pub capacity: f64,
    /// Data to migrate if the terminal changes serving cell.
    pub data_volume: f64,
}

impl Default for Workload {
    fn default() -> Self {
        Self { processing_load: 0.8, capacity: 1.0, data_volume: 10.0 }
    }
}

/// Source of workloads.  Called once per terminal per interval, possibly
/// from several threads when the driver evaluates in parallel.
pub trait WorkloadModel: Send + Sync {
    fn workload(&self, terminal: NodeId, interval: IntervalIndex) -> Workload;
}

/// The same workload for every terminal and interval.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FixedWorkload(pub Workload);

impl WorkloadModel for FixedWorkload {
    #[inline]
    fn workload(&self, _terminal: NodeId, _interval: IntervalIndex) -> Workload {
        self.0
    }
}

/// Workloads looked up from explicit overrides.
///
/// Resolution order: the `(terminal, interval)` override, then the
/// terminal-wide override, then `default`.
#[derive(Clone, Debug, Default)]
pub struct TableWorkload {
    default:      Workload,
    per_terminal: HashMap<NodeId, Workload>,
    per_interval: HashMap<(NodeId, IntervalIndex), Workload>,
}

impl TableWorkload {
    pub fn new(default: Workload) -> Self {
        Self { default, ..Self::default() }
    }

    /// Override `terminal` for every interval.
    pub fn set_terminal(&mut self, terminal: NodeId, workload: Workload) {
        self.per_terminal.insert(terminal, workload);
    }

    /// Override `terminal` for `interval` only.
    pub fn set_interval(&mut self, terminal: NodeId, interval: IntervalIndex, workload: Workload) {
        self.per_interval.insert((terminal, interval), workload);
    }

    pub fn default_workload(&self) -> Workload {
        self.default
    }

    /// Number of overrides of either kind.
    pub fn len(&self) -> usize {
        self.per_terminal.len() + self.per_interval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorkloadModel for TableWorkload {
    fn workload(&self, terminal: NodeId, interval: IntervalIndex) -> Workload {
        self.per_interval
            .get(&(terminal, interval))
            .or_else(|| self.per_terminal.get(&terminal))
            .copied()
            .unwrap_or(self.default)
    }
}
