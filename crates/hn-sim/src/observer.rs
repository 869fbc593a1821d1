//! Simulation observer trait for progress reporting and data collection.

use hn_attach::{AttachmentTable, CellTopology};
use hn_core::{IntervalIndex, SimTime};
use hn_energy::EnergySample;
use hn_registry::NodeRegistry;

use crate::Diagnostic;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points of the
/// run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: report printer
///
/// ```rust,ignore
/// struct Report;
///
/// impl SimObserver for Report {
///     fn on_interval_end(&mut self, _k: IntervalIndex, samples: &[EnergySample]) {
///         for s in samples {
///             println!("{s}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once after every node has been created and placed.
    fn on_provisioned(&mut self, _registry: &NodeRegistry, _topology: &CellTopology) {}

    /// Called after the initial attachment (`interval` 0) and after every
    /// re-attachment.
    fn on_attached(&mut self, _interval: IntervalIndex, _table: &AttachmentTable) {}

    /// Called at each interval boundary before any work for that interval.
    fn on_interval_start(&mut self, _interval: IntervalIndex, _at: SimTime) {}

    /// Called with the samples recorded for `interval`, ascending terminal id.
    fn on_interval_end(&mut self, _interval: IntervalIndex, _samples: &[EnergySample]) {}

    /// Called once per recoverable problem, as it is raised.
    fn on_diagnostic(&mut self, _diagnostic: &Diagnostic) {}

    /// Called once after the last interval.  `intervals_run` counts the
    /// intervals actually begun before the stop time.
    fn on_sim_end(&mut self, _intervals_run: u32) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
