//! The `Sim` struct and its phase machine.

use std::fmt;

use tracing::{debug, info, warn};

use hn_attach::{attach_closest, AttachmentTable, CellTopology};
use hn_core::{AccountingClock, CapabilitySet, IntervalIndex, MigrationPolicy, NodeId, Rat, ScenarioConfig, SimTime};
use hn_energy::{EnergyError, EnergyModel, EnergySample, WorkloadModel};
use hn_mobility::{MobilityEngine, MobilityModel, PositionAllocator};
use hn_registry::{NodeKind, NodeRegistry};

use crate::{Diagnostic, Diagnostics, EventQueue, Scheduler, SimError, SimEvent, SimObserver, SimResult};

// ── SimPhase ──────────────────────────────────────────────────────────────────

/// Where the driver is in its lifecycle.  Phases only move forward:
///
/// ```text
/// Provisioning → Attaching → Accounting(0) → … → Accounting(k) → Finished
/// ```
///
/// A fatal error moves the driver to `Failed` from whichever phase it was
/// in.  `Finished` and `Failed` are terminal; a re-run needs a fresh `Sim`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimPhase {
    Provisioning,
    Attaching,
    /// Interval `k` is being (or is next to be) accounted.
    Accounting(IntervalIndex),
    Finished,
    /// A fatal error aborted the run.
    Failed,
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimPhase::Provisioning => f.write_str("provisioning"),
            SimPhase::Attaching => f.write_str("attaching"),
            SimPhase::Accounting(k) => write!(f, "accounting({})", k.0),
            SimPhase::Finished => f.write_str("finished"),
            SimPhase::Failed => f.write_str("failed"),
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The attachment-and-energy-accounting driver.
///
/// `Sim<W, M, S>` owns every piece of run state.  A run goes through:
///
/// 1. **Provisioning**: create terminals, then mmWave cells, then LTE cells,
///    placing each through its position allocator; build the cell topology.
/// 2. **Attaching**: closest-cell attachment for every terminal; schedule one
///    [`SimEvent::IntervalBoundary`] per interval at `k * T` and the stop
///    time.
/// 3. **Accounting(k)**, once per boundary the scheduler releases:
///    - `k > 0`: advance terminals by `T`, then re-attach if configured;
///    - evaluate every terminal once and record its [`EnergySample`].
/// 4. **Finished**: the scheduler is destroyed; samples and diagnostics stay
///    readable.
///
/// A fatal error in any phase leaves the driver [`SimPhase::Failed`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W: WorkloadModel, M: MobilityModel, S: Scheduler<SimEvent> = EventQueue<SimEvent>> {
    pub(crate) config:      ScenarioConfig,
    pub(crate) phase:       SimPhase,
    pub(crate) clock:       AccountingClock,
    pub(crate) energy:      EnergyModel,
    pub(crate) workload:    W,
    pub(crate) mobility:    MobilityEngine<M>,
    pub(crate) scheduler:   S,
    pub(crate) registry:    NodeRegistry,
    pub(crate) topology:    CellTopology,
    /// Terminal ids, ascending.
    pub(crate) terminals:   Vec<NodeId>,
    pub(crate) attachments: AttachmentTable,
    /// Attachments as they stood when the previous interval was evaluated.
    pub(crate) previous:    AttachmentTable,
    pub(crate) samples:     Vec<EnergySample>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) intervals_run: u32,
    pub(crate) terminal_positions: Option<Box<dyn PositionAllocator>>,
    pub(crate) cell_positions:     Option<Box<dyn PositionAllocator>>,
}

impl<W: WorkloadModel, M: MobilityModel, S: Scheduler<SimEvent>> Sim<W, M, S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Drive the run from the current phase to [`SimPhase::Finished`].
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidPhase`] if the run already finished or failed;
    /// otherwise the first fatal error, after which the phase is
    /// [`SimPhase::Failed`].  Recoverable problems go to
    /// [`diagnostics`](Self::diagnostics) instead.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if matches!(self.phase, SimPhase::Finished | SimPhase::Failed) {
            return Err(SimError::InvalidPhase { operation: "run", phase: self.phase });
        }
        let result = self.drive(observer);
        self.fail_on_err(result)
    }

    /// Create and place every node, then build the cell topology.
    ///
    /// Terminals are created first, so terminal ids are `0..terminal_count`.
    ///
    /// # Errors
    ///
    /// [`SimError::Registry`] (`CapacityExceeded`) or [`SimError::Mobility`]
    /// abort provisioning and leave the driver [`SimPhase::Failed`]; nothing
    /// is attached or accounted afterwards.
    pub fn provision<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.expect_phase(SimPhase::Provisioning, "provision")?;
        let result = self.provision_nodes(observer);
        self.fail_on_err(result)
    }

    /// Initial closest-cell attachment, then schedule the interval
    /// boundaries and the stop time.
    pub fn attach<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.expect_phase(SimPhase::Attaching, "attach")?;
        let result = self.attach_terminals(observer);
        self.fail_on_err(result)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn topology(&self) -> &CellTopology {
        &self.topology
    }

    /// Terminal ids, ascending.
    pub fn terminals(&self) -> &[NodeId] {
        &self.terminals
    }

    /// The current attachment table.
    pub fn attachments(&self) -> &AttachmentTable {
        &self.attachments
    }

    /// Every sample recorded so far, in interval then terminal order.
    pub fn samples(&self) -> &[EnergySample] {
        &self.samples
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn clock(&self) -> &AccountingClock {
        &self.clock
    }

    /// Intervals begun so far.
    pub fn intervals_run(&self) -> u32 {
        self.intervals_run
    }

    // ── Phase bodies ──────────────────────────────────────────────────────

    fn drive<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.phase == SimPhase::Provisioning {
            self.provision_nodes(observer)?;
        }
        if self.phase == SimPhase::Attaching {
            self.attach_terminals(observer)?;
        }

        while let Some((at, event)) = self.scheduler.next_event() {
            match event {
                SimEvent::IntervalBoundary(k) => self.account_interval(k, at, observer)?,
            }
        }

        self.scheduler.destroy();
        self.phase = SimPhase::Finished;
        info!(
            intervals = self.intervals_run,
            samples = self.samples.len(),
            diagnostics = self.diagnostics.len(),
            "run finished"
        );
        observer.on_sim_end(self.intervals_run);
        Ok(())
    }

    fn provision_nodes<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let topo = &self.config.topology;

        let mut terminal_alloc = self.terminal_positions.take();
        let mut cell_alloc = self.cell_positions.take();

        for _ in 0..topo.terminal_count() {
            let id = self.registry.create_node(NodeKind::Terminal, topo.terminal_capabilities)?;
            if let Some(alloc) = terminal_alloc.as_mut() {
                self.registry.set_position(id, alloc.allocate()?)?;
            }
            self.terminals.push(id);
        }
        for (rat, count) in [(Rat::MmWave, topo.mmwave_cells), (Rat::Lte, topo.lte_cells)] {
            for _ in 0..count {
                let id = self.registry.create_node(NodeKind::Cell, CapabilitySet::single(rat))?;
                if let Some(alloc) = cell_alloc.as_mut() {
                    self.registry.set_position(id, alloc.allocate()?)?;
                }
            }
        }

        self.topology = CellTopology::from_registry(&self.registry)?;
        self.mobility.ensure_nodes(self.registry.len());
        debug!(
            terminals = self.terminals.len(),
            cells = self.topology.len(),
            "provisioned"
        );
        observer.on_provisioned(&self.registry, &self.topology);
        self.phase = SimPhase::Attaching;
        Ok(())
    }

    fn attach_terminals<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.attachments = attach_closest(&self.registry, self.terminals.iter().copied(), &self.topology)?;
        for u in self.attachments.unattached() {
            let d = Diagnostic::Unattached { terminal: u.terminal, rat: u.rat };
            observer.on_diagnostic(&d);
            self.diagnostics.push(d);
        }
        debug!(
            records = self.attachments.len(),
            unattached = self.attachments.unattached().len(),
            "attached"
        );
        observer.on_attached(IntervalIndex(0), &self.attachments);
        self.previous = self.attachments.clone();

        for k in 0..self.config.run.intervals {
            let k = IntervalIndex(k);
            self.scheduler.schedule_at(self.clock.boundary(k), SimEvent::IntervalBoundary(k));
        }
        self.scheduler.stop(SimTime::from_secs_f64(self.config.run.stop_time_secs));

        self.phase = SimPhase::Accounting(IntervalIndex(0));
        Ok(())
    }

    // ── Interval processing ───────────────────────────────────────────────

    fn account_interval<O: SimObserver>(&mut self, k: IntervalIndex, at: SimTime, observer: &mut O) -> SimResult<()> {
        self.phase = SimPhase::Accounting(k);
        self.clock.current = k;
        observer.on_interval_start(k, at);

        if k.0 > 0 {
            self.mobility.advance(&mut self.registry, self.config.energy.interval_secs);
            if self.config.run.reattach_each_interval {
                self.attachments =
                    attach_closest(&self.registry, self.terminals.iter().copied(), &self.topology)?;
                observer.on_attached(k, &self.attachments);
            }
        }

        let results = self.evaluate_all(k);

        let first = self.samples.len();
        for (terminal, result) in results {
            match result {
                Ok(sample) => self.samples.push(sample),
                Err(e) => {
                    warn!(%terminal, interval = k.0, error = %e, "terminal skipped");
                    let d = Diagnostic::SkippedTerminal { terminal, interval: k, reason: e.to_string() };
                    observer.on_diagnostic(&d);
                    self.diagnostics.push(d);
                }
            }
        }
        debug!(interval = k.0, samples = self.samples.len() - first, "interval accounted");
        observer.on_interval_end(k, &self.samples[first..]);

        if self.config.run.migration_policy == MigrationPolicy::OnHandover {
            self.previous = self.attachments.clone();
        }
        self.intervals_run += 1;
        Ok(())
    }

    /// One result per terminal, ascending terminal id.
    fn evaluate_all(&self, k: IntervalIndex) -> Vec<(NodeId, Result<EnergySample, EnergyError>)> {
        let ctx = EvalContext {
            energy:      &self.energy,
            workload:    &self.workload,
            attachments: &self.attachments,
            previous:    &self.previous,
            policy:      self.config.run.migration_policy,
        };

        #[cfg(not(feature = "parallel"))]
        {
            self.terminals.iter().map(|&t| (t, ctx.evaluate(t, k))).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Indexed collect keeps the input order.
            self.terminals.par_iter().map(|&t| (t, ctx.evaluate(t, k))).collect()
        }
    }

    fn fail_on_err(&mut self, result: SimResult<()>) -> SimResult<()> {
        if let Err(e) = &result {
            warn!(phase = %self.phase, error = %e, "run aborted");
            self.phase = SimPhase::Failed;
        }
        result
    }

    fn expect_phase(&self, expected: SimPhase, operation: &'static str) -> SimResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SimError::InvalidPhase { operation, phase: self.phase })
        }
    }
}

// ── Per-terminal evaluation ───────────────────────────────────────────────────

/// Read-only inputs shared by every terminal's evaluation.
struct EvalContext<'a, W: WorkloadModel> {
    energy:      &'a EnergyModel,
    workload:    &'a W,
    attachments: &'a AttachmentTable,
    previous:    &'a AttachmentTable,
    policy:      MigrationPolicy,
}

impl<W: WorkloadModel> EvalContext<'_, W> {
    fn evaluate(&self, terminal: NodeId, k: IntervalIndex) -> Result<EnergySample, EnergyError> {
        let workload = self.workload.workload(terminal, k);
        let (processing, migration) = self.energy.evaluate(&workload)?;

        let charged = if !self.attachments.is_attached(terminal) {
            // No serving cell on any RAT: nothing to migrate to.
            false
        } else {
            match self.policy {
                MigrationPolicy::EveryInterval => true,
                MigrationPolicy::OnHandover => {
                    k.0 > 0 && self.attachments.serving_changed(self.previous, terminal)
                }
            }
        };

        Ok(EnergySample {
            terminal,
            interval: k,
            processing_energy: processing,
            migration_energy: if charged { migration } else { 0.0 },
        })
    }
}
