//! Fluent builder for constructing a [`Sim`].

use hn_attach::{AttachmentTable, CellTopologyBuilder};
use hn_core::{AccountingClock, ScenarioConfig, SimRng};
use hn_energy::{EnergyModel, WorkloadModel};
use hn_mobility::{MobilityEngine, MobilityModel, PositionAllocator, RandomRectangle};
use hn_registry::NodeRegistry;

use crate::{Diagnostics, EventQueue, Scheduler, Sim, SimEvent, SimPhase, SimResult};

/// Fluent builder for [`Sim<W, M, S>`].
///
/// # Required inputs
///
/// - [`ScenarioConfig`]: topology, energy tunables, run control
/// - `W: WorkloadModel`: per-terminal workloads (e.g. [`hn_energy::FixedWorkload`])
/// - `M: MobilityModel`: terminal movement (e.g. [`hn_mobility::RandomWalk2d`])
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                                      |
/// |----------------------------|----------------------------------------------|
/// | `.scheduler(s)`            | `EventQueue::new()`                          |
/// | `.terminal_positions(a)`   | `RandomRectangle` over the area, seeded      |
/// | `.cell_positions(a)`       | `RandomRectangle` over the area, seeded      |
///
/// # Example
///
/// ```rust,ignore
/// let walk = RandomWalk2d::from_config(config.topology.area, &config.run);
/// let mut sim = SimBuilder::new(config, FixedWorkload::default(), walk).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<W: WorkloadModel, M: MobilityModel, S: Scheduler<SimEvent> = EventQueue<SimEvent>> {
    config:             ScenarioConfig,
    workload:           W,
    mobility:           M,
    scheduler:          S,
    terminal_positions: Option<Box<dyn PositionAllocator>>,
    cell_positions:     Option<Box<dyn PositionAllocator>>,
}

impl<W: WorkloadModel, M: MobilityModel> SimBuilder<W, M> {
    /// Create a builder with all required inputs and the default scheduler.
    pub fn new(config: ScenarioConfig, workload: W, mobility: M) -> Self {
        Self {
            config,
            workload,
            mobility,
            scheduler: EventQueue::new(),
            terminal_positions: None,
            cell_positions: None,
        }
    }
}

impl<W: WorkloadModel, M: MobilityModel, S: Scheduler<SimEvent>> SimBuilder<W, M, S> {
    /// Replace the scheduler.
    pub fn scheduler<S2: Scheduler<SimEvent>>(self, scheduler: S2) -> SimBuilder<W, M, S2> {
        SimBuilder {
            config:             self.config,
            workload:           self.workload,
            mobility:           self.mobility,
            scheduler,
            terminal_positions: self.terminal_positions,
            cell_positions:     self.cell_positions,
        }
    }

    /// Where terminals are placed, in creation order.
    pub fn terminal_positions(mut self, allocator: impl PositionAllocator + 'static) -> Self {
        self.terminal_positions = Some(Box::new(allocator));
        self
    }

    /// Where cells are placed: every mmWave cell first, then every LTE cell.
    pub fn cell_positions(mut self, allocator: impl PositionAllocator + 'static) -> Self {
        self.cell_positions = Some(Box::new(allocator));
        self
    }

    /// Validate the configuration and return a [`Sim`] in
    /// [`SimPhase::Provisioning`].
    pub fn build(self) -> SimResult<Sim<W, M, S>> {
        self.config.validate()?;

        let run = &self.config.run;
        let area = self.config.topology.area;
        let mut root = SimRng::new(run.seed);
        let terminal_positions = self
            .terminal_positions
            .unwrap_or_else(|| Box::new(RandomRectangle::new(area, root.child(1))));
        let cell_positions = self
            .cell_positions
            .unwrap_or_else(|| Box::new(RandomRectangle::new(area, root.child(2))));

        let registry = match run.max_nodes {
            Some(limit) => NodeRegistry::with_limit(limit as usize),
            None => NodeRegistry::new(),
        };

        Ok(Sim {
            phase:              SimPhase::Provisioning,
            clock:              AccountingClock::new(self.config.energy.interval_secs),
            energy:             EnergyModel::from_config(&self.config.energy),
            mobility:           MobilityEngine::new(self.mobility, 0, run.seed),
            registry,
            topology:           CellTopologyBuilder::new().build(),
            terminals:          Vec::new(),
            attachments:        AttachmentTable::new(),
            previous:           AttachmentTable::new(),
            samples:            Vec::new(),
            diagnostics:        Diagnostics::new(),
            intervals_run:      0,
            workload:           self.workload,
            scheduler:          self.scheduler,
            terminal_positions: Some(terminal_positions),
            cell_positions:     Some(cell_positions),
            config:             self.config,
        })
    }
}
