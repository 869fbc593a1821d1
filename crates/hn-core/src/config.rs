//! Scenario configuration.
//!
//! `ScenarioConfig::default()` is the reference scenario: four mmWave small
//! cells and one LTE macro cell over a 4 km × 4 km area, three dual-stack
//! terminals per mmWave cell, one accounting interval of one second and a
//! stop time of ten seconds.
//!
//! Applications typically load a (possibly partial) TOML file into this type
//! with the `serde` feature, apply command-line overrides, then call
//! [`ScenarioConfig::validate`] before handing it to the driver.

use crate::{Bounds, CapabilitySet, HnError, HnResult};

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Top-level configuration for one run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    pub topology: TopologyConfig,
    pub energy:   EnergyConfig,
    pub run:      RunConfig,
}

impl ScenarioConfig {
    /// Check every section; the first violation is returned as
    /// [`HnError::Config`].
    pub fn validate(&self) -> HnResult<()> {
        self.topology.validate()?;
        self.energy.validate()?;
        self.run.validate()
    }
}

// ── TopologyConfig ────────────────────────────────────────────────────────────

/// Cell layout and terminal population.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TopologyConfig {
    /// Number of mmWave small cells.
    pub mmwave_cells: u32,
    /// Number of LTE macro cells.
    pub lte_cells: u32,
    /// Terminals provisioned per mmWave cell.
    pub terminals_per_cell: u32,
    /// Area within which cells and terminals are placed and terminals walk.
    pub area: Bounds,
    /// Capabilities given to every provisioned terminal.
    pub terminal_capabilities: CapabilitySet,
}

impl TopologyConfig {
    /// Total terminal population: `terminals_per_cell × mmwave_cells`.
    ///
    /// Saturates on overflow; [`ScenarioConfig::validate`] rejects such
    /// layouts.
    pub fn terminal_count(&self) -> u32 {
        self.terminals_per_cell.saturating_mul(self.mmwave_cells)
    }

    pub fn cell_count(&self) -> u32 {
        self.mmwave_cells.saturating_add(self.lte_cells)
    }

    /// Terminals plus cells, or `None` if the layout does not fit the node
    /// id space (`NodeId::INVALID` stays reserved).
    pub fn node_count(&self) -> Option<u32> {
        let terminals = self.terminals_per_cell.checked_mul(self.mmwave_cells)?;
        let cells = self.mmwave_cells.checked_add(self.lte_cells)?;
        terminals.checked_add(cells).filter(|&n| n < u32::MAX)
    }

    fn validate(&self) -> HnResult<()> {
        if self.node_count().is_none() {
            return Err(HnError::Config(format!(
                "{} terminals per cell × {} mmWave cells plus {} LTE cells overflows the node id space",
                self.terminals_per_cell, self.mmwave_cells, self.lte_cells
            )));
        }
        if !self.area.is_valid() {
            return Err(HnError::Config(format!(
                "area must have positive finite extent, got {:?}",
                self.area
            )));
        }
        if self.terminal_capabilities.rats().next().is_none() {
            return Err(HnError::Config(
                "terminal capabilities must include at least one RAT".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            mmwave_cells:          4,
            lte_cells:             1,
            terminals_per_cell:    3,
            area:                  Bounds::from_max(4_000.0, 4_000.0),
            terminal_capabilities: CapabilitySet::multi_connectivity(),
        }
    }
}

// ── EnergyConfig ──────────────────────────────────────────────────────────────

/// Energy model tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyConfig {
    /// Power drawn regardless of load, in watts.
    pub static_power: f64,
    /// Additional power at full normalized load, in watts.
    pub dynamic_power: f64,
    /// Energy per unit of migrated data.
    pub alpha: f64,
    /// Fixed per-interval migration overhead.
    pub beta: f64,
    /// Accounting interval length `T`, in seconds.
    pub interval_secs: f64,
}

impl EnergyConfig {
    fn validate(&self) -> HnResult<()> {
        for (name, v) in [
            ("static_power", self.static_power),
            ("dynamic_power", self.dynamic_power),
            ("alpha", self.alpha),
            ("beta", self.beta),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(HnError::Config(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(HnError::Config(format!(
                "interval_secs must be finite and > 0, got {}",
                self.interval_secs
            )));
        }
        Ok(())
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            static_power:  50.0,
            dynamic_power: 20.0,
            alpha:         0.5,
            beta:          10.0,
            interval_secs: 1.0,
        }
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// When migration energy is charged to an attached terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MigrationPolicy {
    /// Every interval, for every attached terminal.
    #[default]
    EveryInterval,
    /// Only in intervals where the terminal's serving cells changed since
    /// the previous interval.
    OnHandover,
}

/// Run length, reproducibility and driver behaviour.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Number of accounting intervals `K` to schedule.
    pub intervals: u32,
    /// Scheduler stop time, in seconds.  No interval whose boundary is at or
    /// after this time is begun.
    pub stop_time_secs: f64,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
    /// Registry node limit.  `None` means only the id space bounds it.
    pub max_nodes: Option<u32>,
    /// Re-run closest-cell attachment at each interval boundary after
    /// terminals have moved.
    pub reattach_each_interval: bool,
    pub migration_policy: MigrationPolicy,
    /// Random-walk speed range, metres per second.
    pub walk_speed_min: f64,
    pub walk_speed_max: f64,
    /// Seconds a walker keeps one heading and speed.
    pub walk_step_secs: f64,
}

impl RunConfig {
    fn validate(&self) -> HnResult<()> {
        if !self.stop_time_secs.is_finite() || self.stop_time_secs < 0.0 {
            return Err(HnError::Config(format!(
                "stop_time_secs must be finite and >= 0, got {}",
                self.stop_time_secs
            )));
        }
        if !(self.walk_speed_min >= 0.0 && self.walk_speed_min <= self.walk_speed_max)
            || !self.walk_speed_max.is_finite()
        {
            return Err(HnError::Config(format!(
                "walk speed range [{}, {}] is invalid",
                self.walk_speed_min, self.walk_speed_max
            )));
        }
        if !self.walk_step_secs.is_finite() || self.walk_step_secs <= 0.0 {
            return Err(HnError::Config(format!(
                "walk_step_secs must be finite and > 0, got {}",
                self.walk_step_secs
            )));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            intervals:              1,
            stop_time_secs:         10.0,
            seed:                   1,
            max_nodes:              None,
            reattach_each_interval: false,
            migration_policy:       MigrationPolicy::EveryInterval,
            walk_speed_min:         2.0,
            walk_speed_max:         4.0,
            walk_step_secs:         1.0,
        }
    }
}
