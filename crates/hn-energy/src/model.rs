//! Processing and migration energy formulas.

use hn_core::EnergyConfig;

use crate::{EnergyError, EnergyResult, Workload};

/// `(static_power + dynamic_power * load / capacity) * interval_secs`.
///
/// # Errors
///
/// [`EnergyError::InvalidCapacity`] unless `capacity > 0` (NaN included).
#[inline]
pub fn compute_processing_energy(
    static_power: f64,
    dynamic_power: f64,
    load: f64,
    capacity: f64,
    interval_secs: f64,
) -> EnergyResult<f64> {
    if !(capacity > 0.0) {
        return Err(EnergyError::InvalidCapacity { capacity });
    }
    Ok((static_power + dynamic_power * (load / capacity)) * interval_secs)
}

/// `(alpha * data_volume + beta) * interval_secs`.
#[inline]
pub fn compute_migration_energy(data_volume: f64, alpha: f64, beta: f64, interval_secs: f64) -> f64 {
    (alpha * data_volume + beta) * interval_secs
}

/// The energy tunables of one run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EnergyModel {
    pub static_power:  f64,
    pub dynamic_power: f64,
    pub alpha:         f64,
    pub beta:          f64,
    pub interval_secs: f64,
}

impl EnergyModel {
    pub fn from_config(config: &EnergyConfig) -> Self {
        Self {
            static_power:  config.static_power,
            dynamic_power: config.dynamic_power,
            alpha:         config.alpha,
            beta:          config.beta,
            interval_secs: config.interval_secs,
        }
    }

    pub fn processing_energy(&self, load: f64, capacity: f64, interval_secs: f64) -> EnergyResult<f64> {
        compute_processing_energy(self.static_power, self.dynamic_power, load, capacity, interval_secs)
    }

    pub fn migration_energy(&self, data_volume: f64, interval_secs: f64) -> f64 {
        compute_migration_energy(data_volume, self.alpha, self.beta, interval_secs)
    }

    /// `(processing, migration)` for `workload` over one configured interval.
    pub fn evaluate(&self, workload: &Workload) -> EnergyResult<(f64, f64)> {
        let processing =
            self.processing_energy(workload.processing_load, workload.capacity, self.interval_secs)?;
        let migration = self.migration_energy(workload.data_volume, self.interval_secs);
        Ok((processing, migration))
    }
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self::from_config(&EnergyConfig::default())
    }
}
