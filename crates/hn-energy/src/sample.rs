//! Energy samples and their aggregates.

use std::collections::BTreeMap;
use std::fmt;

use hn_core::{IntervalIndex, NodeId};

/// Energy consumed by one terminal in one accounting interval, in joules.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergySample {
    pub terminal:          NodeId,
    pub interval:          IntervalIndex,
    pub processing_energy: f64,
    pub migration_energy:  f64,
}

impl EnergySample {
    #[inline]
    pub fn total(&self) -> f64 {
        self.processing_energy + self.migration_energy
    }
}

impl fmt::Display for EnergySample {
    /// The report line: `UE <id>: Processing Energy = <p> J, Migration Energy = <m> J`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UE {}: Processing Energy = {} J, Migration Energy = {} J",
            self.terminal.0, self.processing_energy, self.migration_energy
        )
    }
}

/// Running sums over a set of samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyTotals {
    pub processing: f64,
    pub migration:  f64,
    pub samples:    usize,
}

impl EnergyTotals {
    pub fn add(&mut self, sample: &EnergySample) {
        self.processing += sample.processing_energy;
        self.migration += sample.migration_energy;
        self.samples += 1;
    }

    pub fn total(&self) -> f64 {
        self.processing + self.migration
    }

    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a EnergySample>) -> Self {
        let mut totals = Self::default();
        for s in samples {
            totals.add(s);
        }
        totals
    }

    /// Totals per terminal, ascending terminal id.
    pub fn per_terminal<'a>(
        samples: impl IntoIterator<Item = &'a EnergySample>,
    ) -> BTreeMap<NodeId, EnergyTotals> {
        let mut map: BTreeMap<NodeId, EnergyTotals> = BTreeMap::new();
        for s in samples {
            map.entry(s.terminal).or_default().add(s);
        }
        map
    }
}
