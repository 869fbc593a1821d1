//! Edge/central split energy objective and a flower-pollination optimizer.
//!
//! The objective prices one decision vector `a` (edge association level per
//! step, each in `[0, 1]`) as the processing energy of both processing pools
//! plus the migration energy of every association transition:
//!
//! ```text
//! E(a) = Σ_pools Σ_units ((load > 0) · P + P' · load / C) · T
//!      + Σ_{t ≥ 1} (1 − a[t−1]) · a[t] · Σ_j (alpha · V_j + beta)
//! ```
//!
//! [`FlowerPollination`] minimizes any [`Objective`] over a box.

use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, trace};

use hn_core::SimRng;

use crate::{EnergyError, EnergyResult};

/// Something the optimizer can minimize.
pub trait Objective {
    fn evaluate(&self, x: &[f64]) -> EnergyResult<f64>;
}

// ── Split objective ───────────────────────────────────────────────────────────

/// A pool of identical processing units.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessingPool {
    pub static_power:  f64,
    pub dynamic_power: f64,
    pub capacity:      f64,
    /// Current load of each unit.  An idle unit draws no static power.
    pub loads:         Vec<f64>,
}

impl ProcessingPool {
    /// Energy of the whole pool over `interval_secs`.
    pub fn energy(&self, interval_secs: f64) -> EnergyResult<f64> {
        if !(self.capacity > 0.0) {
            return Err(EnergyError::InvalidCapacity { capacity: self.capacity });
        }
        let power: f64 = self
            .loads
            .iter()
            .map(|&l| {
                let on = if l > 0.0 { self.static_power } else { 0.0 };
                on + self.dynamic_power * (l / self.capacity)
            })
            .sum();
        Ok(power * interval_secs)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitEnergyObjective {
    pub edge:          ProcessingPool,
    pub central:       ProcessingPool,
    /// Data volume moved by each distributed unit on a transition.
    pub volumes:       Vec<f64>,
    pub alpha:         f64,
    pub beta:          f64,
    pub interval_secs: f64,
}

impl SplitEnergyObjective {
    /// Two edge units, two central units, two distributed units.
    pub fn reference() -> Self {
        Self {
            edge: ProcessingPool {
                static_power:  200.0,
                dynamic_power: 50.0,
                capacity:      100.0,
                loads:         vec![50.0, 60.0],
            },
            central: ProcessingPool {
                static_power:  300.0,
                dynamic_power: 60.0,
                capacity:      120.0,
                loads:         vec![70.0, 80.0],
            },
            volumes:       vec![5.0, 10.0],
            alpha:         0.5,
            beta:          10.0,
            interval_secs: 1.0,
        }
    }

    /// Processing energy of both pools.  Independent of the decision vector.
    pub fn processing_energy(&self) -> EnergyResult<f64> {
        Ok(self.edge.energy(self.interval_secs)? + self.central.energy(self.interval_secs)?)
    }

    /// Migration energy of the transitions in `association`.
    pub fn migration_energy(&self, association: &[f64]) -> f64 {
        let per_transition: f64 = self.volumes.iter().map(|v| self.alpha * v + self.beta).sum();
        association
            .windows(2)
            .map(|w| (1.0 - w[0]) * w[1] * per_transition)
            .sum()
    }

    pub fn total_energy(&self, association: &[f64]) -> EnergyResult<f64> {
        Ok(self.processing_energy()? + self.migration_energy(association))
    }
}

impl Objective for SplitEnergyObjective {
    fn evaluate(&self, x: &[f64]) -> EnergyResult<f64> {
        self.total_energy(x)
    }
}

// ── Flower pollination ────────────────────────────────────────────────────────

/// Result of [`FlowerPollination::minimize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Optimum {
    pub best:         Vec<f64>,
    pub best_fitness: f64,
    /// Best fitness after initialization, then after each generation.
    /// Length `generations + 1`, non-increasing.
    pub convergence:  Vec<f64>,
}

/// Flower-pollination metaheuristic.
///
/// Each generation moves every member once.  With probability
/// `switch_probability` the move is global (`x += L · (x − best)`, `L`
/// standard normal); otherwise it is local (`x += ε · (x_j − x_k)` for two
/// distinct members `j ≠ k`, `ε` uniform in `[0, 1)`).  Members
/// are clipped back into `bounds` after every move.
#[derive(Clone, Debug)]
pub struct FlowerPollination {
    pub generations:        usize,
    pub population:         usize,
    pub switch_probability: f64,
    /// Inclusive `(lower, upper)` per decision variable.
    pub bounds:             Vec<(f64, f64)>,
}

impl FlowerPollination {
    pub fn new(generations: usize, population: usize, bounds: Vec<(f64, f64)>) -> Self {
        Self { generations, population, switch_probability: 0.8, bounds }
    }

    fn validate(&self) -> EnergyResult<()> {
        if self.population < 2 {
            return Err(EnergyError::InvalidOptimizer(format!(
                "population must be >= 2, got {}",
                self.population
            )));
        }
        if !(0.0..=1.0).contains(&self.switch_probability) {
            return Err(EnergyError::InvalidOptimizer(format!(
                "switch_probability must be in [0, 1], got {}",
                self.switch_probability
            )));
        }
        if self.bounds.is_empty() {
            return Err(EnergyError::InvalidOptimizer("no decision variables".into()));
        }
        for (i, &(lo, hi)) in self.bounds.iter().enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(EnergyError::InvalidOptimizer(format!(
                    "bounds[{i}] = ({lo}, {hi}) is not a finite range"
                )));
            }
        }
        Ok(())
    }

    fn clip(&self, x: &mut [f64]) {
        for (v, &(lo, hi)) in x.iter_mut().zip(&self.bounds) {
            *v = v.clamp(lo, hi);
        }
    }

    /// Minimize `objective`.  Deterministic for a given `rng` state.
    pub fn minimize<O: Objective>(&self, objective: &O, rng: &mut SimRng) -> EnergyResult<Optimum> {
        self.validate()?;
        let dims = self.bounds.len();

        let mut population: Vec<Vec<f64>> = (0..self.population)
            .map(|_| self.bounds.iter().map(|&(lo, hi)| uniform(rng, lo, hi)).collect())
            .collect();
        let mut fitness = population
            .iter()
            .map(|x| objective.evaluate(x))
            .collect::<EnergyResult<Vec<f64>>>()?;

        let first = argmin(&fitness);
        let mut best = population[first].clone();
        let mut best_fitness = fitness[first];
        let mut convergence = Vec::with_capacity(self.generations + 1);
        convergence.push(best_fitness);

        for generation in 0..self.generations {
            for i in 0..self.population {
                let step: Vec<f64> = if rng.gen_bool(self.switch_probability) {
                    let l: f64 = StandardNormal.sample(rng.inner());
                    (0..dims).map(|d| l * (population[i][d] - best[d])).collect()
                } else {
                    let eps: f64 = rng.random();
                    let j = rng.gen_range(0..self.population);
                    let mut k = rng.gen_range(0..self.population - 1);
                    if k >= j {
                        k += 1;
                    }
                    (0..dims).map(|d| eps * (population[j][d] - population[k][d])).collect()
                };
                for (v, s) in population[i].iter_mut().zip(step) {
                    *v += s;
                }
                self.clip(&mut population[i]);
            }

            for (f, x) in fitness.iter_mut().zip(&population) {
                *f = objective.evaluate(x)?;
            }
            let current = argmin(&fitness);
            if fitness[current] < best_fitness {
                best_fitness = fitness[current];
                best = population[current].clone();
            }
            convergence.push(best_fitness);
            trace!(generation = generation + 1, best_fitness, "generation done");
        }

        debug!(generations = self.generations, best_fitness, "optimization finished");
        Ok(Optimum { best, best_fitness, convergence })
    }
}

fn uniform(rng: &mut SimRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Index of the smallest value; first one wins on ties.
fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] {
            best = i;
        }
    }
    best
}
