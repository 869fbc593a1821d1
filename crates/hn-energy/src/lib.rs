//! `hn-energy`: per-terminal energy accounting.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`model`]      | `compute_processing_energy`, `compute_migration_energy`, `EnergyModel` |
//! | [`workload`]   | `Workload`, `WorkloadModel` trait, `FixedWorkload`, `TableWorkload` |
//! | [`loader`]     | `load_workloads_csv`, `load_workloads_reader`             |
//! | [`sample`]     | `EnergySample`, `EnergyTotals`                            |
//! | [`optimize`]   | `SplitEnergyObjective`, `FlowerPollination`, `Objective`  |
//! | [`error`]      | `EnergyError`, `EnergyResult<T>`                          |
//!
//! # Model
//!
//! For one terminal over one accounting interval of length `T`:
//!
//! ```text
//! processing = (static_power + dynamic_power * load / capacity) * T
//! migration  = (alpha * data_volume + beta) * T
//! ```
//!
//! Both functions are pure.  The model only returns the pair; recording an
//! [`EnergySample`] is the caller's job.

pub mod error;
pub mod loader;
pub mod model;
pub mod optimize;
pub mod sample;
pub mod workload;


pub use error::{EnergyError, EnergyResult};
pub use loader::{load_workloads_csv, load_workloads_reader};
pub use model::{compute_migration_energy, compute_processing_energy, EnergyModel};
pub use optimize::{FlowerPollination, Objective, Optimum, ProcessingPool, SplitEnergyObjective};
pub use sample::{EnergySample, EnergyTotals};
pub use workload::{FixedWorkload, TableWorkload, Workload, WorkloadModel};
