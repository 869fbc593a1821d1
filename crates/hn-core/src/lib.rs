//! `hn-core`: foundational types for the `hetnet-energy` workspace.
//!
//! This crate is a dependency of every other `hn-*` crate.  It has no `hn-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `CellId`, `IntervalIndex`                   |
//! | [`geo`]         | `Coord`, `Bounds`, planar Euclidean distance          |
//! | [`rat`]         | `Rat`, `Capability`, `CapabilitySet`                  |
//! | [`time`]        | `SimTime`, `AccountingClock`                          |
//! | [`rng`]         | `NodeRng` (per-node), `SimRng` (global)               |
//! | [`config`]      | `ScenarioConfig` and its sections                     |
//! | [`error`]       | `HnError`, `HnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rat;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EnergyConfig, MigrationPolicy, RunConfig, ScenarioConfig, TopologyConfig};
pub use error::{HnError, HnResult};
pub use geo::{Bounds, Coord};
pub use ids::{CellId, IntervalIndex, NodeId};
pub use rat::{Capability, CapabilitySet, Rat};
pub use rng::{NodeRng, SimRng};
pub use time::{AccountingClock, SimTime};
