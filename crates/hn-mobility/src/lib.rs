//! `hn-mobility`: where nodes start and how terminals move.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`placement`] | `PositionAllocator` trait, `RandomRectangle`, `FixedPositions`    |
//! | [`model`]     | `MobilityModel` trait, `ConstantPosition`, `RandomWalk2d`         |
//! | [`engine`]    | `MobilityEngine<M>`: per-node RNGs + interval position updates   |
//! | [`error`]     | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model
//!
//! Positions are only observed at accounting-interval boundaries, so the
//! engine advances every terminal by one whole interval at a time:
//!
//! 1. The driver calls `MobilityEngine::advance(registry, dt_secs)`.
//! 2. For each terminal the model computes the position reached after
//!    `dt_secs`, drawing from that terminal's own [`NodeRng`][hn_core::NodeRng].
//! 3. The new position is written straight into the registry.
//!
//! Cells never move.

pub mod engine;
pub mod error;
pub mod model;
pub mod placement;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use model::{ConstantPosition, MobilityModel, RandomWalk2d};
pub use placement::{FixedPositions, PositionAllocator, RandomRectangle};
