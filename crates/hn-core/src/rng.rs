//! Deterministic per-node and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each node gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (node_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive node IDs uniformly across the seed space.  A
//! terminal's random walk therefore does not depend on how many other
//! terminals exist or in which order they are moved.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::NodeId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── NodeRng ───────────────────────────────────────────────────────────────────

/// Per-node deterministic RNG, used by mobility models.
pub struct NodeRng(SmallRng);

impl NodeRng {
    /// Seed deterministically from the run's global seed and a node ID.
    pub fn new(global_seed: u64, node: NodeId) -> Self {
        let seed = global_seed ^ (node.0 as u64).wrapping_mul(MIXING_CONSTANT);
        NodeRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations: placement at provisioning and
/// optimizer populations.
///
/// Used only in single-threaded contexts.  Derive a [`child`](Self::child)
/// for each independent consumer so they do not perturb each other's stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
