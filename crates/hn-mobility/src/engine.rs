//! High-level mobility engine: per-node RNG state plus interval updates.

use hn_core::{NodeId, NodeRng};
use hn_registry::{NodeKind, NodeRegistry};
use tracing::trace;

use crate::MobilityModel;

/// Wraps a [`MobilityModel`] and one [`NodeRng`] per registry node.
///
/// # Type parameter
///
/// `M` must implement [`MobilityModel`] (e.g. [`crate::RandomWalk2d`]).
/// Swap it at compile time for a different movement model with no runtime
/// overhead.
pub struct MobilityEngine<M: MobilityModel> {
    /// The movement model.
    pub model: M,

    /// Per-node RNG, indexed by `NodeId`.  Cells hold one too so indices line
    /// up with the registry, but never draw from it.
    rngs: Vec<NodeRng>,

    seed: u64,
}

impl<M: MobilityModel> MobilityEngine<M> {
    /// Create an engine with RNGs for the first `node_count` nodes.  Pass 0
    /// when the registry is not provisioned yet.
    pub fn new(model: M, node_count: usize, seed: u64) -> Self {
        let mut engine = Self { model, rngs: Vec::new(), seed };
        engine.ensure_nodes(node_count);
        engine
    }

    /// Grow the RNG table to cover `node_count` nodes.  A node's stream
    /// depends only on the seed and its id, never on when it was added.
    pub fn ensure_nodes(&mut self, node_count: usize) {
        let seed = self.seed;
        let start = self.rngs.len() as u32;
        self.rngs
            .extend((start..node_count as u32).map(|i| NodeRng::new(seed, NodeId(i))));
    }

    /// Advance every terminal by `dt_secs` and write the new positions into
    /// `registry`.  Returns the number of terminals moved.
    pub fn advance(&mut self, registry: &mut NodeRegistry, dt_secs: f64) -> usize {
        self.ensure_nodes(registry.len());
        let (kinds, positions) = registry.positions_mut();
        let mut moved = 0;
        for ((kind, pos), rng) in kinds.iter().zip(positions.iter_mut()).zip(self.rngs.iter_mut()) {
            if *kind != NodeKind::Terminal {
                continue;
            }
            *pos = self.model.step(*pos, dt_secs, rng);
            moved += 1;
        }
        trace!(moved, dt_secs, "terminals advanced");
        moved
    }

    pub fn node_count(&self) -> usize {
        self.rngs.len()
    }
}
