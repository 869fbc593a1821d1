//! Core node storage: `NodeRegistry`.
//!
//! Every `Vec` field has exactly `len()` elements and the `NodeId` value is
//! the index into all of them:
//!
//! ```ignore
//! let pos = registry.positions()[node.index()];  // O(1), cache-friendly
//! ```
//!
//! Positions live in their own array so the mobility engine can take
//! `&mut [Coord]` while kinds and capabilities stay shared.

use hn_core::{Capability, CapabilitySet, Coord, NodeId};

use crate::{CapabilityIter, KindIter, RegistryError, RegistryResult};

/// What a node is in the topology.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A mobile user terminal (UE).
    Terminal,
    /// A fixed cell site.
    Cell,
}

/// Structure-of-Arrays storage for all node state.
pub struct NodeRegistry {
    kinds:        Vec<NodeKind>,
    capabilities: Vec<CapabilitySet>,
    positions:    Vec<Coord>,
    limit:        usize,
}

impl NodeRegistry {
    /// An empty registry bounded only by the id space.
    pub fn new() -> Self {
        // `u32::MAX` is the `NodeId::INVALID` sentinel and never allocated.
        Self::with_limit(NodeId::INVALID.index())
    }

    /// An empty registry that refuses to grow beyond `limit` nodes.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.min(NodeId::INVALID.index());
        Self {
            kinds:        Vec::new(),
            capabilities: Vec::new(),
            positions:    Vec::new(),
            limit,
        }
    }

    /// Allocate a node at the origin and return its id (sequential from 0).
    ///
    /// # Errors
    ///
    /// [`RegistryError::CapacityExceeded`] once `limit` nodes exist.
    pub fn create_node(&mut self, kind: NodeKind, capabilities: CapabilitySet) -> RegistryResult<NodeId> {
        if self.kinds.len() >= self.limit {
            return Err(RegistryError::CapacityExceeded { limit: self.limit });
        }
        let id = NodeId(self.kinds.len() as u32);
        self.kinds.push(kind);
        self.capabilities.push(capabilities);
        self.positions.push(Coord::ORIGIN);
        Ok(id)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.kinds.len()
    }

    #[inline]
    fn check(&self, node: NodeId) -> RegistryResult<usize> {
        if self.contains(node) {
            Ok(node.index())
        } else {
            Err(RegistryError::UnknownNode(node))
        }
    }

    /// Current position of `node`.
    pub fn position(&self, node: NodeId) -> RegistryResult<Coord> {
        self.check(node).map(|i| self.positions[i])
    }

    /// Move `node` to `pos`.
    pub fn set_position(&mut self, node: NodeId, pos: Coord) -> RegistryResult<()> {
        let i = self.check(node)?;
        self.positions[i] = pos;
        Ok(())
    }

    pub fn kind(&self, node: NodeId) -> RegistryResult<NodeKind> {
        self.check(node).map(|i| self.kinds[i])
    }

    pub fn capabilities(&self, node: NodeId) -> RegistryResult<CapabilitySet> {
        self.check(node).map(|i| self.capabilities[i])
    }

    // ── Listings ──────────────────────────────────────────────────────────

    /// Lazy, restartable listing of every node carrying `cap`, ascending id.
    pub fn list_by_capability(&self, cap: Capability) -> CapabilityIter<'_> {
        CapabilityIter::new(&self.capabilities, cap)
    }

    /// Lazy, restartable listing of every node of `kind`, ascending id.
    pub fn list_by_kind(&self, kind: NodeKind) -> KindIter<'_> {
        KindIter::new(&self.kinds, kind)
    }

    /// Iterator over all `NodeId`s in ascending index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.kinds.len() as u32).map(NodeId)
    }

    // ── Bulk access ───────────────────────────────────────────────────────

    /// All positions, indexed by `NodeId`.
    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    /// Mutable positions together with the read-only kinds, for the mobility
    /// engine's single pass over terminals.
    pub fn positions_mut(&mut self) -> (&[NodeKind], &mut [Coord]) {
        (&self.kinds, &mut self.positions)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
