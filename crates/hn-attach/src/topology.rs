//! Cell topology with one spatial index per RAT.
//!
//! # Layout
//!
//! Cells live in a single `Vec<Cell>` indexed by `CellId`.  Ids are assigned
//! in registry order, so the lowest `CellId` is the earliest-provisioned
//! cell.  Each RAT owns an R-tree (via `rstar`) over the positions of its
//! cells; a nearest query only ever touches the tree of the RAT asked for.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use hn_core::{CellId, Coord, NodeId, Rat};
use hn_registry::{NodeKind, NodeRegistry};

use crate::{AttachError, AttachResult};

// ── R-tree cell entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct CellEntry {
    point: [f64; 2], // [x, y]
    id:    CellId,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A fixed access point serving on exactly one RAT.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub id:       CellId,
    pub rat:      Rat,
    /// Registry node backing this cell, or `NodeId::INVALID` for cells built
    /// directly through [`CellTopologyBuilder::add_cell`].
    pub node:     NodeId,
    pub position: Coord,
}

// ── CellTopology ──────────────────────────────────────────────────────────────

/// Per-RAT candidate cell sets for one run.  Immutable once built.
pub struct CellTopology {
    cells: Vec<Cell>,
    trees: [RTree<CellEntry>; Rat::COUNT],
}

impl CellTopology {
    /// Build the topology from every `NodeKind::Cell` node in `registry`, in
    /// ascending node id.
    ///
    /// A site advertising several RATs yields one cell per RAT, in ascending
    /// `Rat` order.
    ///
    /// # Errors
    ///
    /// [`AttachError::CellWithoutRat`] for a cell node with no RAT capability.
    pub fn from_registry(registry: &NodeRegistry) -> AttachResult<Self> {
        let mut builder = CellTopologyBuilder::new();
        for node in registry.list_by_kind(NodeKind::Cell) {
            let caps = registry.capabilities(node)?;
            let pos = registry.position(node)?;
            let mut any = false;
            for rat in caps.rats() {
                builder.add_site(node, rat, pos);
                any = true;
            }
            if !any {
                return Err(AttachError::CellWithoutRat(node));
            }
        }
        let topology = builder.build();
        debug!(
            lte = topology.count(Rat::Lte),
            mmwave = topology.count(Rat::MmWave),
            "cell topology built"
        );
        Ok(topology)
    }

    /// Nearest cell of `rat` to `pos` and the Euclidean distance to it.
    ///
    /// Exact distance ties are broken by the lowest `CellId`.  Returns `None`
    /// when `rat` has no cells.
    pub fn nearest(&self, rat: Rat, pos: Coord) -> Option<(CellId, f64)> {
        let mut iter = self.trees[rat.index()].nearest_neighbor_iter_with_distance_2(&pos.as_array());
        let (first, best_d2) = iter.next()?;
        let mut best = first.id;
        // Equal-distance neighbours come out consecutively; the tree's
        // internal order among them is arbitrary.
        for (entry, d2) in iter {
            if d2 != best_d2 {
                break;
            }
            best = best.min(entry.id);
        }
        Some((best, best_d2.sqrt()))
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// All cells, indexed by `CellId`.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells serving on `rat`, ascending `CellId`.
    pub fn cells_of(&self, rat: Rat) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(move |c| c.rat == rat)
    }

    /// Number of candidate cells on `rat`.
    pub fn count(&self, rat: Rat) -> usize {
        self.trees[rat.index()].size()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ── CellTopologyBuilder ───────────────────────────────────────────────────────

/// Incremental builder for [`CellTopology`].
///
/// ```ignore
/// let mut b = CellTopologyBuilder::new();
/// let a = b.add_cell(Rat::MmWave, Coord::new(0.0, 0.0));
/// let topo = b.build();
/// ```
pub struct CellTopologyBuilder {
    cells: Vec<Cell>,
}

impl CellTopologyBuilder {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Add a cell not backed by a registry node.  Returns its id
    /// (sequential from 0).
    pub fn add_cell(&mut self, rat: Rat, position: Coord) -> CellId {
        self.add_site(NodeId::INVALID, rat, position)
    }

    /// Add a cell backed by registry node `node`.
    pub fn add_site(&mut self, node: NodeId, rat: Rat, position: Coord) -> CellId {
        let id = CellId(self.cells.len() as u32);
        self.cells.push(Cell { id, rat, node, position });
        id
    }

    /// Consume the builder.  O(M log M) bulk load per RAT.
    pub fn build(self) -> CellTopology {
        let trees = Rat::ALL.map(|rat| {
            let entries: Vec<CellEntry> = self
                .cells
                .iter()
                .filter(|c| c.rat == rat)
                .map(|c| CellEntry { point: c.position.as_array(), id: c.id })
                .collect();
            RTree::bulk_load(entries)
        });
        CellTopology { cells: self.cells, trees }
    }
}

impl Default for CellTopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
