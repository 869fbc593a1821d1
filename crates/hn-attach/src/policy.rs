//! Closest-cell attachment and the resulting table.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use hn_core::{CellId, NodeId, Rat};
use hn_registry::{NodeKind, NodeRegistry};

use crate::{AttachError, AttachResult, CellTopology};

/// A terminal's serving cell on one RAT, with the distance at decision time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachmentRecord {
    pub terminal:   NodeId,
    pub rat:        Rat,
    pub cell:       CellId,
    pub distance_m: f64,
}

/// A terminal that needed `rat` while `rat` had no candidate cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unattached {
    pub terminal: NodeId,
    pub rat:      Rat,
}

/// Attachment records keyed by `(terminal, RAT)`, plus the unattached
/// markings produced by the same pass.
///
/// Iteration is ordered by terminal id, then by `Rat` (LTE before mmWave).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttachmentTable {
    records:    BTreeMap<(NodeId, Rat), AttachmentRecord>,
    unattached: Vec<Unattached>,
}

impl AttachmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, terminal: NodeId, rat: Rat) -> Option<&AttachmentRecord> {
        self.records.get(&(terminal, rat))
    }

    /// Every record held by `terminal`, ascending RAT.
    pub fn records_of(&self, terminal: NodeId) -> impl Iterator<Item = &AttachmentRecord> + '_ {
        self.records
            .range((terminal, Rat::Lte)..=(terminal, Rat::MmWave))
            .map(|(_, r)| r)
    }

    /// `(rat, cell)` pairs currently serving `terminal`.
    pub fn serving_cells(&self, terminal: NodeId) -> impl Iterator<Item = (Rat, CellId)> + '_ {
        self.records_of(terminal).map(|r| (r.rat, r.cell))
    }

    /// `true` if `terminal` holds at least one record.
    pub fn is_attached(&self, terminal: NodeId) -> bool {
        self.records_of(terminal).next().is_some()
    }

    /// `true` if the serving-cell set of `terminal` differs between `self`
    /// and `previous`.
    pub fn serving_changed(&self, previous: &AttachmentTable, terminal: NodeId) -> bool {
        !self.serving_cells(terminal).eq(previous.serving_cells(terminal))
    }

    pub fn records(&self) -> impl Iterator<Item = &AttachmentRecord> + '_ {
        self.records.values()
    }

    pub fn unattached(&self) -> &[Unattached] {
        &self.unattached
    }

    /// Number of attachment records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&mut self, record: AttachmentRecord) {
        self.records.insert((record.terminal, record.rat), record);
    }
}

/// Attach every terminal in `terminals` to its closest cell.
///
/// - Multi-connectivity terminals get one record per supported RAT.
/// - Single-connectivity terminals get one record, on the first RAT of
///   [`Rat::PREFERENCE`] they support that has at least one cell.
///
/// A required RAT with no cells produces an [`Unattached`] marking instead
/// of a record.  Positions are read from `registry` at call time.
///
/// # Errors
///
/// [`AttachError::NotATerminal`] if an id names a cell site, or
/// [`AttachError::Registry`] for an id outside the registry.
pub fn attach_closest<I>(
    registry: &NodeRegistry,
    terminals: I,
    topology: &CellTopology,
) -> AttachResult<AttachmentTable>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut table = AttachmentTable::new();

    for terminal in terminals {
        if registry.kind(terminal)? != NodeKind::Terminal {
            return Err(AttachError::NotATerminal(terminal));
        }
        let caps = registry.capabilities(terminal)?;
        let pos = registry.position(terminal)?;

        let wanted: Vec<Rat> = if caps.is_multi_connectivity() {
            caps.rats().collect()
        } else {
            let supported: Vec<Rat> = Rat::PREFERENCE
                .into_iter()
                .filter(|&r| caps.supports(r))
                .collect();
            match supported.iter().find(|&&r| topology.count(r) > 0) {
                Some(&rat) => vec![rat],
                // Nothing reachable: every supported RAT is reported.
                None => supported,
            }
        };

        for rat in wanted {
            match topology.nearest(rat, pos) {
                Some((cell, distance_m)) => {
                    debug!(%terminal, %rat, %cell, distance_m, "attached");
                    table.insert(AttachmentRecord { terminal, rat, cell, distance_m });
                }
                None => {
                    warn!(%terminal, %rat, "no candidate cells, terminal unattached");
                    table.unattached.push(Unattached { terminal, rat });
                }
            }
        }
    }

    Ok(table)
}
