//! Lazy node listings.
//!
//! Both iterators borrow one SoA column and yield matching `NodeId`s in
//! ascending order without allocating.  They are `Clone`, and
//! [`restart`](CapabilityIter::restart) rewinds a partially consumed listing
//! so a caller can walk the same candidate set several times.

use hn_core::{Capability, CapabilitySet, NodeId};

use crate::NodeKind;

/// Nodes carrying a given [`Capability`].
#[derive(Clone)]
pub struct CapabilityIter<'a> {
    column: &'a [CapabilitySet],
    cap:    Capability,
    next:   usize,
}

impl<'a> CapabilityIter<'a> {
    pub(crate) fn new(column: &'a [CapabilitySet], cap: Capability) -> Self {
        Self { column, cap, next: 0 }
    }

    /// A fresh listing over the same column, starting from the first node.
    pub fn restart(&self) -> Self {
        Self { next: 0, ..self.clone() }
    }
}

impl Iterator for CapabilityIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while self.next < self.column.len() {
            let i = self.next;
            self.next += 1;
            if self.column[i].contains(self.cap) {
                return Some(NodeId(i as u32));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.column.len() - self.next))
    }
}

/// Nodes of a given [`NodeKind`].
#[derive(Clone)]
pub struct KindIter<'a> {
    column: &'a [NodeKind],
    kind:   NodeKind,
    next:   usize,
}

impl<'a> KindIter<'a> {
    pub(crate) fn new(column: &'a [NodeKind], kind: NodeKind) -> Self {
        Self { column, kind, next: 0 }
    }

    pub fn restart(&self) -> Self {
        Self { next: 0, ..self.clone() }
    }
}

impl Iterator for KindIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while self.next < self.column.len() {
            let i = self.next;
            self.next += 1;
            if self.column[i] == self.kind {
                return Some(NodeId(i as u32));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.column.len() - self.next))
    }
}
