//! `hn-attach`: cell topology and closest-cell attachment.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`topology`] | `Cell`, `CellTopology` (one R-tree per RAT), `CellTopologyBuilder` |
//! | [`policy`]   | `attach_closest`, `AttachmentTable`, `AttachmentRecord`, `Unattached` |
//! | [`error`]    | `AttachError`, `AttachResult<T>`                               |
//!
//! # Decision rule
//!
//! For every terminal and every RAT it is to be attached on, the serving cell
//! is the cell of that RAT nearest (Euclidean) to the terminal's current
//! position.  Exact distance ties go to the lowest `CellId`.  The R-tree
//! answers each query in O(log M) and yields the same result as scanning all
//! M cells.

pub mod error;
pub mod policy;
pub mod topology;

#[cfg(test)]
mod tests;

pub use error::{AttachError, AttachResult};
pub use policy::{attach_closest, AttachmentRecord, AttachmentTable, Unattached};
pub use topology::{Cell, CellTopology, CellTopologyBuilder};
