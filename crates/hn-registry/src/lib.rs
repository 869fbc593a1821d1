//! `hn-registry`: authoritative store of every simulated node.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `NodeRegistry` (SoA arrays), `NodeKind`                   |
//! | [`query`]       | `CapabilityIter`, `KindIter` (lazy, restartable listings) |
//! | [`error`]       | `RegistryError`, `RegistryResult<T>`                      |
//!
//! # Lifecycle
//!
//! Nodes are created during provisioning by a single writer and are never
//! removed.  After provisioning the registry is read-only except for position
//! updates applied by the mobility engine between accounting intervals.

pub mod error;
pub mod query;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{RegistryError, RegistryResult};
pub use query::{CapabilityIter, KindIter};
pub use store::{NodeKind, NodeRegistry};
