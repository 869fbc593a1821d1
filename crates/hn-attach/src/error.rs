//! Attachment-subsystem error type.

use thiserror::Error;

use hn_core::NodeId;
use hn_registry::RegistryError;

/// Errors produced by `hn-attach`.  All of them indicate an inconsistency
/// between the registry and the topology, so callers treat them as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachError {
    #[error("cell site {0} advertises no RAT")]
    CellWithoutRat(NodeId),

    #[error("node {0} is not a terminal")]
    NotATerminal(NodeId),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type AttachResult<T> = Result<T, AttachError>;
