use hn_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("node limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    #[error("node {0} is not in the registry")]
    UnknownNode(NodeId),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
