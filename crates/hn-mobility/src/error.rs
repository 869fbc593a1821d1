use hn_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("position allocator exhausted after {allocated} positions")]
    AllocatorExhausted { allocated: usize },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
