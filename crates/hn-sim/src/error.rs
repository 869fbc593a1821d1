use thiserror::Error;

use hn_attach::AttachError;
use hn_core::HnError;
use hn_mobility::MobilityError;
use hn_registry::RegistryError;

use crate::SimPhase;

/// Fatal driver errors.  Any of these halts the run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(#[from] HnError),

    #[error("provisioning failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("attachment failed: {0}")]
    Attach(#[from] AttachError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("{operation} is not allowed in phase {phase}")]
    InvalidPhase { operation: &'static str, phase: SimPhase },
}

pub type SimResult<T> = Result<T, SimError>;
