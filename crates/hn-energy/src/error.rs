use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyError {
    #[error("processing capacity must be > 0, got {capacity}")]
    InvalidCapacity { capacity: f64 },

    #[error("workload parse error: {0}")]
    Parse(String),

    #[error("invalid optimizer setup: {0}")]
    InvalidOptimizer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EnergyResult<T> = Result<T, EnergyError>;
