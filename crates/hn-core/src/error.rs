//! Workspace base error type.
//!
//! Sub-crates define their own error enums for their own failure modes and
//! wrap `HnError` where a configuration or I/O failure can surface.

use thiserror::Error;

/// The top-level error type for `hn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `hn-*` crates.
pub type HnResult<T> = Result<T, HnError>;
