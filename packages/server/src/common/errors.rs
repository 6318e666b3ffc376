use thiserror::Error;

/// Error taxonomy for the listing and scoring core.
///
/// Validation errors are raised before any store access; ownership and
/// absence errors after a lookup. Oracle failures never surface here: the
/// enrichment paths log and continue, and the direct prediction path
/// answers with the deterministic fallback.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid score {0}: must be within 0-100")]
    InvalidScore(f64),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not authorized: {0}")]
    Forbidden(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
