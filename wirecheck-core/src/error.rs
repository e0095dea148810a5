//! Boundary error taxonomy.
//!
//! Rule violations are findings, never errors. A missing rule table skips the
//! dependent check. What is left to fail:
//! - structurally invalid input
//! - a referenced assembly the store does not hold
//! - anything unexpected

use thiserror::Error;
use wirecheck_edit::FixError;
use wirecheck_types::SchemaError;

#[derive(Debug, Error)]
pub enum DrcError {
    #[error("invalid assembly: {0}")]
    Schema(#[from] SchemaError),

    #[error("assembly not found: {assembly_id}")]
    NotFound { assembly_id: String },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl DrcError {
    /// HTTP-style status class for a service wrapper.
    pub fn status_code(&self) -> u16 {
        match self {
            DrcError::Schema(_) => 400,
            DrcError::NotFound { .. } => 404,
            DrcError::Internal(_) => 500,
        }
    }

    /// None of these go away by asking again.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Recommended process exit code.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<FixError> for DrcError {
    fn from(err: FixError) -> Self {
        match err {
            FixError::Schema(e) => DrcError::Schema(e),
            FixError::Runtime(e) => DrcError::Internal(e),
        }
    }
}
