//! Error types for wirecheck-edit.
//!
//! Unknown fix ids are never errors; they are reported as ignored. What remains:
//! - Schema violations of the mutated assembly (the result is discarded)
//! - Runtime failures such as serialization errors

use thiserror::Error;
use wirecheck_types::SchemaError;

#[derive(Debug, Error)]
pub enum FixError {
    /// The mutated assembly no longer validates.
    #[error("fixed assembly failed validation: {0}")]
    Schema(#[from] SchemaError),

    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

impl FixError {
    pub fn is_schema(&self) -> bool {
        matches!(self, FixError::Schema(_))
    }

    /// Recommended process exit code. Both variants are tool failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            FixError::Schema(_) | FixError::Runtime(_) => 1,
        }
    }
}

pub type FixResult<T> = Result<T, FixError>;

#[cfg(test)]
mod tests {
    use super::FixError;
    use wirecheck_types::SchemaError;

    #[test]
    fn schema_error_is_flagged() {
        let err = FixError::from(SchemaError::invalid("assembly_id", "must not be empty"));
        assert!(err.is_schema());
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("assembly_id"));
    }

    #[test]
    fn runtime_error_is_not_schema() {
        let err = FixError::from(anyhow::anyhow!("boom"));
        assert!(!err.is_schema());
        assert_eq!(err.exit_code(), 1);
    }
}
