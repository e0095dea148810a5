//! Structural errors for assembly documents.

use thiserror::Error;

/// An assembly document that does not fit the schema.
///
/// These are raised before any checker runs. Business-rule violations are never
/// reported this way; they become findings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The document could not be decoded into the assembly model.
    #[error("schema parse error: {message}")]
    Parse { message: String },

    /// The document decoded but violates a structural constraint.
    #[error("schema violation at {path}: {message}")]
    Invalid { path: String, message: String },
}

impl SchemaError {
    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::Invalid {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Schema path of the offending field, when known.
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::Parse { .. } => None,
            SchemaError::Invalid { path, .. } => Some(path),
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Parse {
            message: err.to_string(),
        }
    }
}
