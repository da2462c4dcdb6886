use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReformaError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ReformaError {
    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        ReformaError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ReformaError {
    fn from(e: serde_json::Error) -> Self {
        ReformaError::SerializationError(e.to_string())
    }
}
