use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Rate table error: {0}")]
    TableError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinCalcError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        FinCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}
