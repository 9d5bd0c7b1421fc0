use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarModelError {
    #[error("Invalid parameter: {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Numeric non-convergence: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    NumericNonConvergence {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SolarModelError {
    /// Shorthand for an `InvalidParameter` attributed to `field`.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SolarModelError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SolarModelError {
    fn from(e: serde_json::Error) -> Self {
        SolarModelError::SerializationError(e.to_string())
    }
}
