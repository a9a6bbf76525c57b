//! Error types for carbon-core

use thiserror::Error;

/// Errors from the footprint predictor.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// The synthetic training fit failed.
    #[error("Training failed: {0}")]
    Training(String),
}

/// Errors from the activity calculator.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// The requested activity type has no emission factor.
    #[error("Unknown activity type")]
    UnknownActivity,

    /// A quantity field was present but not readable as a number.
    #[error("Invalid quantity for '{field}': {message}")]
    InvalidQuantity {
        field: &'static str,
        message: String,
    },
}
