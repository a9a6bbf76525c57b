//! Application state for API handlers

use std::sync::Arc;

use carbon_core::FootprintPredictor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Footprint predictor, trained lazily on its first prediction
    pub predictor: Arc<FootprintPredictor>,
}

impl AppState {
    /// Create new application state around an injected predictor
    pub fn new(predictor: Arc<FootprintPredictor>) -> Self {
        Self { predictor }
    }
}
