//! Carbon footprint estimation core
//!
//! Pure estimation logic for the carbon prediction service:
//! - **Predictor**: a regression model fitted lazily on deterministic
//!   synthetic data, producing a non-negative daily footprint estimate
//! - **Recommendations**: static advice entries keyed off footprint
//!   thresholds
//! - **Activities**: fixed per-activity emission factors
//!
//! The HTTP surface lives in `carbon-daemon`; nothing in this crate knows
//! about requests or responses.

pub mod activity;
pub mod error;
pub mod predictor;
pub mod recommend;

pub use activity::ActivityKind;
pub use error::{ActivityError, PredictorError};
pub use predictor::{FootprintBreakdown, FootprintInputs, FootprintPredictor};
pub use recommend::{recommendations_for, Difficulty, RecommendationEntry, RecommendationSet};
