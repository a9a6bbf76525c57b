//! Footprint prediction handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use carbon_core::FootprintInputs;

use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::error::ApiResult;

use super::round2;

/// Prediction request: daily lifestyle figures, each defaulting to zero.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Distance travelled, km/day
    #[serde(default, deserialize_with = "crate::api::extract::lenient_f64")]
    pub transportation: f64,

    /// Energy usage, kWh/day
    #[serde(default, deserialize_with = "crate::api::extract::lenient_f64")]
    pub energy_usage: f64,

    /// Meat consumption, grams/day
    #[serde(default, deserialize_with = "crate::api::extract::lenient_f64")]
    pub food_meat: f64,

    /// Waste produced, kg/day
    #[serde(default, deserialize_with = "crate::api::extract::lenient_f64")]
    pub waste: f64,
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub carbon_footprint: f64,
    pub breakdown: BreakdownResponse,
    pub unit: String,
}

/// Per-category breakdown, reported alongside the model prediction
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub transportation: f64,
    pub energy: f64,
    pub food: f64,
    pub waste: f64,
}

/// Predict the daily footprint and report the linear breakdown
pub async fn predict_footprint(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PredictRequest>,
) -> ApiResult<Json<PredictResponse>> {
    let inputs = FootprintInputs {
        transportation_km: request.transportation,
        energy_kwh: request.energy_usage,
        food_meat_grams: request.food_meat,
        waste_kg: request.waste,
    };

    let carbon_footprint = state.predictor.predict(&inputs)?;
    let breakdown = inputs.breakdown();

    Ok(Json(PredictResponse {
        carbon_footprint: round2(carbon_footprint),
        breakdown: BreakdownResponse {
            transportation: round2(breakdown.transportation),
            energy: round2(breakdown.energy),
            food: round2(breakdown.food),
            waste: round2(breakdown.waste),
        },
        unit: "kg CO2/day".to_string(),
    }))
}
