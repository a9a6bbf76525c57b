//! Activity calculation handlers

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::extract::ApiJson;
use crate::error::ApiResult;

use super::round2;

/// Activity calculation request
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Activity category, e.g. "car" or "electricity"
    #[serde(rename = "type", default)]
    pub activity_type: String,

    /// Quantity payload for the activity
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Activity calculation response
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub activity_type: String,
    pub carbon_footprint: f64,
    pub unit: String,
}

/// Emissions for a single activity quantity
pub async fn calculate_activity(
    ApiJson(request): ApiJson<CalculateRequest>,
) -> ApiResult<Json<CalculateResponse>> {
    let footprint = carbon_core::activity::calculate(&request.activity_type, &request.data)?;

    Ok(Json(CalculateResponse {
        activity_type: request.activity_type,
        carbon_footprint: round2(footprint),
        unit: "kg CO2".to_string(),
    }))
}
