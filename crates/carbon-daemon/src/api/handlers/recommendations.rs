//! Recommendation handlers

use axum::Json;
use serde::Deserialize;

use carbon_core::{recommendations_for, RecommendationSet};

use crate::api::extract::ApiJson;
use crate::error::ApiResult;

/// Recommendation request: the footprint to advise on, kg CO2/day.
#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    #[serde(default, deserialize_with = "crate::api::extract::lenient_f64")]
    pub carbon_footprint: f64,
}

/// Threshold-keyed recommendations for a daily footprint
pub async fn get_recommendations(
    ApiJson(request): ApiJson<RecommendationsRequest>,
) -> ApiResult<Json<RecommendationSet>> {
    Ok(Json(recommendations_for(request.carbon_footprint)))
}
