//! Request extraction helpers

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;

/// `axum::Json` with rejections rendered as `{"error": message}` bad
/// requests, so malformed bodies share the error shape of every other
/// failure.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Deserialize an `f64` the way the service's callers send one: JSON
/// numbers pass through, numeric strings are parsed, anything else is
/// rejected. Combine with `#[serde(default)]` for the missing-field-is-zero
/// behavior.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid numeric value: '{}'", s))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: f64,
    }

    #[test]
    fn test_number_passes_through() {
        let probe: Probe = serde_json::from_str(r#"{"value": 2.5}"#).unwrap();
        assert_eq!(probe.value, 2.5);
    }

    #[test]
    fn test_integer_widens() {
        let probe: Probe = serde_json::from_str(r#"{"value": 7}"#).unwrap();
        assert_eq!(probe.value, 7.0);
    }

    #[test]
    fn test_numeric_string_parses() {
        let probe: Probe = serde_json::from_str(r#"{"value": " 3.25 "}"#).unwrap();
        assert_eq!(probe.value, 3.25);
    }

    #[test]
    fn test_missing_field_defaults_to_zero() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.value, 0.0);
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"value": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"value": null}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"value": {"a": 1}}"#).is_err());
    }
}
