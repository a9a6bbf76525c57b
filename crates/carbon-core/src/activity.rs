//! Per-activity emission factors
//!
//! Converts a single activity quantity (distance, mass, energy) into an
//! emissions estimate using a fixed factor table.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ActivityError;

/// Activity categories with a known emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Car,
    Bus,
    Train,
    Plane,
    Meat,
    Electricity,
    Waste,
}

impl ActivityKind {
    /// Emission factor in kg CO2 per unit (km, gram, kWh, or kg).
    pub fn factor(&self) -> f64 {
        match self {
            ActivityKind::Car => 0.2,
            ActivityKind::Bus => 0.05,
            ActivityKind::Train => 0.04,
            ActivityKind::Plane => 0.25,
            ActivityKind::Meat => 0.003,
            ActivityKind::Electricity => 0.5,
            ActivityKind::Waste => 0.5,
        }
    }

    /// Payload field holding this activity's quantity. Distance-based
    /// kinds without a dedicated field fall through to `distance`.
    fn quantity_field(&self) -> &'static str {
        match self {
            ActivityKind::Car => "distance",
            ActivityKind::Meat => "grams",
            ActivityKind::Electricity => "kwh",
            ActivityKind::Waste => "kg",
            _ => "distance",
        }
    }
}

impl FromStr for ActivityKind {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(ActivityKind::Car),
            "bus" => Ok(ActivityKind::Bus),
            "train" => Ok(ActivityKind::Train),
            "plane" => Ok(ActivityKind::Plane),
            "meat" => Ok(ActivityKind::Meat),
            "electricity" => Ok(ActivityKind::Electricity),
            "waste" => Ok(ActivityKind::Waste),
            _ => Err(ActivityError::UnknownActivity),
        }
    }
}

/// Emissions for one activity: the kind's quantity field (missing fields
/// read as zero) times its emission factor.
pub fn calculate(kind: &str, data: &Map<String, Value>) -> Result<f64, ActivityError> {
    let kind = ActivityKind::from_str(kind)?;
    let quantity = quantity_from(data, kind.quantity_field())?;
    Ok(quantity * kind.factor())
}

/// Read a numeric payload field. Numbers and numeric strings both coerce;
/// a missing field reads as zero.
fn quantity_from(data: &Map<String, Value>, field: &'static str) -> Result<f64, ActivityError> {
    match data.get(field) {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ActivityError::InvalidQuantity {
            field,
            message: format!("'{}' is out of range", n),
        }),
        Some(Value::String(s)) => {
            s.trim()
                .parse()
                .map_err(|_| ActivityError::InvalidQuantity {
                    field,
                    message: format!("'{}' is not a number", s),
                })
        }
        Some(other) => Err(ActivityError::InvalidQuantity {
            field,
            message: format!("expected a number, got {}", other),
        }),
    }
}
