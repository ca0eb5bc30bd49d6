//! Fuel-input validation.
//!
//! The backend owns the fuel-needed arithmetic. This side only decides
//! whether the current inputs are complete enough to ask for it.

use serde::{Deserialize, Serialize};

/// How the driver expressed the current fuel reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelInputType {
    /// Percentage of the tank (0–100).
    #[serde(rename = "percent")]
    Percent,
    /// Absolute volume in gallons.
    #[serde(rename = "gallon")]
    Volume,
}

impl std::fmt::Display for FuelInputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuelInputType::Percent => write!(f, "percent"),
            FuelInputType::Volume => write!(f, "gallon"),
        }
    }
}

/// A validated fuel-needed request, ready to send.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelRequest {
    pub input_type: FuelInputType,
    pub value: f64,
    #[serde(rename = "tank_size")]
    pub tank_capacity: f64,
}

/// Decide whether a fuel-needed request should be issued.
///
/// Returns `None` when either input is missing, zero, negative, or not a
/// finite number. That is a silent no-op for the caller, not an error.
/// Percentages above 100 are clamped.
#[must_use]
pub fn estimate(
    input_type: FuelInputType,
    value: Option<f64>,
    tank_capacity: Option<f64>,
) -> Option<FuelRequest> {
    let value = value.filter(|v| is_positive_finite(*v))?;
    let tank_capacity = tank_capacity.filter(|v| is_positive_finite(*v))?;

    let value = match input_type {
        FuelInputType::Percent => value.min(100.0),
        FuelInputType::Volume => value,
    };

    Some(FuelRequest {
        input_type,
        value,
        tank_capacity,
    })
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
