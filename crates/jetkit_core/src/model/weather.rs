//! Weather payload returned by the remote forecast service.

use super::favorite::UnitSystem;
use serde::{Deserialize, Serialize};

/// Reduced forecast payload. Only fields consumed by derived views are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub units: UnitSystem,
    /// Current temperature in the requested unit system.
    pub temp: f64,
    pub humidity: u8,
    pub description: String,
    /// Unix epoch seconds of the observation.
    pub observed_at: i64,
}
