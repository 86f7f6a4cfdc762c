//! Weather favorites and the measurement unit setting.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// One saved city.
///
/// `city` is the natural key and is compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Favorite {
    pub city: String,
    pub country: String,
}

impl Favorite {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("city", &self.city)
    }
}

/// Measurement system requested from the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Fahrenheit, miles per hour.
    #[default]
    Imperial,
    /// Celsius, meters per second.
    Metric,
}

impl UnitSystem {
    /// Query parameter value understood by the weather API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
        }
    }

    /// Parses a stored unit value. Accepts both API names and the labels
    /// shown by the settings screen ("Imperial (F)", "Metric (C)").
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.starts_with("imperial") {
            Some(Self::Imperial)
        } else if normalized.starts_with("metric") {
            Some(Self::Metric)
        } else {
            None
        }
    }
}

/// Persisted unit choice. The settings table is expected to hold at most one
/// row; the first row wins when reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitSetting {
    pub unit: String,
}

impl UnitSetting {
    pub fn new(unit: UnitSystem) -> Self {
        Self {
            unit: unit.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("unit", &self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::UnitSystem;

    #[test]
    fn unit_parse_accepts_labels_and_api_names() {
        assert_eq!(UnitSystem::parse("metric"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::parse("Imperial (F)"), Some(UnitSystem::Imperial));
        assert_eq!(UnitSystem::parse(" Metric (C) "), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::parse("kelvin"), None);
    }
}
