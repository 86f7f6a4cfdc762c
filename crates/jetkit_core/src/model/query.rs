//! Query keys parameterizing remote fetches.
//!
//! Value-equal keys denote the same logical request.

use super::favorite::UnitSystem;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Current conditions for one city in one unit system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeatherQuery {
    pub city: String,
    pub units: UnitSystem,
}

impl WeatherQuery {
    /// Builds a key from user input. Returns `None` for blank cities.
    ///
    /// Accepts `"City, Country"` titles and keeps only the city part.
    pub fn new(city: &str, units: UnitSystem) -> Option<Self> {
        let city = city.split(',').next().unwrap_or_default();
        let city = collapse_whitespace(city)?;
        Some(Self { city, units })
    }
}

/// Free-text book search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims and collapses whitespace. Empty input yields `None`, so blank
    /// searches are never issued.
    pub fn parse(text: &str) -> Option<Self> {
        collapse_whitespace(text).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn collapse_whitespace(value: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(value.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}
