//! Journey domain types and errors.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::journey::unravel::UnravelError;

/// One stop reference inside a journey.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Numeric location code; the leading digits identify the country.
    #[serde(deserialize_with = "string_or_number")]
    pub eva_number: String,
    #[serde(default)]
    pub name: String,
}

/// A train run as reported by the journey data service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(deserialize_with = "string_or_number")]
    pub journey_number: String,
    pub category: String,
    pub train_name: String,
    pub journey_id: String,
    pub first_stop: Stop,
    pub last_stop: Stop,
}

impl Journey {
    pub fn is_bus(&self) -> bool {
        self.category.eq_ignore_ascii_case("bus")
    }

    /// True if the run starts or ends at a location with `prefix`.
    pub fn touches_country(&self, prefix: &str) -> bool {
        self.first_stop.eva_number.starts_with(prefix) || self.last_stop.eva_number.starts_with(prefix)
    }

    pub fn label(&self) -> String {
        format!("{}: {} → {}", self.train_name, self.first_stop.name, self.last_stop.name)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// A journey offered for disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyMatch {
    pub label: String,
    pub link: String,
}

/// Result of a journey lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyOutcome {
    NoMatch,
    /// Exactly one journey matched; redirect straight to it.
    Single(String),
    /// Several journeys matched, in upstream order.
    Choices(Vec<JourneyMatch>),
}

/// Errors raised while resolving a journey.
#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("invalid journey number '{0}'")]
    InvalidNumber(String),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("journey data service unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    #[error("journey data missing: {0}")]
    MissingData(String),

    #[error("malformed journey data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot unravel journey data: {0}")]
    Unravel(#[from] UnravelError),
}

impl JourneyError {
    /// Whether the error comes from the request rather than from resolution.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            JourneyError::InvalidNumber(_) | JourneyError::InvalidDate(_) | JourneyError::UnknownCountry(_)
        )
    }
}

pub type JourneyResult<T> = Result<T, JourneyError>;
