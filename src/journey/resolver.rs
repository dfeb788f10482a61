//! Journey number → deep link resolution.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::journey::countries::numeric_prefix;
use crate::journey::source::JourneySource;
use crate::journey::types::{Journey, JourneyError, JourneyMatch, JourneyOutcome, JourneyResult};
use crate::journey::unravel::unravel;

/// Fixed parameters of journey resolution, taken from config at startup.
#[derive(Debug, Clone)]
pub struct JourneySettings {
    pub link_template: String,
    pub home_country: String,
    pub time_zone: Tz,
    pub max_depth: usize,
    pub max_nodes: usize,
}

#[derive(Clone)]
pub struct TrainJourneyResolver {
    source: Arc<dyn JourneySource>,
    settings: JourneySettings,
}

impl TrainJourneyResolver {
    pub fn new(source: Arc<dyn JourneySource>, settings: JourneySettings) -> Self {
        Self { source, settings }
    }

    /// Find runs of `number` on `date` (today in the configured zone if
    /// absent) that start or end in `country` (home country if absent).
    pub async fn resolve(
        &self,
        number: &str,
        date: Option<&str>,
        country: Option<&str>,
    ) -> JourneyResult<JourneyOutcome> {
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(JourneyError::InvalidNumber(number.to_string()));
        }

        let date = match date {
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| JourneyError::InvalidDate(text.to_string()))?,
            None => self.today(),
        };

        let country = country.unwrap_or(&self.settings.home_country);
        let prefix =
            numeric_prefix(country).ok_or_else(|| JourneyError::UnknownCountry(country.to_string()))?;

        let structure = self.source.fetch(number, date).await?;
        let root = unravel(&structure, 0, self.settings.max_depth, self.settings.max_nodes)?;
        let journeys = extract_journeys(root)?;
        let total = journeys.len();

        let mut matches: Vec<JourneyMatch> = journeys
            .into_iter()
            .filter(|j| j.touches_country(prefix) && !j.is_bus())
            .map(|j| JourneyMatch {
                label: j.label(),
                link: self.link(&j),
            })
            .collect();

        tracing::debug!(
            number,
            %date,
            country,
            total,
            matched = matches.len(),
            "Journeys filtered"
        );

        Ok(match matches.len() {
            0 => JourneyOutcome::NoMatch,
            1 => JourneyOutcome::Single(matches.remove(0).link),
            _ => JourneyOutcome::Choices(matches),
        })
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.settings.time_zone).date_naive()
    }

    fn link(&self, journey: &Journey) -> String {
        self.settings
            .link_template
            .replace("{journey_id}", &encode(&journey.journey_id))
            .replace("{category}", &encode(&journey.category))
            .replace("{number}", &encode(&journey.journey_number))
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// The root is either the journey list itself or a mapping holding it
/// under `journeys`.
fn extract_journeys(root: Value) -> JourneyResult<Vec<Journey>> {
    let list = match root {
        Value::Array(_) => root,
        Value::Object(mut fields) => fields
            .remove("journeys")
            .ok_or_else(|| JourneyError::MissingData("root has no 'journeys' field".to_string()))?,
        other => {
            return Err(JourneyError::MissingData(format!(
                "unexpected root value {other}"
            )))
        }
    };
    Ok(serde_json::from_value(list)?)
}
