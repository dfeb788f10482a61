//! Journey data retrieval.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::config::JourneyConfig;
use crate::journey::types::{JourneyError, JourneyResult};

/// Supplies the flat backing array for a `(number, date)` query.
#[async_trait]
pub trait JourneySource: Send + Sync {
    async fn fetch(&self, number: &str, date: NaiveDate) -> JourneyResult<Vec<Value>>;
}

/// [`JourneySource`] backed by an HTTP JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpJourneySource {
    client: reqwest::Client,
    endpoint: String,
    data_pointer: String,
}

impl HttpJourneySource {
    pub fn new(config: &JourneyConfig, timeout: Duration) -> JourneyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quicksearch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            data_pointer: config.data_pointer.clone(),
        })
    }

    fn url(&self, number: &str, date: NaiveDate) -> String {
        self.endpoint
            .replace("{number}", &utf8_percent_encode(number, NON_ALPHANUMERIC).to_string())
            .replace("{date}", &date.format("%Y-%m-%d").to_string())
    }
}

#[async_trait]
impl JourneySource for HttpJourneySource {
    async fn fetch(&self, number: &str, date: NaiveDate) -> JourneyResult<Vec<Value>> {
        let url = self.url(number, date);
        tracing::debug!(url = %url, "Fetching journey data");

        let mut body: Value = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body.pointer_mut(&self.data_pointer).map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(JourneyError::MissingData(format!(
                "'{}' is not an array",
                self.data_pointer
            ))),
            None => Err(JourneyError::MissingData(format!(
                "no value at '{}'",
                self.data_pointer
            ))),
        }
    }
}
