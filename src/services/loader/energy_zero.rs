//! EnergyZero day-ahead price driver.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::StatusCode;
use tracing::info;
use url::Url;

use crate::config::{LoaderConfig, TIME_LOCATION};
use crate::error::{ConfigError, FetchError};
use crate::models::{PriceData, PriceSeries};

use super::PriceLoader;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The API expects UTC instants with millisecond precision.
const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug)]
pub struct EnergyZeroLoader {
    client: reqwest::Client,
    endpoint: String,
    incl_vat: bool,
    timezone: Tz,
}

impl EnergyZeroLoader {
    pub fn new(config: &LoaderConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: config.api.endpoint.clone(),
            incl_vat: config.incl_vat,
            timezone: TIME_LOCATION,
        })
    }

    /// The fetch window covers the whole requested day in market time,
    /// rendered as UTC instants.
    fn day_window(&self, day: NaiveDate) -> Result<(String, String), FetchError> {
        let start = self
            .timezone
            .from_local_datetime(&day.and_time(NaiveTime::MIN))
            .earliest()
            .ok_or(FetchError::InvalidDate(day))?;
        let end_naive = day
            .and_hms_opt(23, 59, 59)
            .ok_or(FetchError::InvalidDate(day))?;
        let end = self
            .timezone
            .from_local_datetime(&end_naive)
            .earliest()
            .ok_or(FetchError::InvalidDate(day))?;

        Ok((
            start.with_timezone(&Utc).format(API_DATE_FORMAT).to_string(),
            end.with_timezone(&Utc).format(API_DATE_FORMAT).to_string(),
        ))
    }
}

#[async_trait]
impl PriceLoader for EnergyZeroLoader {
    async fn fetch_prices(&self, day: NaiveDate) -> Result<PriceSeries, FetchError> {
        let (from_date, till_date) = self.day_window(day)?;
        let url = Url::parse_with_params(
            &format!("{}/energyprices", self.endpoint),
            &[
                ("fromDate", from_date.as_str()),
                ("tillDate", till_date.as_str()),
                ("interval", "4"),
                ("usageType", "1"),
                ("inclBtw", if self.incl_vat { "true" } else { "false" }),
            ],
        )?;

        info!(%url, "fetching day-ahead prices");

        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let data: PriceData = serde_json::from_str(&body)?;
        if data.prices.is_empty() {
            return Err(FetchError::NoPrices);
        }

        Ok(data.into_series())
    }
}
