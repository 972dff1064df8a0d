//! Wire model for the pricing API response.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One hourly reading as returned by the pricing API.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceEntry {
    pub price: Decimal,
    #[serde(rename = "readingDate", default)]
    pub reading_date: String,
}

/// Response body shape: `{"Prices": [{"price": 0.15, "readingDate": ...}]}`.
/// The lowercase `prices` alias matches what the original Go unmarshaller
/// accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceData {
    #[serde(rename = "Prices", alias = "prices")]
    pub prices: Vec<PriceEntry>,
}

impl PriceData {
    /// Eager transform into the hourly price series, response order
    /// preserved (index = hour of day).
    pub fn into_series(self) -> PriceSeries {
        self.prices.into_iter().map(|entry| entry.price).collect()
    }
}

/// Ordered hourly prices for one day, discarded after a single
/// request/response cycle.
pub type PriceSeries = Vec<Decimal>;
