//! Domain models.

pub mod price_data;

pub use price_data::{PriceData, PriceEntry, PriceSeries};
