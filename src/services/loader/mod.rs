//! Price loader drivers, selected by configuration string.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::{LoaderConfig, LOADER_DRIVER_ENERGY_ZERO, LOADER_DRIVER_STUB};
use crate::error::{ConfigError, FetchError};
use crate::models::PriceSeries;

pub mod energy_zero;
pub mod stub;

pub use energy_zero::EnergyZeroLoader;
pub use stub::StubLoader;

/// A source of day-ahead price series.
///
/// One bounded attempt per call, no retries: a failure is surfaced to the
/// caller immediately, and a successful series is never empty.
#[async_trait]
pub trait PriceLoader: Send + Sync + std::fmt::Debug {
    async fn fetch_prices(&self, day: NaiveDate) -> Result<PriceSeries, FetchError>;
}

/// Build the loader named by the configuration. Unknown driver names were
/// already rejected by `Config::validate`, but construction checks again so
/// a loader can never exist for a driver the process does not know.
pub fn from_config(config: &LoaderConfig) -> Result<Arc<dyn PriceLoader>, ConfigError> {
    match config.driver.as_str() {
        LOADER_DRIVER_ENERGY_ZERO => Ok(Arc::new(EnergyZeroLoader::new(config)?)),
        LOADER_DRIVER_STUB => Ok(Arc::new(StubLoader)),
        other => Err(ConfigError::UnknownLoaderDriver(other.to_string())),
    }
}
