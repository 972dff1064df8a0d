//! Startup configuration, loaded once from the environment.
//!
//! Every component receives an immutable, explicitly constructed `Config`
//! (wrapped in `Arc` where shared). Nothing here mutates after
//! `Config::from_env()` returns.

use std::env;

use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::error::ConfigError;

/// Market timezone the publication window is evaluated in.
pub const TIME_LOCATION: Tz = chrono_tz::Europe::Amsterdam;

/// Hour of day (market time) after which next-day prices are published.
const DEFAULT_PUBLICATION_HOUR: u32 = 15;

pub const LOADER_DRIVER_STUB: &str = "stub";
pub const LOADER_DRIVER_ENERGY_ZERO: &str = "energyzero";
pub const MESSENGER_DRIVER_TELEGRAM: &str = "telegram";

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub high_price: Decimal,
    pub low_price: Decimal,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub driver: String,
    pub incl_vat: bool,
    pub api: ApiConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: i64,
}

#[derive(Debug, Clone)]
pub struct MessengerConfig {
    pub driver: String,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub analytics: AnalyticsConfig,
    pub loader: LoaderConfig,
    pub server: ServerConfig,
    pub messenger: MessengerConfig,
    pub publication_hour: u32,
}

impl Config {
    /// Read the full configuration from environment variables and validate
    /// it. Callers are expected to have loaded `.env` beforehand (dotenvy).
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            analytics: AnalyticsConfig {
                high_price: decimal_var("HIGH_PRICE")?,
                low_price: decimal_var("LOW_PRICE")?,
            },
            loader: LoaderConfig {
                driver: string_var("LOADER_DRIVER"),
                incl_vat: bool_var("LOADER_INCL_VAT")?,
                api: ApiConfig {
                    endpoint: string_var("LOADER_API_ENDPOINT"),
                },
            },
            server: ServerConfig {
                port: parsed_var("SERVER_PORT", 0)?,
            },
            messenger: MessengerConfig {
                driver: string_var("MESSENGER_DRIVER"),
                telegram: TelegramConfig {
                    token: string_var("TELEGRAM_TOKEN"),
                    chat_id: parsed_var("TELEGRAM_CHAT_ID", 0)?,
                },
            },
            publication_hour: parsed_var("PUBLICATION_HOUR", DEFAULT_PUBLICATION_HOUR)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast self check. An unset threshold reads as zero, which is
    /// treated as unconfigured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analytics.high_price.is_zero() {
            return Err(ConfigError::Missing("HIGH_PRICE"));
        }
        if self.analytics.low_price.is_zero() {
            return Err(ConfigError::Missing("LOW_PRICE"));
        }

        match self.loader.driver.as_str() {
            LOADER_DRIVER_ENERGY_ZERO => {
                if self.loader.api.endpoint.is_empty() {
                    return Err(ConfigError::Missing("LOADER_API_ENDPOINT"));
                }
            }
            LOADER_DRIVER_STUB => {}
            "" => return Err(ConfigError::Missing("LOADER_DRIVER")),
            other => return Err(ConfigError::UnknownLoaderDriver(other.to_string())),
        }

        if self.server.port == 0 {
            return Err(ConfigError::Missing("SERVER_PORT"));
        }

        match self.messenger.driver.as_str() {
            MESSENGER_DRIVER_TELEGRAM => {
                if self.messenger.telegram.token.is_empty() {
                    return Err(ConfigError::Missing("TELEGRAM_TOKEN"));
                }
                if self.messenger.telegram.chat_id == 0 {
                    return Err(ConfigError::Missing("TELEGRAM_CHAT_ID"));
                }
            }
            "" => return Err(ConfigError::Missing("MESSENGER_DRIVER")),
            other => return Err(ConfigError::UnknownMessengerDriver(other.to_string())),
        }

        Ok(())
    }

    pub fn timezone(&self) -> Tz {
        TIME_LOCATION
    }
}

/// Deployment environment name, used by logging to pick an output format.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

fn string_var(name: &'static str) -> String {
    env::var(name).unwrap_or_default()
}

fn decimal_var(name: &'static str) -> Result<Decimal, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        Err(_) => Ok(Decimal::ZERO),
    }
}

fn bool_var(name: &'static str) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        Err(_) => Ok(false),
    }
}

fn parsed_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        Err(_) => Ok(default),
    }
}
