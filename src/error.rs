//! Error taxonomy shared by both binaries.

use chrono::NaiveDate;
use thiserror::Error;

/// Startup configuration failures. Never recovered: the process logs the
/// error and exits before serving.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("unknown loader driver: {0}")]
    UnknownLoaderDriver(String),

    #[error("unknown messenger driver: {0}")]
    UnknownMessengerDriver(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Price fetch failures. Surfaced as a 500 to the triggering request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch data from API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to build request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to fetch data from API, status code: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode price data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no prices available")]
    NoPrices,

    #[error("no valid local time for {0}")]
    InvalidDate(NaiveDate),
}

/// Chart backend failures. Surfaced as a 500, like fetch failures.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to draw chart: {0}")]
    Draw(String),

    #[error("chart I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Messaging delivery failures. Logged and reported to the caller; the
/// process never continues as if the message was sent.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("error sending message: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("messaging API rejected the request ({status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Requested day outside the publication window. Surfaced as a 404 with an
/// explanatory body: an availability statement, not a server fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Day is in the future after tomorrow")]
    AfterTomorrow,

    #[error("Day is tomorrow but it's too early")]
    TooEarly,
}
