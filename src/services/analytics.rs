//! Threshold classification over an hourly price series.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AnalyticsConfig;

/// Outcome of one linear scan against the configured thresholds. A single
/// value at or beyond both bounds sets both flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub high_detected: bool,
    pub low_detected: bool,
}

impl Classification {
    /// Alert line for the notification message, if any threshold fired.
    pub fn alert_line(&self) -> Option<&'static str> {
        match (self.high_detected, self.low_detected) {
            (true, true) => Some("There are High/Low prices"),
            (true, false) => Some("There are High prices"),
            (false, true) => Some("There are Low prices"),
            (false, false) => None,
        }
    }
}

/// Scan the series once: high when `>= high_price`, low when `<= low_price`,
/// inclusive on both ends.
pub fn classify(prices: &[Decimal], analytics: &AnalyticsConfig) -> Classification {
    let mut result = Classification::default();
    for price in prices {
        if *price >= analytics.high_price {
            result.high_detected = true;
        }
        if *price <= analytics.low_price {
            result.low_detected = true;
        }
    }
    result
}

/// Notification text for one day: title plus the alert line when a
/// threshold fired. No alert line is appended otherwise.
pub fn price_message(day: NaiveDate, classification: Classification) -> String {
    let mut message = format!("EPEX NL Day-Ahead {}", day.format("%Y-%m-%d"));
    if let Some(line) = classification.alert_line() {
        message.push('\n');
        message.push_str(line);
    }
    message
}
