//! Day-ahead electricity price notifier.
//!
//! Fetches hourly day-ahead prices from a pricing API, classifies them
//! against configured high/low thresholds, renders bar charts and pushes
//! alerts to a messaging channel. Two entry points share this library:
//! `bin/server` (HTTP front) and `bin/notifier` (one-shot cron run).

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
