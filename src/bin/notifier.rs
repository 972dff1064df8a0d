//! One-shot notification run, meant to be triggered by external cron.
//!
//! Fetches tomorrow's day-ahead prices, classifies them against the
//! configured thresholds, and delivers the alert message followed by a PNG
//! chart to the messaging channel. Any failure is reported to the channel
//! as a short error notice and the process exits non-zero.

use chrono::{Days, NaiveDate, Utc};
use dotenvy::dotenv;
use gridwatch::config::Config;
use gridwatch::logging;
use gridwatch::services::loader::{self, PriceLoader};
use gridwatch::services::messenger::{self, Messenger};
use gridwatch::services::{analytics, chart};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let loader = match loader::from_config(&config.loader) {
        Ok(loader) => loader,
        Err(e) => {
            error!(error = %e, "failed to build price loader");
            std::process::exit(1);
        }
    };

    let messenger = match messenger::from_config(&config.messenger) {
        Ok(messenger) => messenger,
        Err(e) => {
            error!(error = %e, "failed to build messenger");
            std::process::exit(1);
        }
    };

    let tomorrow = Utc::now().with_timezone(&config.timezone()).date_naive() + Days::new(1);

    info!(day = %tomorrow, "starting notification run");

    if let Err(e) = run(&config, loader.as_ref(), messenger.as_ref(), tomorrow).await {
        error!(error = %e, day = %tomorrow, "notification run failed");

        // Best effort: tell the channel the day's notice is missing. A
        // second delivery failure is only logged.
        let notice = format!("Error generating {}", tomorrow.format("%Y-%m-%d"));
        if let Err(e) = messenger.send_text(&notice, false).await {
            error!(error = %e, "failed to deliver the error notice");
        }
        std::process::exit(1);
    }

    info!(day = %tomorrow, "notification run finished");
}

async fn run(
    config: &Config,
    loader: &dyn PriceLoader,
    messenger: &dyn Messenger,
    day: NaiveDate,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let prices = loader.fetch_prices(day).await?;
    let classification = analytics::classify(&prices, &config.analytics);
    let message = analytics::price_message(day, classification);
    let png = chart::chart_png(&config.analytics, &prices, day)?;

    messenger.send_text(&message, false).await?;
    messenger
        .send_chart(&format!("EPEX NL {}", day.format("%Y-%m-%d")), png)
        .await?;

    Ok(())
}
