//! Test utilities for HTTP front integration tests

use std::sync::Arc;

use axum_test::TestServer;
use chrono::Days;
use gridwatch::config::{
    AnalyticsConfig, ApiConfig, Config, LoaderConfig, MessengerConfig, ServerConfig,
    TelegramConfig, TIME_LOCATION,
};
use gridwatch::core::http::{create_router, AppState};
use gridwatch::services::loader;
use gridwatch::services::messenger::TelegramMessenger;
use rust_decimal_macros::dec;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The HTTP front under test, wired to mocked pricing and messaging APIs.
pub struct TestApp {
    pub server: TestServer,
    pub pricing_api: MockServer,
    pub messaging_api: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let pricing_api = MockServer::start().await;
        let messaging_api = MockServer::start().await;
        mock_message_delivery(&messaging_api).await;

        let config = test_config(pricing_api.uri());
        let loader = loader::from_config(&config.loader).expect("build price loader");
        let messenger = Arc::new(
            TelegramMessenger::with_base_url(&config.messenger.telegram, messaging_api.uri())
                .expect("build messenger"),
        );

        let state = AppState {
            config: Arc::new(config),
            loader,
            messenger,
        };
        let server = TestServer::new(create_router(state)).expect("start test server");

        Self {
            server,
            pricing_api,
            messaging_api,
        }
    }
}

pub fn test_config(endpoint: String) -> Config {
    Config {
        analytics: AnalyticsConfig {
            high_price: dec!(0.2),
            low_price: dec!(0.1),
        },
        loader: LoaderConfig {
            driver: "energyzero".to_string(),
            incl_vat: true,
            api: ApiConfig { endpoint },
        },
        server: ServerConfig { port: 8080 },
        messenger: MessengerConfig {
            driver: "telegram".to_string(),
            telegram: TelegramConfig {
                token: "test".to_string(),
                chat_id: 123,
            },
        },
        publication_hour: 15,
    }
}

pub async fn mock_day_prices(server: &MockServer, prices: Vec<f64>) {
    let entries: Vec<serde_json::Value> = prices
        .into_iter()
        .map(|price| serde_json::json!({ "price": price }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/energyprices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "Prices": entries })),
        )
        .mount(server)
        .await;
}

pub async fn mock_message_delivery(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/bottest/sendMessage"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })),
        )
        .mount(server)
        .await;
}

/// Today in market time: always inside the availability window.
pub fn today() -> String {
    chrono::Utc::now()
        .with_timezone(&TIME_LOCATION)
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}

/// Far past the window no matter the time of day.
pub fn far_future() -> String {
    (chrono::Utc::now()
        .with_timezone(&TIME_LOCATION)
        .date_naive()
        + Days::new(30))
    .format("%Y-%m-%d")
    .to_string()
}
