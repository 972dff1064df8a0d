//! HTTP endpoint server using Axum.
//!
//! Exposes the index, a health check, and the on-demand day-price view.
//! Each request is handled independently; the only shared state is the
//! immutable configuration and the drivers built from it at startup.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::error::AvailabilityError;
use crate::services::chart;
use crate::services::loader::PriceLoader;
use crate::services::messenger::Messenger;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub loader: Arc<dyn PriceLoader>,
    pub messenger: Arc<dyn Messenger>,
}

pub async fn index_handler() -> &'static str {
    "Welcome to DA price notificator!"
}

pub async fn health_check() -> &'static str {
    "healthy"
}

#[derive(Debug, Deserialize)]
pub struct DayPricesQuery {
    format: Option<String>,
}

/// Publication window policy for the day-price view.
///
/// `now` is the current instant in market time. Days after tomorrow are
/// never available; tomorrow becomes available once the market publishes,
/// at `publication_hour`. Today and the past always pass.
pub fn check_availability(
    day: NaiveDate,
    now: DateTime<Tz>,
    publication_hour: u32,
) -> Result<(), AvailabilityError> {
    let tomorrow = now.date_naive() + Days::new(1);
    if day > tomorrow {
        return Err(AvailabilityError::AfterTomorrow);
    }
    if day == tomorrow && now.hour() < publication_hour {
        return Err(AvailabilityError::TooEarly);
    }
    Ok(())
}

/// `GET /day-prices/{YYYY-MM-DD}`: fetch the day's series and answer with
/// the SVG chart, or the text chart when `?format=text` is given.
async fn day_prices_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<DayPricesQuery>,
) -> Response {
    let Ok(day) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        return (StatusCode::BAD_REQUEST, "Invalid date value").into_response();
    };

    let now = Utc::now().with_timezone(&state.config.timezone());
    if let Err(e) = check_availability(day, now, state.config.publication_hour) {
        return (StatusCode::NOT_FOUND, e.to_string()).into_response();
    }

    let prices = match state.loader.fetch_prices(day).await {
        Ok(prices) => prices,
        Err(e) => {
            error!(error = %e, %day, "failed to fetch day prices");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let text_chart = chart::chart_text(&state.config.analytics, &prices);

    // Notification is a side effect of this view: a delivery failure is
    // logged but never fails the response.
    if let Err(e) = state.messenger.send_text(&text_chart, true).await {
        error!(error = %e, %day, "failed to notify the channel");
    }

    if query.format.as_deref() == Some("text") {
        return text_chart.into_response();
    }

    match chart::chart_svg(&state.config.analytics, &prices, day) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => {
            error!(error = %e, %day, "failed to render day-price chart");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1/healthcheck", get(health_check))
        .route("/day-prices/{date}", get(day_prices_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
