//! Chart rendering for one day of hourly prices.
//!
//! Three artifact forms share the same threshold styling rules: an SVG bar
//! chart for the HTTP view, a PNG bar chart for messaging attachments, and
//! a glyph-bar text chart for plain or MarkdownV2 message bodies.

use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::error::RenderError;

pub const CHART_WIDTH: u32 = 820;
pub const CHART_HEIGHT: u32 = 520;

/// Width of the text chart, in bar glyphs.
const TEXT_CHART_WIDTH: usize = 30;

const BAR_GLYPH: &str = "█";

/// Bar color for image charts. Inclusive on both thresholds, unlike the
/// text-chart marker which is strict on the high side.
fn bar_color(price: Decimal, analytics: &AnalyticsConfig) -> RGBColor {
    if price <= analytics.low_price {
        GREEN
    } else if price >= analytics.high_price {
        RED
    } else {
        BLUE
    }
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analytics: &AnalyticsConfig,
    prices: &[Decimal],
    day: NaiveDate,
) -> Result<(), RenderError> {
    root.fill(&WHITE)
        .map_err(|e| RenderError::Draw(e.to_string()))?;

    let values: Vec<f64> = prices
        .iter()
        .map(|price| price.to_f64().unwrap_or(0.0))
        .collect();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Pad the value range; bars grow from zero so keep it in view. The
    // epsilon keeps a constant series from collapsing the axis.
    let padding = (max - min).max(1e-8) * 0.1;
    let y_min = (min - padding).min(0.0);
    let y_max = max + padding;

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("EPEX NL {}", day.format("%Y-%m-%d")),
            ("sans-serif", 28.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..values.len() as f64, y_min..y_max)
        .map_err(|e| RenderError::Draw(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(values.len())
        .x_label_formatter(&|x| format!("{:02}:00", *x as usize))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()
        .map_err(|e| RenderError::Draw(e.to_string()))?;

    chart
        .draw_series(values.iter().enumerate().map(|(hour, value)| {
            let color = bar_color(prices[hour], analytics);
            Rectangle::new(
                [(hour as f64 + 0.1, 0.0), (hour as f64 + 0.9, *value)],
                color.filled(),
            )
        }))
        .map_err(|e| RenderError::Draw(e.to_string()))?;

    root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
    Ok(())
}

/// Render the day's prices as an SVG bar chart.
pub fn chart_svg(
    analytics: &AnalyticsConfig,
    prices: &[Decimal],
    day: NaiveDate,
) -> Result<String, RenderError> {
    info!(day = %day, "generating SVG chart");

    let mut buffer = String::new();
    {
        let root =
            SVGBackend::with_string(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        draw_bars(&root, analytics, prices, day)?;
    }
    Ok(buffer)
}

/// Render the day's prices as PNG bytes, suitable for a photo attachment.
pub fn chart_png(
    analytics: &AnalyticsConfig,
    prices: &[Decimal],
    day: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    info!(day = %day, "generating PNG chart");

    let temp_file = std::env::temp_dir().join(format!(
        "gridwatch_chart_{}.png",
        chrono::Utc::now().timestamp_millis()
    ));
    {
        let root =
            BitMapBackend::new(&temp_file, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        draw_bars(&root, analytics, prices, day)?;
    }

    let image_data = std::fs::read(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);
    Ok(image_data)
}

/// Text chart in the message-body format: MarkdownV2 markers on.
pub fn chart_text(analytics: &AnalyticsConfig, prices: &[Decimal]) -> String {
    render_text_bars(analytics, prices, TEXT_CHART_WIDTH, true)
}

/// One line per entry: zero-padded hour label, a glyph bar proportional to
/// `(value - min + scale) / scale` with `scale = |max - min| / width`
/// (defaulting to 1 when max is zero or the range collapses), and the
/// two-decimal price. With `markdown` set the output targets Telegram
/// MarkdownV2: backticked labels, escaped dots, `_` around entries at or
/// below the low threshold and `*` around entries strictly above the high
/// one.
pub fn render_text_bars(
    analytics: &AnalyticsConfig,
    prices: &[Decimal],
    width: usize,
    markdown: bool,
) -> String {
    let Some(first) = prices.first() else {
        return String::new();
    };

    let mut max = *first;
    let mut min = *first;
    for price in prices {
        if *price > max {
            max = *price;
        }
        if *price < min {
            min = *price;
        }
    }
    let max_f = max.to_f64().unwrap_or(0.0);
    let min_f = min.to_f64().unwrap_or(0.0);

    let mut scale = 0.0;
    if max_f != 0.0 {
        scale = (max_f - min_f).abs() / width as f64;
    }
    if scale == 0.0 {
        scale = 1.0;
    }

    let mut message = String::new();
    for (hour, price) in prices.iter().enumerate() {
        let value = price.to_f64().unwrap_or(0.0);
        let bar = BAR_GLYPH.repeat(((value - min_f + scale) / scale) as usize);

        let mut marker = "";
        let mut label_font = "";
        let mut price_string = format!("{:.2}", price);
        if markdown {
            if *price <= analytics.low_price {
                marker = "_";
            } else if *price > analytics.high_price {
                marker = "*";
            }
            price_string = price_string.replace('.', "\\.");
            label_font = "`";
        }

        message.push_str(&format!(
            "{font}{hour:02}:00{font} {bar} {marker}{price}{marker}\n",
            font = label_font,
            hour = hour,
            bar = bar,
            marker = marker,
            price = price_string,
        ));
    }

    message
}
