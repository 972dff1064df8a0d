//! Unit tests for chart rendering

use chrono::NaiveDate;
use gridwatch::config::AnalyticsConfig;
use gridwatch::services::chart::{chart_png, chart_svg, chart_text, render_text_bars};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn thresholds() -> AnalyticsConfig {
    AnalyticsConfig {
        high_price: dec!(0.2),
        low_price: dec!(0.1),
    }
}

fn june_tenth() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

#[test]
fn text_chart_has_one_line_per_entry_with_hour_labels() {
    let prices = vec![dec!(0.15); 24];
    let text = render_text_bars(&thresholds(), &prices, 30, false);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 24);
    assert!(lines[0].starts_with("00:00 "));
    assert!(lines[9].starts_with("09:00 "));
    assert!(lines[23].starts_with("23:00 "));
}

#[test]
fn bar_length_is_proportional_to_the_value() {
    let prices = vec![dec!(0.0), dec!(0.3)];
    let text = render_text_bars(&thresholds(), &prices, 30, false);
    let bars: Vec<usize> = text.lines().map(|l| l.matches('█').count()).collect();

    // scale = (max - min) / width; lengths are (value - min + scale) / scale
    assert_eq!(bars[0], 1);
    assert_eq!(bars[1], 31);
}

#[test]
fn constant_zero_series_falls_back_to_unit_scale() {
    let prices = vec![dec!(0); 24];
    let text = render_text_bars(&thresholds(), &prices, 30, false);

    assert_eq!(text.lines().count(), 24);
    for line in text.lines() {
        assert_eq!(line.matches('█').count(), 1);
    }
}

#[test]
fn markdown_marks_low_and_strictly_high_entries() {
    // 0.2 sits exactly on the high threshold: the classifier alerts on it,
    // but the text marker only wraps strictly greater entries.
    let prices = vec![dec!(0.05), dec!(0.2), dec!(0.25)];
    let text = render_text_bars(&thresholds(), &prices, 30, true);
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("`00:00`"));
    assert!(lines[0].ends_with("_0\\.05_"));
    assert!(lines[1].ends_with(" 0\\.20"));
    assert!(lines[2].ends_with("*0\\.25*"));
}

#[test]
fn plain_mode_has_no_markup() {
    let prices = vec![dec!(0.05), dec!(0.25)];
    let text = render_text_bars(&thresholds(), &prices, 30, false);

    assert!(!text.contains('_'));
    assert!(!text.contains('*'));
    assert!(!text.contains('`'));
    assert!(!text.contains('\\'));
}

#[test]
fn empty_series_renders_empty() {
    assert_eq!(render_text_bars(&thresholds(), &[], 30, true), "");
}

#[test]
fn chart_text_targets_markdown_messages() {
    let prices = vec![dec!(0.05), dec!(0.15)];
    let text = chart_text(&thresholds(), &prices);

    assert!(text.contains("`00:00`"));
    assert!(text.contains("\\."));
}

#[test]
fn svg_chart_carries_the_day_caption() {
    let prices: Vec<Decimal> = (0..24).map(|hour| Decimal::new(10 + hour, 2)).collect();
    let svg = chart_svg(&thresholds(), &prices, june_tenth()).unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("EPEX NL 2024-06-10"));
}

#[test]
fn svg_chart_handles_a_constant_series() {
    let prices = vec![dec!(0); 24];
    let svg = chart_svg(&thresholds(), &prices, june_tenth()).unwrap();

    assert!(svg.contains("<svg"));
}

#[test]
fn png_chart_produces_png_bytes() {
    let prices = vec![dec!(0.15); 24];
    let png = chart_png(&thresholds(), &prices, june_tenth()).unwrap();

    assert!(png.len() > 8);
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
