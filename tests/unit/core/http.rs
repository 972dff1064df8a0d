//! Unit tests for the publication window policy

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use gridwatch::config::TIME_LOCATION;
use gridwatch::core::http::check_availability;
use gridwatch::error::AvailabilityError;

const PUBLICATION_HOUR: u32 = 15;

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

fn market_time(year: i32, month: u32, dom: u32, hour: u32) -> DateTime<Tz> {
    TIME_LOCATION
        .with_ymd_and_hms(year, month, dom, hour, 30, 0)
        .unwrap()
}

#[test]
fn days_after_tomorrow_are_rejected_at_any_hour() {
    for hour in [0, 14, 23] {
        let now = market_time(2024, 6, 10, hour);
        assert_eq!(
            check_availability(day(2024, 6, 12), now, PUBLICATION_HOUR),
            Err(AvailabilityError::AfterTomorrow)
        );
    }
}

#[test]
fn tomorrow_is_rejected_before_the_publication_hour() {
    let now = market_time(2024, 6, 10, 14);
    assert_eq!(
        check_availability(day(2024, 6, 11), now, PUBLICATION_HOUR),
        Err(AvailabilityError::TooEarly)
    );
}

#[test]
fn tomorrow_is_available_from_the_publication_hour() {
    assert_eq!(
        check_availability(day(2024, 6, 11), market_time(2024, 6, 10, 15), PUBLICATION_HOUR),
        Ok(())
    );
    assert_eq!(
        check_availability(day(2024, 6, 11), market_time(2024, 6, 10, 20), PUBLICATION_HOUR),
        Ok(())
    );
}

#[test]
fn today_and_the_past_are_always_available() {
    let now = market_time(2024, 6, 10, 0);
    assert_eq!(
        check_availability(day(2024, 6, 10), now, PUBLICATION_HOUR),
        Ok(())
    );
    assert_eq!(
        check_availability(day(2024, 5, 1), now, PUBLICATION_HOUR),
        Ok(())
    );
}

#[test]
fn month_rollover_counts_tomorrow_correctly() {
    let now = market_time(2024, 6, 30, 14);
    assert_eq!(
        check_availability(day(2024, 7, 1), now, PUBLICATION_HOUR),
        Err(AvailabilityError::TooEarly)
    );
    assert_eq!(
        check_availability(day(2024, 7, 2), now, PUBLICATION_HOUR),
        Err(AvailabilityError::AfterTomorrow)
    );
}
