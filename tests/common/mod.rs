//! Common test utilities module
//!
//! Provides shared helpers for building timestamps and sample series.

#![allow(dead_code)]

use timeseries::temporal::parse_iso;
use timeseries::{TimeSeries, Timestamp};

/// Parse an ISO date string, panicking on malformed test input.
pub fn date(s: &str) -> Timestamp {
    parse_iso(s).unwrap()
}

/// Build a series from ISO date strings and values.
pub fn series(dates: &[&str], values: Vec<f64>) -> TimeSeries {
    TimeSeries::from_iso(dates, values).unwrap()
}

/// Daily series starting at 1970-01-01.
pub fn daily(values: Vec<f64>) -> TimeSeries {
    let start = date("1970-01-01");
    let dates = (0..values.len())
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    TimeSeries::new(dates, values).unwrap()
}

/// Three partially overlapping series used for algebraic property tests.
pub fn overlapping_triple() -> (TimeSeries, TimeSeries, TimeSeries) {
    let ts1 = series(
        &["1970-01-01", "1970-01-02", "1970-01-03"],
        vec![1.0, 2.0, 3.0],
    );
    let ts2 = series(
        &["1970-01-01", "1970-01-02", "1970-01-04"],
        vec![4.0, 2.0, 1.0],
    );
    let ts3 = series(
        &["1970-01-03", "1970-01-01", "1970-01-05"],
        vec![5.0, 3.0, 2.0],
    );
    (ts1, ts2, ts3)
}

/// Compare two series with a tolerance on the values.
pub fn assert_series_close(actual: &TimeSeries, expected: &TimeSeries) {
    assert_eq!(actual.dates(), expected.dates());
    for (a, e) in actual.values().iter().zip(expected.values()) {
        assert!((a - e).abs() < 1e-10, "{} != {}", a, e);
    }
}
