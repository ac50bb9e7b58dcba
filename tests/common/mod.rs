//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use peak_shift::analysis::REQUIRED_COLUMNS;
use peak_shift::table::{Table, Value};
use peak_shift::tariff::Tariff;

/// Builds a table with only the two required columns.
pub fn table(rows: &[(i64, f64)]) -> Table {
    let mut t = Table::new(REQUIRED_COLUMNS);
    for &(hour, kwh) in rows {
        t.push_row(vec![hour.into(), kwh.into()]);
    }
    t
}

/// Four-hour day with two peaks (18, 19).
pub fn worked_example() -> Table {
    table(&[(0, 2.0), (8, 4.0), (18, 7.0), (19, 7.5)])
}

/// Numeric hour labels as they appear in `peak_hours`.
pub fn hours(labels: &[i64]) -> Vec<Value> {
    labels.iter().map(|&h| Value::from(h)).collect()
}

/// Tariff from a known-good rate.
pub fn tariff(rate: f64) -> Tariff {
    Tariff::new(rate).expect("test tariff must be valid")
}

/// Asserts two floats agree within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
