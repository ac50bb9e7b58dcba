//! Peak classification and savings estimation over one day of consumption.
//!
//! The engine is a pure function of `(table, tariff)`:
//!
//! 1. [`validate`] checks the required columns are present,
//! 2. [`records`] extracts `(hour label, kWh)` pairs,
//! 3. [`classify`] marks hours above [`PEAK_THRESHOLD_KWH`],
//! 4. [`SavingsSummary::from_records`] prices the day at the standard tariff
//!    and with all peak energy moved to the night tariff.
//!
//! [`analyze`] runs all four and never mutates its input.

use serde::Serialize;
use tracing::debug;

use crate::error::SchemaError;
use crate::table::{Table, Value};
use crate::tariff::{PEAK_THRESHOLD_KWH, Tariff};

/// Column holding the hour label.
pub const HOUR_COLUMN: &str = "Hour";
/// Column holding hourly consumption in kWh.
pub const CONSUMPTION_COLUMN: &str = "Consumption (kWh)";
/// Derived column: whether the hour is a peak.
pub const PEAK_COLUMN: &str = "Peak?";
/// Derived column: advice for the hour.
pub const RECOMMENDATION_COLUMN: &str = "Recommendation";

/// Both columns a table needs before analysis.
pub const REQUIRED_COLUMNS: [&str; 2] = [HOUR_COLUMN, CONSUMPTION_COLUMN];

/// Advice attached to every peak hour.
pub const SHIFT_TO_NIGHT: &str = "Shift load to night";

/// Savings share (percent) above which hardware mitigation is advised.
pub const MITIGATION_THRESHOLD_PCT: f64 = 10.0;

/// One observation: consumption during an hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionRecord {
    /// Hour label as found in the table (`18`, `"18:00"`, ...). Never parsed.
    pub hour: Value,
    /// Energy consumed in that hour (kWh).
    pub consumption_kwh: f64,
}

/// A record with its peak classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRecord {
    pub hour: Value,
    pub consumption_kwh: f64,
    pub is_peak: bool,
    /// Non-empty iff `is_peak`.
    pub recommendation: String,
}

/// Cost of the day as consumed and with peak energy moved to the night tariff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsSummary {
    pub total_kwh: f64,
    pub total_cost: f64,
    pub night_tariff: f64,
    pub peak_kwh: f64,
    pub optimized_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

/// Positions of the required columns in a validated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub hour: usize,
    pub consumption: usize,
}

/// Checks that both required columns are present.
///
/// # Errors
///
/// Returns [`SchemaError::MissingColumns`] listing each absent column.
pub fn validate(table: &Table) -> Result<ColumnIndex, SchemaError> {
    let hour = table.column_index(HOUR_COLUMN);
    let consumption = table.column_index(CONSUMPTION_COLUMN);

    match (hour, consumption) {
        (Some(hour), Some(consumption)) => Ok(ColumnIndex { hour, consumption }),
        _ => {
            let missing = REQUIRED_COLUMNS
                .iter()
                .filter(|name| table.column_index(name).is_none())
                .map(ToString::to_string)
                .collect();
            Err(SchemaError::MissingColumns {
                missing,
                required: REQUIRED_COLUMNS.iter().map(ToString::to_string).collect(),
            })
        }
    }
}

/// Extracts typed records from a table, in row order.
///
/// # Errors
///
/// Returns a `SchemaError` if a required column is missing or a consumption
/// cell is not a number. Hour cells are taken as-is.
pub fn records(table: &Table) -> Result<Vec<ConsumptionRecord>, SchemaError> {
    let idx = validate(table)?;
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let consumption_kwh = row[idx.consumption].as_f64().ok_or_else(|| {
                invalid_cell(CONSUMPTION_COLUMN, i, &row[idx.consumption], "a number")
            })?;
            Ok(ConsumptionRecord {
                hour: row[idx.hour].clone(),
                consumption_kwh,
            })
        })
        .collect()
}

fn invalid_cell(column: &str, row_idx: usize, value: &Value, expected: &str) -> SchemaError {
    let got = match value {
        Value::Empty => "an empty cell".to_string(),
        other => format!("\"{other}\""),
    };
    SchemaError::InvalidCell {
        column: column.to_string(),
        row: row_idx + 1,
        message: format!("expected {expected}, got {got}"),
    }
}

/// Whether an hour's consumption counts as a peak. Exactly at threshold is not.
pub fn is_peak(consumption_kwh: f64) -> bool {
    consumption_kwh > PEAK_THRESHOLD_KWH
}

/// Classifies every record against the peak threshold.
pub fn classify(records: &[ConsumptionRecord]) -> Vec<AnnotatedRecord> {
    records
        .iter()
        .map(|r| {
            let peak = is_peak(r.consumption_kwh);
            AnnotatedRecord {
                hour: r.hour.clone(),
                consumption_kwh: r.consumption_kwh,
                is_peak: peak,
                recommendation: (if peak { SHIFT_TO_NIGHT } else { "" }).to_string(),
            }
        })
        .collect()
}

/// Hour labels of peak records, in table order (duplicates kept).
pub fn peak_hours(records: &[AnnotatedRecord]) -> Vec<Value> {
    records
        .iter()
        .filter(|r| r.is_peak)
        .map(|r| r.hour.clone())
        .collect()
}

impl SavingsSummary {
    /// Prices the annotated day at `tariff`.
    pub fn from_records(records: &[AnnotatedRecord], tariff: Tariff) -> Self {
        let rate = tariff.rate();
        let total_kwh: f64 = records.iter().map(|r| r.consumption_kwh).sum();
        let total_cost = total_kwh * rate;

        let night_tariff = tariff.night_rate();
        let peak_kwh: f64 = records
            .iter()
            .filter(|r| r.is_peak)
            .map(|r| r.consumption_kwh)
            .sum();
        let optimized_cost = total_cost - peak_kwh * rate + peak_kwh * night_tariff;

        let savings = total_cost - optimized_cost;
        let savings_percent = if total_cost > 0.0 {
            savings / total_cost * 100.0
        } else {
            0.0
        };

        Self {
            total_kwh,
            total_cost,
            night_tariff,
            peak_kwh,
            optimized_cost,
            savings,
            savings_percent,
        }
    }

    /// Whether savings are large enough to justify timers, UPS or rescheduling.
    pub fn recommends_mitigation(&self) -> bool {
        self.savings_percent > MITIGATION_THRESHOLD_PCT
    }
}

/// Result of analysing one table at one tariff.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Input table with [`PEAK_COLUMN`] and [`RECOMMENDATION_COLUMN`] set.
    pub table: Table,
    pub records: Vec<AnnotatedRecord>,
    pub peak_hours: Vec<Value>,
    pub tariff: Tariff,
    pub summary: SavingsSummary,
}

impl Analysis {
    /// Re-prices the same classification at another tariff.
    pub fn with_tariff(&self, tariff: Tariff) -> Self {
        Self {
            tariff,
            summary: SavingsSummary::from_records(&self.records, tariff),
            ..self.clone()
        }
    }
}

/// Validates, classifies and prices a table.
///
/// # Errors
///
/// Returns a `SchemaError` if the table is missing a required column or holds
/// a non-numeric consumption value. No partial result is produced.
pub fn analyze(table: &Table, tariff: Tariff) -> Result<Analysis, SchemaError> {
    let annotated = classify(&records(table)?);

    let mut out = table.clone();
    out.set_column(
        PEAK_COLUMN,
        annotated.iter().map(|r| Value::Bool(r.is_peak)).collect(),
    );
    out.set_column(
        RECOMMENDATION_COLUMN,
        annotated
            .iter()
            .map(|r| Value::Text(r.recommendation.clone()))
            .collect(),
    );

    let peak_hours = peak_hours(&annotated);
    let summary = SavingsSummary::from_records(&annotated, tariff);
    debug!(
        rows = annotated.len(),
        peaks = peak_hours.len(),
        savings = summary.savings,
        "analysis complete"
    );

    Ok(Analysis {
        table: out,
        records: annotated,
        peak_hours,
        tariff,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(i64, f64)]) -> Table {
        let mut t = Table::new(REQUIRED_COLUMNS);
        for &(h, kwh) in rows {
            t.push_row(vec![h.into(), kwh.into()]);
        }
        t
    }

    fn tariff(rate: f64) -> Tariff {
        Tariff::new(rate).unwrap()
    }

    fn hours(labels: &[i64]) -> Vec<Value> {
        labels.iter().map(|&h| Value::from(h)).collect()
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_peak(6.0));
        assert!(is_peak(6.0001));
        assert!(!is_peak(0.0));
    }

    #[test]
    fn recommendation_only_on_peaks() {
        let annotated = classify(&records(&table(&[(0, 2.0), (18, 7.0), (19, 6.0)])).unwrap());
        assert_eq!(annotated[0].recommendation, "");
        assert_eq!(annotated[1].recommendation, SHIFT_TO_NIGHT);
        assert!(!annotated[2].is_peak);
        for r in &annotated {
            assert_eq!(r.is_peak, !r.recommendation.is_empty());
        }
    }

    #[test]
    fn validate_reports_each_missing_column() {
        let t = Table::new(["Hour", "kWh"]);
        let err = validate(&t).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns {
                missing: vec![CONSUMPTION_COLUMN.to_string()],
                required: vec![HOUR_COLUMN.to_string(), CONSUMPTION_COLUMN.to_string()],
            }
        );

        let t = Table::new(["time", "usage"]);
        match validate(&t) {
            Err(SchemaError::MissingColumns { missing, .. }) => assert_eq!(missing.len(), 2),
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn validate_does_not_guess_column_names() {
        let t = Table::new(["hour", "consumption (kwh)"]);
        assert!(validate(&t).is_err());
    }

    #[test]
    fn records_reject_non_numeric_consumption() {
        let mut t = Table::new(REQUIRED_COLUMNS);
        t.push_row(vec![0.into(), 1.0.into()]);
        t.push_row(vec![1.into(), "lots".into()]);
        let err = records(&t).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidCell {
                column: CONSUMPTION_COLUMN.to_string(),
                row: 2,
                message: "expected a number, got \"lots\"".to_string(),
            }
        );

        let mut t = Table::new(REQUIRED_COLUMNS);
        t.push_row(vec![0.into(), Value::Empty]);
        assert!(matches!(
            records(&t),
            Err(SchemaError::InvalidCell { ref column, .. }) if column == CONSUMPTION_COLUMN
        ));
    }

    #[test]
    fn hour_cells_are_kept_as_labels() {
        let mut t = Table::new(REQUIRED_COLUMNS);
        t.push_row(vec![25.into(), "6.5".into()]);
        t.push_row(vec!["noon".into(), 2.0.into()]);
        t.push_row(vec![Value::Empty, 1.0.into()]);
        let recs = records(&t).unwrap();
        assert_eq!(
            recs,
            vec![
                ConsumptionRecord {
                    hour: Value::from(25),
                    consumption_kwh: 6.5
                },
                ConsumptionRecord {
                    hour: Value::from("noon"),
                    consumption_kwh: 2.0
                },
                ConsumptionRecord {
                    hour: Value::Empty,
                    consumption_kwh: 1.0
                },
            ]
        );
    }

    #[test]
    fn text_hour_labels_reach_peak_hours() {
        let mut t = Table::new(REQUIRED_COLUMNS);
        t.push_row(vec!["00:00".into(), 2.0.into()]);
        t.push_row(vec!["18:00".into(), 7.0.into()]);
        let a = analyze(&t, tariff(6.5)).unwrap();
        assert_eq!(a.peak_hours, vec![Value::from("18:00")]);
        assert_eq!(a.records[0].hour, Value::from("00:00"));
    }

    #[test]
    fn summary_matches_worked_example() {
        let a = analyze(&table(&[(0, 2.0), (8, 4.0), (18, 7.0), (19, 7.5)]), tariff(6.5)).unwrap();
        let s = a.summary;
        assert!((s.total_kwh - 20.5).abs() < 1e-9);
        assert!((s.total_cost - 133.25).abs() < 1e-9);
        assert!((s.night_tariff - 5.2).abs() < 1e-9);
        assert!((s.peak_kwh - 14.5).abs() < 1e-9);
        assert!((s.optimized_cost - 114.4).abs() < 1e-9);
        assert!((s.savings - 18.85).abs() < 1e-9);
        assert!((s.savings_percent - 14.146_341).abs() < 1e-4);
        assert_eq!(a.peak_hours, hours(&[18, 19]));
        assert!(s.recommends_mitigation());
    }

    #[test]
    fn zero_tariff_yields_zero_percent() {
        let a = analyze(&table(&[(18, 7.0), (19, 7.5)]), tariff(0.0)).unwrap();
        assert_eq!(a.summary.total_cost, 0.0);
        assert_eq!(a.summary.optimized_cost, 0.0);
        assert_eq!(a.summary.savings, 0.0);
        assert_eq!(a.summary.savings_percent, 0.0);
        assert!(!a.summary.recommends_mitigation());
    }

    #[test]
    fn zero_consumption_yields_zero_percent() {
        let a = analyze(&table(&[(0, 0.0), (1, 0.0)]), tariff(6.5)).unwrap();
        assert_eq!(a.summary.savings_percent, 0.0);
    }

    #[test]
    fn empty_table_is_valid_and_zero() {
        let a = analyze(&table(&[]), tariff(6.5)).unwrap();
        assert!(a.records.is_empty());
        assert!(a.peak_hours.is_empty());
        assert_eq!(a.summary.total_kwh, 0.0);
        assert_eq!(a.summary.savings_percent, 0.0);
    }

    #[test]
    fn savings_equal_peak_energy_times_discount() {
        let rows: Vec<(i64, f64)> = (0..24).map(|h| (h, f64::from(h as i32) * 0.4)).collect();
        let t = table(&rows);
        for rate in [0.1, 1.0, 4.35, 6.5, 12.0] {
            let s = analyze(&t, tariff(rate)).unwrap().summary;
            let expected = s.peak_kwh * (rate - s.night_tariff);
            assert!((s.savings - expected).abs() < 1e-9, "rate {rate}");
            assert!(s.optimized_cost <= s.total_cost);
            assert!(s.savings >= 0.0);
        }
    }

    #[test]
    fn no_peaks_means_no_savings() {
        let a = analyze(&table(&[(0, 2.0), (12, 6.0)]), tariff(6.5)).unwrap();
        assert!(a.peak_hours.is_empty());
        assert_eq!(a.summary.peak_kwh, 0.0);
        assert_eq!(a.summary.savings, 0.0);
        assert_eq!(a.summary.optimized_cost, a.summary.total_cost);
    }

    #[test]
    fn duplicate_hours_are_not_merged() {
        let a = analyze(&table(&[(18, 7.0), (18, 7.0)]), tariff(1.0)).unwrap();
        assert_eq!(a.peak_hours, hours(&[18, 18]));
        assert!((a.summary.peak_kwh - 14.0).abs() < 1e-12);
    }

    #[test]
    fn analyze_leaves_input_untouched_and_appends_columns() {
        let mut t = Table::new(["Date", HOUR_COLUMN, CONSUMPTION_COLUMN]);
        t.push_row(vec!["2024-01-01".into(), 18.into(), 7.0.into()]);
        let before = t.clone();

        let a = analyze(&t, tariff(6.5)).unwrap();
        assert_eq!(t, before);
        assert_eq!(
            a.table.columns(),
            ["Date", HOUR_COLUMN, CONSUMPTION_COLUMN, PEAK_COLUMN, RECOMMENDATION_COLUMN]
        );
        assert_eq!(a.table.rows()[0][3], Value::Bool(true));
        assert_eq!(a.table.rows()[0][4], Value::Text(SHIFT_TO_NIGHT.to_string()));
    }

    #[test]
    fn with_tariff_only_reprices() {
        let a = analyze(&table(&[(18, 7.0), (3, 2.0)]), tariff(6.5)).unwrap();
        let b = a.with_tariff(tariff(0.0));
        assert_eq!(a.records, b.records);
        assert_eq!(a.table, b.table);
        assert_eq!(b.summary.total_cost, 0.0);
        assert_eq!(b.tariff.rate(), 0.0);
    }
}
