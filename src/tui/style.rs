//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::analysis::{AnnotatedRecord, MITIGATION_THRESHOLD_PCT};

/// Consumption line color.
pub const CONSUMPTION_COLOR: Color = Color::Cyan;
/// Peak threshold line color.
pub const THRESHOLD_COLOR: Color = Color::DarkGray;
/// Peak rows in the table.
pub const PEAK_COLOR: Color = Color::Red;
/// Savings above the mitigation threshold.
pub const SAVINGS_HIGH: Color = Color::Green;
/// Some savings, below the mitigation threshold.
pub const SAVINGS_LOW: Color = Color::Yellow;
/// No savings at all.
pub const SAVINGS_NONE: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns a color for the savings percentage.
pub fn savings_color(percent: f64) -> Color {
    if percent > MITIGATION_THRESHOLD_PCT {
        SAVINGS_HIGH
    } else if percent > 0.0 {
        SAVINGS_LOW
    } else {
        SAVINGS_NONE
    }
}

/// Chart points `(x, kWh)`. Numeric hour labels are plotted as-is; if any
/// label is not a number every record is plotted at its row position.
pub fn chart_points(records: &[AnnotatedRecord]) -> Vec<(f64, f64)> {
    let numeric: Option<Vec<f64>> = records.iter().map(|r| r.hour.as_f64()).collect();
    match numeric {
        Some(xs) => xs
            .into_iter()
            .zip(records)
            .map(|(x, r)| (x, r.consumption_kwh))
            .collect(),
        None => records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.consumption_kwh))
            .collect(),
    }
}

/// Computes Y-axis bounds covering the data and the threshold with 10% padding.
///
/// The lower bound never goes below zero for non-negative data.
pub fn auto_bounds_y(data: &[(f64, f64)], threshold: f64) -> [f64; 2] {
    let ys = data.iter().map(|&(_, y)| y).chain(std::iter::once(threshold));
    let min = ys.clone().fold(f64::INFINITY, f64::min);
    let max = ys.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    let lo = if min >= 0.0 { (min - pad).max(0.0) } else { min - pad };
    [lo, max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn bounds_include_threshold() {
        let [lo, hi] = auto_bounds_y(&[(0.0, 2.0), (1.0, 3.0)], 6.0);
        assert!(lo >= 0.0 && lo <= 2.0);
        assert!(hi > 6.0);
    }

    #[test]
    fn bounds_for_empty_data_use_threshold() {
        let [lo, hi] = auto_bounds_y(&[], 6.0);
        assert!(lo < 6.0 && hi > 6.0);
    }

    fn record(hour: Value, consumption_kwh: f64) -> AnnotatedRecord {
        AnnotatedRecord {
            hour,
            consumption_kwh,
            is_peak: false,
            recommendation: String::new(),
        }
    }

    #[test]
    fn numeric_labels_are_plotted_at_their_hour() {
        let pts = chart_points(&[record(Value::from(5), 2.0), record(Value::from(18), 7.0)]);
        assert_eq!(pts, vec![(5.0, 2.0), (18.0, 7.0)]);
    }

    #[test]
    fn text_labels_fall_back_to_row_position() {
        let pts = chart_points(&[
            record(Value::from(0), 2.0),
            record(Value::from("18:00"), 7.0),
        ]);
        assert_eq!(pts, vec![(0.0, 2.0), (1.0, 7.0)]);
    }

    #[test]
    fn savings_colors() {
        assert_eq!(savings_color(14.1), SAVINGS_HIGH);
        assert_eq!(savings_color(5.0), SAVINGS_LOW);
        assert_eq!(savings_color(0.0), SAVINGS_NONE);
    }
}
