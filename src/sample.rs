//! Deterministic sample day for demos and tests.

use std::ops::Range;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::analysis::{CONSUMPTION_COLUMN, ConsumptionRecord, HOUR_COLUMN};
use crate::table::{Table, Value};

/// Seed for the sample generator.
///
/// `StdRng` output is stable for a given `rand` release but is not
/// bit-compatible with other generators, so tests check per-band bounds.
pub const SAMPLE_SEED: u64 = 42;

/// Number of hourly rows in the sample day.
pub const HOURS_PER_DAY: i64 = 24;

/// Time-of-day band that determines the consumption range of an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Before 06:00 and after 22:00.
    Night,
    /// 06:00 up to 17:00.
    Day,
    /// 17:00 through 22:00.
    EveningPeak,
}

impl Band {
    pub fn for_hour(hour: i64) -> Self {
        if !(6..=22).contains(&hour) {
            Self::Night
        } else if hour < 17 {
            Self::Day
        } else {
            Self::EveningPeak
        }
    }

    /// Consumption range in kWh drawn from uniformly.
    pub fn range(self) -> Range<f64> {
        match self {
            Self::Night => 1.5..2.5,
            Self::Day => 3.0..4.5,
            Self::EveningPeak => 6.0..8.5,
        }
    }
}

/// Generates one record per hour of a synthetic day.
pub fn sample_records() -> Vec<ConsumptionRecord> {
    let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
    (0..HOURS_PER_DAY)
        .map(|hour| ConsumptionRecord {
            hour: Value::from(hour),
            consumption_kwh: rng.random_range(Band::for_hour(hour).range()),
        })
        .collect()
}

/// The sample day as a table with the two required columns.
pub fn sample_table() -> Table {
    let mut table = Table::new([HOUR_COLUMN, CONSUMPTION_COLUMN]);
    for r in sample_records() {
        table.push_row(vec![r.hour, Value::from(r.consumption_kwh)]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_the_day() {
        assert_eq!(Band::for_hour(0), Band::Night);
        assert_eq!(Band::for_hour(5), Band::Night);
        assert_eq!(Band::for_hour(6), Band::Day);
        assert_eq!(Band::for_hour(16), Band::Day);
        assert_eq!(Band::for_hour(17), Band::EveningPeak);
        assert_eq!(Band::for_hour(22), Band::EveningPeak);
        assert_eq!(Band::for_hour(23), Band::Night);
    }

    #[test]
    fn sample_has_one_row_per_hour() {
        let records = sample_records();
        assert_eq!(records.len(), 24);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.hour, Value::from(i as i64));
        }
    }

    #[test]
    fn sample_values_stay_within_band() {
        for (hour, r) in (0..HOURS_PER_DAY).zip(sample_records()) {
            let range = Band::for_hour(hour).range();
            assert!(
                range.contains(&r.consumption_kwh),
                "hour {} value {} outside {range:?}",
                r.hour,
                r.consumption_kwh
            );
        }
    }

    #[test]
    fn sample_is_deterministic() {
        assert_eq!(sample_records(), sample_records());
        assert_eq!(sample_table(), sample_table());
    }

    #[test]
    fn sample_table_has_required_columns() {
        let table = sample_table();
        assert_eq!(table.columns(), [HOUR_COLUMN, CONSUMPTION_COLUMN]);
        assert_eq!(table.len(), 24);
    }
}
