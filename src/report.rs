//! Plain-text rendering of an analysis for the terminal.

use std::fmt;

use serde::Serialize;

use crate::analysis::{Analysis, AnnotatedRecord, SavingsSummary};
use crate::table::Value;
use crate::tariff::PEAK_THRESHOLD_KWH;

/// Advice printed when at least one peak hour exists.
pub const PEAK_TIP: &str =
    "Tip: move heavy equipment to off-peak hours (night or early morning).";

/// Printed when no hour exceeds the threshold.
pub const NO_PEAKS: &str = "No peaks detected.";

/// Hardware advice shown when savings exceed the mitigation threshold.
pub const MITIGATION_ADVICE: &str =
    "Consider installing timers / UPS or rescheduling equipment operation.";

/// Displays the annotated table, the peak hours and the savings summary.
pub struct Report<'a>(pub &'a Analysis);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0;

        writeln!(f, "--- Consumption ---")?;
        writeln!(f, "{:>6}  {:>10}  {:>5}  Recommendation", "Hour", "kWh", "Peak")?;
        for r in &a.records {
            writeln!(
                f,
                "{:>6}  {:>10.3}  {:>5}  {}",
                r.hour.to_string(),
                r.consumption_kwh,
                if r.is_peak { "yes" } else { "" },
                r.recommendation
            )?;
        }

        writeln!(f)?;
        writeln!(f, "--- Peak hours (> {PEAK_THRESHOLD_KWH} kWh) ---")?;
        if a.peak_hours.is_empty() {
            writeln!(f, "{NO_PEAKS}")?;
        } else {
            let hours: Vec<String> = a.peak_hours.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", hours.join(", "))?;
            writeln!(f, "{PEAK_TIP}")?;
        }

        writeln!(f)?;
        write!(f, "{}", SummaryReport(&a.summary, a.tariff.rate()))
    }
}

/// Displays the savings block on its own.
pub struct SummaryReport<'a>(pub &'a SavingsSummary, pub f64);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s, rate) = (self.0, self.1);
        writeln!(f, "--- Potential savings ---")?;
        writeln!(f, "Tariff:            {rate:.2} per kWh")?;
        writeln!(f, "Night tariff:      {:.2} per kWh", s.night_tariff)?;
        writeln!(f, "Total consumption: {:.2} kWh", s.total_kwh)?;
        writeln!(f, "Peak consumption:  {:.2} kWh", s.peak_kwh)?;
        writeln!(f, "Current cost:      {:.2}", s.total_cost)?;
        writeln!(f, "Optimized cost:    {:.2}", s.optimized_cost)?;
        write!(
            f,
            "Savings:           {:.2} ({:.1}%)",
            s.savings, s.savings_percent
        )?;
        if s.recommends_mitigation() {
            write!(f, "\n{MITIGATION_ADVICE}")?;
        }
        Ok(())
    }
}

/// Machine-readable analysis, used by `--json` and the API.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Standard tariff the summary was priced at.
    pub tariff: f64,
    /// One entry per input row, in input order.
    pub records: Vec<AnnotatedRecord>,
    /// Hour labels of peak rows.
    pub peak_hours: Vec<Value>,
    /// Cost and savings figures.
    pub summary: SavingsSummary,
    /// Whether savings exceed the hardware-mitigation threshold.
    pub mitigation_recommended: bool,
}

impl From<&Analysis> for JsonReport {
    fn from(a: &Analysis) -> Self {
        Self {
            tariff: a.tariff.rate(),
            records: a.records.clone(),
            peak_hours: a.peak_hours.clone(),
            summary: a.summary,
            mitigation_recommended: a.summary.recommends_mitigation(),
        }
    }
}
