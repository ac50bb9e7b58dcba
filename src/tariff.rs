//! Tariff rate and the fixed pricing constants.

use std::fmt;

use serde::Serialize;

use crate::config::ConfigError;

/// Hourly consumption above this value (kWh) is a peak.
pub const PEAK_THRESHOLD_KWH: f64 = 6.0;

/// Night tariff as a fraction of the standard tariff (flat 20% discount).
pub const NIGHT_TARIFF_FACTOR: f64 = 0.8;

/// Tariff used when neither the config file nor the CLI sets one.
pub const DEFAULT_TARIFF: f64 = 6.5;

/// Granularity of interactive tariff adjustments.
pub const TARIFF_STEP: f64 = 0.1;

/// Standard electricity price per kWh. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Tariff(f64);

impl Tariff {
    /// Validates a rate coming from user input.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `rate` is negative, NaN or infinite.
    pub fn new(rate: f64) -> Result<Self, ConfigError> {
        if !rate.is_finite() {
            return Err(ConfigError {
                field: "tariff.rate".into(),
                message: format!("must be a finite number, got {rate}"),
            });
        }
        if rate < 0.0 {
            return Err(ConfigError {
                field: "tariff.rate".into(),
                message: format!("must be >= 0, got {rate}"),
            });
        }
        Ok(Self(rate))
    }

    pub fn rate(self) -> f64 {
        self.0
    }

    /// Discounted rate applied to energy shifted to the night.
    pub fn night_rate(self) -> f64 {
        self.0 * NIGHT_TARIFF_FACTOR
    }

    /// Moves the rate by `steps` increments of [`TARIFF_STEP`], floored at zero.
    ///
    /// The result is rounded to the step grid so repeated nudges don't drift.
    pub fn nudged(self, steps: i32) -> Self {
        let ticks = (self.0 / TARIFF_STEP).round() + f64::from(steps);
        Self((ticks.max(0.0) * TARIFF_STEP * 10.0).round() / 10.0)
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self(DEFAULT_TARIFF)
    }
}

impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
