//! Peak-hour detection and night-tariff savings estimation for one day of
//! electricity consumption.

/// Peak classification and savings calculation.
pub mod analysis;
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
/// CSV / XLSX input.
pub mod loader;
pub mod report;
/// Seeded sample day.
pub mod sample;
pub mod table;
pub mod tariff;
#[cfg(feature = "tui")]
pub mod tui;
