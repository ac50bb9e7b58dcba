//! File output for analysed tables.

/// XLSX and CSV writers.
pub mod export;
