//! API query and error types. Successful analyses are sent as
//! [`JsonReport`](crate::report::JsonReport).

use serde::{Deserialize, Serialize};

/// Optional tariff override for the analysis endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Tariff per kWh (must be >= 0).
    pub tariff: Option<f64>,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
