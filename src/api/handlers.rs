//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::warn;

use super::AppState;
use super::types::{AnalysisQuery, ErrorResponse};
use crate::analysis::analyze;
use crate::io::export::{EXPORT_FILE_NAME, XLSX_MIME, xlsx_bytes};
use crate::report::JsonReport;
use crate::tariff::Tariff;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Returns the analysis of the session table.
///
/// `GET /analysis` → 200 + `JsonReport` at the configured tariff
/// `GET /analysis?tariff=4.2` → priced at 4.2
/// `GET /analysis?tariff=-1` or `?tariff=abc` → 400 + `ErrorResponse`
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> Result<Json<JsonReport>, ApiError> {
    let Query(query) = query.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    let tariff = match query.tariff {
        Some(rate) => Tariff::new(rate).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => state.default_tariff,
    };

    let analysis = analyze(&state.table, tariff).map_err(|e| {
        warn!(error = %e, "analysis rejected");
        api_error(StatusCode::UNPROCESSABLE_ENTITY, e)
    })?;

    Ok(Json(JsonReport::from(&analysis)))
}

/// Returns the annotated table as `energy_analysis.xlsx`.
///
/// `GET /export` → 200 + XLSX attachment
pub async fn get_export(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let analysis = analyze(&state.table, state.default_tariff)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e))?;
    let bytes = xlsx_bytes(&analysis.table)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}
