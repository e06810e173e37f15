use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use gfinder_core::{EnrichedContact, ErrorKind};
use gfinder_export::{export_filename, export_xlsx, ExportError, XLSX_CONTENT_TYPE};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub(super) struct ExportRequest {
    #[serde(default)]
    pub results: Vec<EnrichedContact>,
}

pub(super) async fn export_results(
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::new(
            req_id.0.clone(),
            ErrorKind::InvalidQuery,
            format!("invalid export request: {}", rejection.body_text()),
        )
    })?;

    let bytes = export_xlsx(&request.results).map_err(|e| match e {
        ExportError::Empty => ApiError::new(req_id.0.clone(), ErrorKind::InvalidQuery, e.to_string()),
        ExportError::Xlsx(_) => {
            tracing::error!(error = %e, "xlsx export failed");
            ApiError::internal(req_id.0.clone(), "failed to build spreadsheet")
        }
    })?;

    let filename = export_filename(chrono::Utc::now().date_naive());
    tracing::info!(rows = request.results.len(), %filename, "results exported");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response())
}
