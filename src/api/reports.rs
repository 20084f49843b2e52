use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse, session::require_session},
    controller::AppState,
    reports::{ReportFormat, ReportHistoryEntry},
};

#[derive(Debug, Deserialize, Validate)]
pub struct ReportRequest {
    #[validate(length(min = 1, max = 32))]
    pub transformer_id: String,
    #[validate(length(min = 1, max = 64))]
    pub report_type: String,
    pub format: ReportFormat,
}

/// POST /api/v1/reports - Generate a report and return it as a download
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;
    {
        let dashboard = state.dashboard.read().await;
        require_session(&dashboard)?;
        dashboard.selected(&request.transformer_id)?;
    }
    tokio::time::sleep(state.cfg.dashboard.report_delay()).await;

    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let artifact = dashboard.generate_report(
        &request.transformer_id,
        &request.report_type,
        request.format,
    )?;
    drop(dashboard);

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// GET /api/v1/reports/history - Generated reports, newest first
pub async fn report_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ReportHistoryEntry>>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    require_session(&dashboard)?;
    let entries = dashboard.report_history().to_vec();
    let total = entries.len();
    Ok(Json(ApiResponse::success(entries).with_count(total)))
}
