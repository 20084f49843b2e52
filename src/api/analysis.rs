use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    api::{error::ApiError, response::ApiResponse, session::require_session},
    controller::{AnalysisResult, AppState},
    simulation::{FraChart, FraChartOptions},
};

/// POST /api/v1/analysis/:id - Run the fault classification for one transformer
///
/// Completes after the configured analysis delay. Faults also land in the
/// notification feed.
pub async fn run_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AnalysisResult>>, ApiError> {
    {
        let dashboard = state.dashboard.read().await;
        require_session(&dashboard)?;
        dashboard.selected(&id)?;
    }
    tokio::time::sleep(state.cfg.dashboard.analysis_delay()).await;

    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let result = dashboard.run_analysis(&id)?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /api/v1/fra/:id - Frequency-response chart data
pub async fn get_fra_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(options): Query<FraChartOptions>,
) -> Result<Json<ApiResponse<FraChart>>, ApiError> {
    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let chart = dashboard.fra_chart(&id, options)?;
    Ok(Json(ApiResponse::success(chart)))
}
