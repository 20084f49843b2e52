use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse, session::require_session},
    controller::{AppState, RefreshOutcome},
    domain::{TransformerRecord, TransformerStatus},
    fleet::FleetSnapshot,
};

/// GET /api/v1/transformers - All transformers in fleet order
pub async fn list_transformers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransformerRecord>>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    require_session(&dashboard)?;
    let records = dashboard.transformers().to_vec();
    let total = records.len();
    Ok(Json(ApiResponse::success(records).with_count(total)))
}

/// GET /api/v1/transformers/:id - One transformer
pub async fn get_transformer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TransformerRecord>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    require_session(&dashboard)?;
    let record = dashboard.transformer(&id)?.clone();
    Ok(Json(ApiResponse::success(record)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
    pub temperature: f64,
    pub load: f64,
}

/// PUT /api/v1/transformers/:id/status - Overwrite status and readings
///
/// Readings outside their valid ranges are clamped, not rejected.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<TransformerRecord>>, ApiError> {
    request.validate()?;
    let status = TransformerStatus::from_str(&request.status).map_err(|_| {
        ApiError::ValidationError(format!("Unrecognized status: {}", request.status))
    })?;

    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let record = dashboard
        .update_status(&id, status, request.temperature, request.load)?
        .clone();
    Ok(Json(ApiResponse::success(record)))
}

/// GET /api/v1/stats - Status counts
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FleetSnapshot>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    require_session(&dashboard)?;
    Ok(Json(ApiResponse::success(dashboard.stats())))
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub outcome: RefreshOutcome,
    pub transformers: Vec<TransformerRecord>,
}

/// POST /api/v1/refresh - Manual refresh: drift simulation plus new counts
pub async fn refresh(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    require_session(&*state.dashboard.read().await)?;
    tokio::time::sleep(state.cfg.dashboard.refresh_delay()).await;

    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let outcome = dashboard.refresh()?;
    Ok(Json(ApiResponse::success(RefreshResponse {
        outcome,
        transformers: dashboard.transformers().to_vec(),
    })))
}
