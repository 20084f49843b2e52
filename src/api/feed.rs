use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse, session::require_session},
    controller::{AppState, UploadSummary, UploadedFile},
    simulation::{FeedLogEntry, FeedStatus},
};

#[derive(Debug, Serialize)]
pub struct FeedSession {
    pub status: FeedStatus,
    pub log: Vec<FeedLogEntry>,
}

/// POST /api/v1/feed - Connect the simulated data feed
pub async fn start_feed(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FeedSession>>, ApiError> {
    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let log = dashboard.start_data_feed(Utc::now());
    Ok(Json(ApiResponse::success(FeedSession {
        status: dashboard.feed_status(),
        log,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UploadRequest {
    #[validate(nested)]
    pub files: Vec<UploadedFile>,
}

/// POST /api/v1/uploads - Register FRA measurement files
pub async fn process_uploads(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<ApiResponse<Vec<UploadSummary>>>, ApiError> {
    request.validate()?;
    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    let summaries = dashboard.process_uploads(&request.files)?;
    let total = summaries.len();
    Ok(Json(ApiResponse::success(summaries).with_count(total)))
}
