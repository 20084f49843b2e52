use axum::{extract::State, Json};

use crate::{
    api::{error::ApiError, response::ApiResponse, session::require_session},
    controller::AppState,
    domain::NotificationEvent,
};

/// GET /api/v1/notifications - Feed, most recent first
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<NotificationEvent>>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    require_session(&dashboard)?;
    let feed = dashboard.notifications();
    Ok(Json(
        ApiResponse::success(feed.list_all())
            .with_count(feed.count())
            .with_unread(feed.unread_count()),
    ))
}

/// POST /api/v1/notifications/read - Panel opened, everything is seen
pub async fn mark_read(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<usize>>, ApiError> {
    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    dashboard.mark_notifications_read();
    Ok(Json(ApiResponse::success(dashboard.notifications().unread_count())))
}
