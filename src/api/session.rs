use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::{AppState, Dashboard, View},
    session::UserSession,
};

/// Reject requests unless someone is logged in.
pub(crate) fn require_session(dashboard: &Dashboard) -> Result<(), ApiError> {
    if dashboard.is_logged_in() {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 64))]
    pub username: String,
    #[validate(length(max = 256))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: Option<UserSession>,
    pub view: View,
}

/// GET /api/v1/session - Current login state
pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionInfo>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    Ok(Json(ApiResponse::success(SessionInfo {
        user: dashboard.current_user().cloned(),
        view: dashboard.view(),
    })))
}

/// POST /api/v1/session - Log in with any non-empty credentials
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserSession>>, ApiError> {
    request.validate()?;
    let session = state
        .dashboard
        .write()
        .await
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(session)))
}

/// DELETE /api/v1/session - Log out
pub async fn logout(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserSession>>, ApiError> {
    let session = state.dashboard.write().await.logout().await?;
    Ok(Json(ApiResponse::success(session)))
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub view: View,
}

/// GET /api/v1/view - Active page
pub async fn get_view(State(state): State<AppState>) -> Result<Json<ApiResponse<View>>, ApiError> {
    let dashboard = state.dashboard.read().await;
    require_session(&dashboard)?;
    Ok(Json(ApiResponse::success(dashboard.view())))
}

/// PUT /api/v1/view - Switch page; only the dashboard page auto-refreshes
pub async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<ApiResponse<View>>, ApiError> {
    let mut dashboard = state.dashboard.write().await;
    require_session(&dashboard)?;
    dashboard.navigate(request.view);
    Ok(Json(ApiResponse::success(dashboard.view())))
}
