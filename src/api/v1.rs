use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    api::{analysis, feed, notifications, reports, response::ApiResponse, session, transformers},
    controller::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/session",
            get(session::get_session)
                .post(session::login)
                .delete(session::logout),
        )
        .route("/view", get(session::get_view).put(session::navigate))
        .route("/transformers", get(transformers::list_transformers))
        .route("/transformers/:id", get(transformers::get_transformer))
        .route("/transformers/:id/status", put(transformers::update_status))
        .route("/stats", get(transformers::get_stats))
        .route("/refresh", post(transformers::refresh))
        .route("/analysis/:id", post(analysis::run_analysis))
        .route("/fra/:id", get(analysis::get_fra_chart))
        .route("/reports", post(reports::generate_report))
        .route("/reports/history", get(reports::report_history))
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read", post(notifications::mark_read))
        .route("/feed", post(feed::start_feed))
        .route("/uploads", post(feed::process_uploads))
        .with_state(state)
}

pub async fn healthz() -> ApiResponse<&'static str> {
    ApiResponse::success("ok")
}
