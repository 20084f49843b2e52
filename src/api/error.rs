use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::controller::DashboardError;
use crate::fleet::FleetError;
use crate::reports::ReportError;
use crate::session::SessionError;

/// API error types that can be returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response that gets serialized to JSON
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::Unauthorized => "Unauthorized",
            ApiError::Conflict(_) => "Conflict",
            ApiError::InternalError(_) => "InternalServerError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();

        let message = match &self {
            ApiError::InternalError(_) => {
                tracing::error!(error = %self, "API error occurred");
                "An internal error occurred".to_string()
            }
            _ => {
                tracing::debug!(error = %self, "Client error");
                self.to_string()
            }
        };

        let error_response = ErrorResponse {
            success: false,
            error: error_type.to_string(),
            message,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(error: DashboardError) -> Self {
        match error {
            DashboardError::InvalidSelection => {
                ApiError::BadRequest("Please select a transformer".to_string())
            }
            DashboardError::NoFilesSelected => {
                ApiError::BadRequest("Please select at least one file".to_string())
            }
            DashboardError::Fleet(e) => e.into(),
            DashboardError::Session(e) => e.into(),
            DashboardError::Report(e) => e.into(),
            DashboardError::Simulation(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<FleetError> for ApiError {
    fn from(error: FleetError) -> Self {
        match error {
            FleetError::NotFound(id) => ApiError::NotFound(format!("Transformer {}", id)),
            FleetError::DuplicateId(_) => ApiError::Conflict(error.to_string()),
            FleetError::InvalidReading { .. } => ApiError::ValidationError(error.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::InvalidCredentials => ApiError::BadRequest(error.to_string()),
            SessionError::NotLoggedIn => ApiError::Unauthorized,
            SessionError::Storage(_) | SessionError::Corrupt(_) => {
                ApiError::InternalError(error.to_string())
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::MissingReportType => ApiError::ValidationError(error.to_string()),
            ReportError::Export(_) => ApiError::InternalError(error.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InternalError("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_dashboard_error_mapping() {
        let not_found: ApiError =
            DashboardError::Fleet(FleetError::NotFound("T404".to_string())).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Resource not found: Transformer T404");

        let selection: ApiError = DashboardError::InvalidSelection.into();
        assert_eq!(selection.error_type(), "BadRequest");

        let logged_out: ApiError = DashboardError::Session(SessionError::NotLoggedIn).into();
        assert_eq!(logged_out.status_code(), StatusCode::UNAUTHORIZED);

        let report: ApiError = DashboardError::Report(ReportError::MissingReportType).into();
        assert_eq!(report.error_type(), "ValidationError");
    }
}
