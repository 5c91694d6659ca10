use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::exclusion::ExclusionError;
use crate::rules::CatalogueError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Rule catalogue error: {0}")]
    Rules(#[from] CatalogueError),
}

impl From<ExclusionError> for AppError {
    fn from(err: ExclusionError) -> Self {
        AppError::UnprocessableEntity(format!("excludes: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Json(rejection) => {
                (rejection.status(), "INVALID_BODY", rejection.body_text())
            }
            AppError::Rules(e) => {
                tracing::error!("Rule catalogue error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RULES_ERROR",
                    e.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprocessable_entity_status() {
        let response = AppError::UnprocessableEntity("job_title cannot be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_exclusion_error_maps_to_422() {
        let err: AppError = ExclusionError::Empty.into();
        assert!(matches!(err, AppError::UnprocessableEntity(ref m) if m.starts_with("excludes:")));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_rules_error_is_500() {
        let response = AppError::Rules(CatalogueError::NoDepartments).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
