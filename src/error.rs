use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Errors surfaced at the request boundary.
///
/// Every variant maps to one HTTP status and is returned as
/// `{"detail": <message>}`. None of these are fatal: each request fails
/// independently and the store stays usable for the next one.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad or missing G-C-P-KEY header.
    #[error("Invalid API Key")]
    Unauthorized,
    /// No task with the requested id.
    #[error("Task ID {0} not found.")]
    TaskNotFound(u64),
    /// Request body failed schema validation.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TaskNotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation("missing field `title`".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_not_found_message_includes_id() {
        assert_eq!(ApiError::TaskNotFound(42).to_string(), "Task ID 42 not found.");
    }
}
