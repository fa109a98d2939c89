use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Json<T>` whose rejection is an [`ApiError::Validation`], so a malformed
/// or ill-typed body always surfaces as 422 with a `detail` message instead
/// of axum's mixed 400/415/422 defaults.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest};

    use crate::store::TaskDraft;

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_deserializes_with_defaults() {
        let req = json_request(r#"{"title": "x"}"#);
        let ValidJson(draft) = ValidJson::<TaskDraft>::from_request(req, &()).await.unwrap();
        assert_eq!(draft.title, "x");
        assert_eq!(draft.description, "");
        assert!(!draft.completed);
    }

    #[tokio::test]
    async fn test_missing_title_is_validation_error() {
        let req = json_request(r#"{"description": "no title"}"#);
        let err = ValidJson::<TaskDraft>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let req = json_request("{not json");
        let err = ValidJson::<TaskDraft>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
