//! Shared-secret header check gating the versioned task routes.
//!
//! Clients send the key in the `G-C-P-KEY` header. The expected value comes
//! from `TASKD_API_KEY` / `--api-key` / `api_key` in the config file.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppContext;

/// Request header carrying the shared secret.
pub const API_KEY_HEADER: &str = "G-C-P-KEY";

pub async fn require_api_key(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    let expected = ctx.config.api_key.as_deref().unwrap_or("");

    if expected.is_empty() {
        // Auth disabled: allow all (not recommended in production)
        return next.run(req).await;
    }

    match provided {
        Some(key) if key == expected => next.run(req).await,
        _ => ApiError::Unauthorized.into_response(),
    }
}
