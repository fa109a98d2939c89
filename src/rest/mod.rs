//! HTTP surface of the task service.
//!
//! Endpoints (the /apiv1 and /apiv2 trees are identical apart from the
//! message returned on creation):
//!   GET    /
//!   GET    /health
//!   GET    /apiv{1,2}/{id}
//!   POST   /apiv{1,2}/
//!   PATCH  /apiv{1,2}/{id}
//!   DELETE /apiv{1,2}/{id}

pub mod auth;
pub mod extract;
pub mod routes;

use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppContext;

pub const V1_CREATED_MESSAGE: &str = "New task added successfully.";
pub const V2_CREATED_MESSAGE: &str = "Task successfully created.";

/// Handler state for one versioned sub-router: the shared context plus the
/// single string that distinguishes /apiv1 from /apiv2.
#[derive(Clone)]
pub struct VersionedApi {
    pub ctx: Arc<AppContext>,
    pub created_message: &'static str,
}

pub async fn start_server(ctx: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", ctx.config.bind_address, ctx.config.port).parse()?;

    let router = build_router(ctx);

    info!("task API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Welcome + health (no auth)
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health))
        .with_state(ctx.clone())
        // Versioned task CRUD
        .merge(version_router("/apiv1", ctx.clone(), V1_CREATED_MESSAGE))
        .merge(version_router("/apiv2", ctx, V2_CREATED_MESSAGE))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// One CRUD tree mounted under `prefix` (`/apiv1` or `/apiv2`). Both versions
/// share this; only `created_message` differs. The routes are registered at
/// their full paths (rather than nested) so that the trailing-slash collection
/// endpoint `"{prefix}/"` is reachable under axum 0.8's nesting semantics.
/// The key check is a middleware layer, explicit in the routing table.
fn version_router(
    prefix: &str,
    ctx: Arc<AppContext>,
    created_message: &'static str,
) -> Router {
    Router::new()
        .route(&format!("{prefix}/"), post(routes::tasks::create_task))
        .route(
            &format!("{prefix}/{{id}}"),
            get(routes::tasks::get_task)
                .patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_api_key,
        ))
        .with_state(VersionedApi {
            ctx,
            created_message,
        })
}

/// Resolves when a shutdown signal is received.
///
/// On Unix we listen for SIGTERM *and* Ctrl-C.
/// On other platforms we listen for Ctrl-C only.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
    }
}
