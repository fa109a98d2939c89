pub mod config;
pub mod error;
pub mod rest;
pub mod store;

use std::sync::Arc;

use config::ServerConfig;
use store::TaskStore;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    /// Task records for the lifetime of the process. Handlers only see the
    /// trait object, so a persistent backend can be swapped in later without
    /// touching them.
    pub store: Arc<dyn TaskStore>,
    pub started_at: std::time::Instant,
}
