//! Task storage port and the in-memory implementation behind it.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ── Task ─────────────────────────────────────────────────────────────────────

/// The CRUD resource: id, title, description, completed flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Request body for POST and PATCH. `title` is required; the other fields
/// default. PATCH takes the full representation, there is no partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

// ── TaskStore ────────────────────────────────────────────────────────────────

/// Storage port for task records.
///
/// Handlers hold an `Arc<dyn TaskStore>`, so a persistent or distributed
/// backend can replace [`MemoryStore`] without touching the HTTP layer.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// First task matching `id`, if any.
    async fn find(&self, id: u64) -> Option<Task>;

    /// Assign the next id, append the record, return it.
    async fn insert(&self, draft: TaskDraft) -> Task;

    /// Replace title/description/completed of the task with `id` in place.
    /// The id itself never changes. `None` when no such task exists.
    async fn update(&self, id: u64, draft: TaskDraft) -> Option<Task>;

    /// Remove the task with `id`. Reports whether a removal occurred.
    async fn delete(&self, id: u64) -> bool;
}
