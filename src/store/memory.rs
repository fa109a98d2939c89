//! Process-local task store.
//!
//! Records live in insertion order in a `Vec` behind a `tokio::sync::Mutex`;
//! lookups are linear scans. Ids come from a monotonic counter rather than
//! `len() + 1`, so an insert after a delete never reissues an id.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Task, TaskDraft, TaskStore};

struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find(&self, id: u64) -> Option<Task> {
        let inner = self.inner.lock().await;
        inner.tasks.iter().find(|t| t.id == id).cloned()
    }

    async fn insert(&self, draft: TaskDraft) -> Task {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
        };
        inner.tasks.push(task.clone());
        task
    }

    async fn update(&self, id: u64, draft: TaskDraft) -> Option<Task> {
        let mut inner = self.inner.lock().await;
        let task = inner.tasks.iter_mut().find(|t| t.id == id)?;
        task.title = draft.title;
        task.description = draft.description;
        task.completed = draft.completed;
        Some(task.clone())
    }

    async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        inner.tasks.len() != before
    }
}
