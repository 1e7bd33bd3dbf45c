//! In-memory task store.

use crate::clock::Clock;
use crate::error::{DuckbillError, Result};
use crate::task::model::{Task, TaskState};
use crate::task::repository::TaskRepository;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use duckbill_types::TaskDraft;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

struct Inner {
    tasks: HashMap<String, Task>,
    next_id: u64,
}

/// Process-memory implementation of [`TaskRepository`] with sequential
/// string ids.
pub struct InMemoryTaskStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: HashMap::new(),
                next_id: 1,
            }),
            clock,
        }
    }

    /// Creates a store pre-seeded with the sample task the app ships with.
    pub async fn with_sample_data(clock: Arc<dyn Clock>) -> Self {
        let store = Self::new(clock);
        {
            let mut inner = store.inner.write().await;
            let id = inner.next_id.to_string();
            inner.next_id += 1;
            inner.tasks.insert(
                id.clone(),
                Task {
                    id,
                    title: "Task from 08-13-25".to_string(),
                    status: "Ready for review".to_string(),
                    state: TaskState::Active,
                    icon: "🔄".to_string(),
                    created_at: Utc.with_ymd_and_hms(2025, 8, 13, 0, 0, 0)
                        .single()
                        .unwrap_or_else(Utc::now),
                    description: None,
                    priority: None,
                    deadline: None,
                    source: None,
                    task_type: None,
                },
            );
        }
        store
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn create_from_draft(&self, draft: TaskDraft) -> Result<Task> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id.to_string();
        inner.next_id += 1;

        let task = Task::from_draft(id.clone(), draft, self.clock.now());
        info!(task_id = %id, title = %task.title, "task created");
        inner.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.inner.read().await.tasks.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner.tasks.values().cloned().collect();
        // Sequential ids, so numeric order is creation order.
        tasks.sort_by_key(|t| t.id.parse::<u64>().unwrap_or(u64::MAX));
        Ok(tasks)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let mut inner = self.inner.write().await;
        if !inner.tasks.contains_key(&task.id) {
            return Err(DuckbillError::not_found("task", &task.id));
        }
        inner.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.inner.write().await.tasks.remove(id).is_some())
    }

    async fn set_state(&self, id: &str, state: TaskState) -> Result<Task> {
        let mut inner = self.inner.write().await;
        let task = inner
            .tasks
            .get_mut(id)
            .ok_or_else(|| DuckbillError::not_found("task", id))?;

        task.state = state;
        if state == TaskState::Completed {
            task.status = "Completed".to_string();
        }
        Ok(task.clone())
    }
}
