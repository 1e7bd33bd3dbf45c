//! Task repository trait.
//!
//! The narrow seam through which engine callers persist task drafts,
//! decoupling them from the concrete storage (in-memory here, anything
//! else behind the same trait).

use crate::error::Result;
use crate::task::model::{Task, TaskState};
use async_trait::async_trait;
use duckbill_types::TaskDraft;

/// An abstract store for task records.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists an engine draft as a new task and returns the stored record.
    async fn create_from_draft(&self, draft: TaskDraft) -> Result<Task>;

    /// Finds a task by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(task))`: found
    /// - `Ok(None)`: no task with that id
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>>;

    /// Lists every task, in creation order.
    async fn list(&self) -> Result<Vec<Task>>;

    /// Replaces a stored task (matched by id).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no task with that id exists.
    async fn update(&self, task: Task) -> Result<Task>;

    /// Deletes a task. Returns whether anything was removed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Moves a task to a new lifecycle state. Completing a task also stamps
    /// its status line.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no task with that id exists.
    async fn set_state(&self, id: &str, state: TaskState) -> Result<Task>;
}
