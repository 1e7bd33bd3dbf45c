//! Task domain model.
//!
//! Tasks are what the conversation engine's drafts become once the caller
//! persists them. The engine itself never touches these directly.

use crate::error::{DuckbillError, Result};
use chrono::{DateTime, Utc};
use duckbill_types::{Priority, TaskDraft};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Active,
    Completed,
    Archived,
}

impl TaskState {
    /// Returns the lowercase wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Active => "active",
            TaskState::Completed => "completed",
            TaskState::Archived => "archived",
        }
    }

    /// Parses a wire name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for anything but the three known names.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "active" => Ok(TaskState::Active),
            "completed" => Ok(TaskState::Completed),
            "archived" => Ok(TaskState::Archived),
            other => Err(DuckbillError::InvalidState(other.to_string())),
        }
    }
}

/// A stored task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Free-form status line shown in the list ("Created", "Ready for
    /// review", ...).
    pub status: String,
    pub state: TaskState,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub deadline: Option<String>,
    pub source: Option<String>,
    pub task_type: Option<String>,
}

impl Task {
    /// Materializes a task from an engine draft.
    pub fn from_draft(id: impl Into<String>, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            status: "Created".to_string(),
            state: TaskState::Active,
            icon: "📝".to_string(),
            created_at: now,
            description: Some(draft.description),
            priority: Some(draft.priority),
            deadline: draft.deadline,
            source: Some(draft.source),
            task_type: draft.task_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parse_round_trip() {
        for state in [TaskState::Active, TaskState::Completed, TaskState::Archived] {
            assert_eq!(TaskState::parse(state.as_str()).unwrap(), state);
        }
        assert!(TaskState::parse("paused").is_err());
    }

    #[test]
    fn test_from_draft_defaults() {
        let draft = TaskDraft {
            title: "Call the dentist".to_string(),
            description: "Call the dentist".to_string(),
            priority: Priority::Medium,
            deadline: None,
            source: "brain_dump".to_string(),
            task_type: None,
            appointment_details: None,
            booking_details: None,
        };

        let task = Task::from_draft("1", draft, Utc::now());
        assert_eq!(task.status, "Created");
        assert_eq!(task.state, TaskState::Active);
        assert_eq!(task.icon, "📝");
    }
}
