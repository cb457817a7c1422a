//! Data models for taskdeck entities.
//!
//! This module defines the core data structures:
//! - `Task` - A unit of work as known to the remote task store
//! - `TaskStatus` - Store-controlled workflow status
//! - `TaskDraft` - Fields for a not-yet-created task
//! - `TaskPatch` - Partial update sent to the store
//! - `Buckets` - The three status-partitioned views of the board

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status in the workflow.
///
/// The status is owned by the task store: the client never derives
/// `Overdue` from `due_date`, it renders whatever the store returned.
/// Values outside the known set are preserved verbatim so they survive
/// a full-buffer update unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
    Overdue,
    /// A status value this client does not recognize.
    Unknown(String),
}

impl TaskStatus {
    /// Parse from string, accepting only the known statuses.
    ///
    /// Used for user-supplied input (CLI flags); wire data goes through
    /// `From<String>` instead, which never rejects.
    pub fn parse_known(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "todo" => Some(TaskStatus::Todo),
            "done" => Some(TaskStatus::Done),
            "overdue" => Some(TaskStatus::Overdue),
            _ => None,
        }
    }

    /// String representation as the store spells it.
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Done => "done",
            TaskStatus::Overdue => "overdue",
            TaskStatus::Unknown(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "todo" => TaskStatus::Todo,
            "done" => TaskStatus::Done,
            "overdue" => TaskStatus::Overdue,
            _ => TaskStatus::Unknown(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unit of work as the remote task store knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, immutable once created
    pub id: u64,

    /// Display title
    pub title: String,

    /// Free-text description, may be empty
    #[serde(default)]
    pub description: String,

    /// Due timestamp as an ISO-8601-compatible string.
    /// The store owns the format; the client carries it opaquely.
    pub due_date: String,

    /// Current workflow status
    #[serde(default)]
    pub status: TaskStatus,
}

/// Fields for a task that has not been created yet.
///
/// The draft survives a failed create so the user can retry without
/// re-typing; it is cleared only after the store confirms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: String,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
        }
    }

    /// Validate the draft before it is sent anywhere.
    ///
    /// Returns a message suitable for showing to the user.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        if self.due_date.trim().is_empty() {
            return Err("due date is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for an existing task.
///
/// Only the set fields are serialized; the store leaves omitted fields
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Patch that changes only the status field.
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<&Task> for TaskPatch {
    /// Full-buffer patch: every field of the edited task, keyed by id at
    /// the call site.
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            due_date: Some(task.due_date.clone()),
            status: Some(task.status.clone()),
        }
    }
}

/// The three status-partitioned views presented to the user.
///
/// Tasks with an unrecognized status appear in none of the buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub todo: Vec<Task>,
    pub done: Vec<Task>,
    pub overdue: Vec<Task>,
}

impl Buckets {
    /// Total number of tasks across all three buckets.
    pub fn len(&self) -> usize {
        self.todo.len() + self.done.len() + self.overdue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip_known() {
        for (status, s) in [
            (TaskStatus::Todo, "\"todo\""),
            (TaskStatus::Done, "\"done\""),
            (TaskStatus::Overdue, "\"overdue\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), s);
            assert_eq!(serde_json::from_str::<TaskStatus>(s).unwrap(), status);
        }
    }

    #[test]
    fn test_status_unknown_preserved() {
        let status: TaskStatus = serde_json::from_str("\"snoozed\"").unwrap();
        assert_eq!(status, TaskStatus::Unknown("snoozed".to_string()));
        // Round-trips verbatim rather than being coerced to a known value
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"snoozed\"");
    }

    #[test]
    fn test_status_parse_known_rejects_unknown() {
        assert_eq!(TaskStatus::parse_known("todo"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse_known("DONE"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse_known("snoozed"), None);
        assert_eq!(TaskStatus::parse_known(""), None);
    }

    #[test]
    fn test_task_deserialize_defaults() {
        let json = r#"{
            "id": 7,
            "title": "Pay rent",
            "due_date": "2025-01-01T00:00"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = TaskPatch::status_only(TaskStatus::Done);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"status":"done"}"#
        );
    }

    #[test]
    fn test_patch_from_task_is_full_buffer() {
        let task = Task {
            id: 1,
            title: "Water plants".to_string(),
            description: "the ficus too".to_string(),
            due_date: "2025-06-01T09:00".to_string(),
            status: TaskStatus::Todo,
        };
        let patch = TaskPatch::from(&task);
        assert_eq!(patch.title.as_deref(), Some("Water plants"));
        assert_eq!(patch.description.as_deref(), Some("the ficus too"));
        assert_eq!(patch.due_date.as_deref(), Some("2025-06-01T09:00"));
        assert_eq!(patch.status, Some(TaskStatus::Todo));
    }

    #[test]
    fn test_draft_validate() {
        assert!(TaskDraft::new("Pay rent", "", "2025-01-01T00:00").validate().is_ok());
        assert!(TaskDraft::new("", "", "2025-01-01T00:00").validate().is_err());
        assert!(TaskDraft::new("   ", "", "2025-01-01T00:00").validate().is_err());
        assert!(TaskDraft::new("Pay rent", "", "").validate().is_err());
    }
}
