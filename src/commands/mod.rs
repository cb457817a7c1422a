//! Command implementations for the taskdeck CLI.
//!
//! This module contains the business logic behind each CLI command. Every
//! command returns a result struct implementing [`Output`], which the
//! binary prints as JSON or human-readable text.

use crate::board::Board;
use crate::config::ResolvedConfig;
use crate::gate;
use crate::models::{Buckets, Task, TaskDraft, TaskStatus};
use crate::store::HttpTaskStore;
use crate::{Error, Result};
use serde::Serialize;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output: Serialize {
    /// Serialize to JSON string.
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn open_board(config: &ResolvedConfig) -> Board<HttpTaskStore> {
    Board::new(HttpTaskStore::new(config.endpoint()))
}

fn task_line(task: &Task) -> String {
    format!(
        "  #{} {} (due {})",
        task.id, task.title, task.due_date
    )
}

/// Result of `td board`.
#[derive(Debug, Serialize)]
pub struct BoardResult {
    pub buckets: Buckets,
}

impl Output for BoardResult {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for (label, tasks) in [
            ("To Do", &self.buckets.todo),
            ("Done", &self.buckets.done),
            ("Overdue", &self.buckets.overdue),
        ] {
            out.push_str(&format!("{} ({})\n", label, tasks.len()));
            for task in tasks {
                out.push_str(&task_line(task));
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }
}

/// Show the board partitioned into status buckets.
pub fn board_view(config: &ResolvedConfig) -> Result<BoardResult> {
    let mut board = open_board(config);
    board.load()?;
    Ok(BoardResult {
        buckets: board.buckets_by_status(),
    })
}

/// Result of `td task list`.
#[derive(Debug, Serialize)]
pub struct TaskListResult {
    pub count: usize,
    pub tasks: Vec<Task>,
}

impl Output for TaskListResult {
    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks".to_string();
        }
        let mut out = String::new();
        for task in &self.tasks {
            out.push_str(&format!(
                "  #{} [{}] {} (due {})\n",
                task.id, task.status, task.title, task.due_date
            ));
        }
        out.trim_end().to_string()
    }
}

/// List tasks, optionally filtered by status.
pub fn task_list(config: &ResolvedConfig, status: Option<&str>) -> Result<TaskListResult> {
    let filter = match status {
        Some(s) => Some(TaskStatus::parse_known(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown status {:?} (expected todo, done, or overdue)",
                s
            ))
        })?),
        None => None,
    };

    let mut board = open_board(config);
    board.load()?;

    let tasks: Vec<Task> = board
        .tasks()
        .iter()
        .filter(|t| filter.as_ref().is_none_or(|f| &t.status == f))
        .cloned()
        .collect();

    Ok(TaskListResult {
        count: tasks.len(),
        tasks,
    })
}

/// Result of a task mutation (`create`, `update`, `status`).
#[derive(Debug, Serialize)]
pub struct TaskResult {
    pub action: &'static str,
    pub task: Task,
}

impl Output for TaskResult {
    fn to_human(&self) -> String {
        format!(
            "{} task #{} \"{}\" [{}]",
            self.action, self.task.id, self.task.title, self.task.status
        )
    }
}

/// Create a task from the given fields.
pub fn task_create(
    config: &ResolvedConfig,
    title: String,
    description: String,
    due_date: String,
) -> Result<TaskResult> {
    let mut board = open_board(config);
    *board.draft_mut() = TaskDraft::new(title, description, due_date);
    let task = board.create()?;
    Ok(TaskResult {
        action: "Created",
        task,
    })
}

/// Update fields of an existing task through the edit buffer.
pub fn task_update(
    config: &ResolvedConfig,
    id: u64,
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
) -> Result<TaskResult> {
    let mut board = open_board(config);
    board.load()?;
    if !board.begin_edit(id) {
        return Err(Error::InvalidInput(format!("no task with id {}", id)));
    }
    if let Some(edit) = board.editing_mut() {
        if let Some(title) = title {
            edit.title = title;
        }
        if let Some(description) = description {
            edit.description = description;
        }
        if let Some(due_date) = due_date {
            edit.due_date = due_date;
        }
    }
    let task = board.update()?;
    Ok(TaskResult {
        action: "Updated",
        task,
    })
}

/// Move a task to a new status.
pub fn task_status(config: &ResolvedConfig, id: u64, status: &str) -> Result<TaskResult> {
    let status = TaskStatus::parse_known(status).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unknown status {:?} (expected todo, done, or overdue)",
            status
        ))
    })?;

    let mut board = open_board(config);
    board.load()?;
    let task = board.set_status(id, status)?;
    Ok(TaskResult {
        action: "Moved",
        task,
    })
}

/// Result of `td task delete`.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub id: u64,
    pub deleted: bool,
}

impl Output for DeleteResult {
    fn to_human(&self) -> String {
        format!("Deleted task #{}", self.id)
    }
}

/// Delete a task by id.
pub fn task_delete(config: &ResolvedConfig, id: u64) -> Result<DeleteResult> {
    let mut board = open_board(config);
    board.load()?;
    board.remove(id)?;
    Ok(DeleteResult { id, deleted: true })
}

/// Result of `td gate check`.
#[derive(Debug, Serialize)]
pub struct GateCheckResult {
    pub path: String,
    pub token_present: bool,
    pub decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'static str>,
}

impl Output for GateCheckResult {
    fn to_human(&self) -> String {
        match self.location {
            Some(location) => format!("{}: redirect -> {}", self.path, location),
            None => format!("{}: allow", self.path),
        }
    }
}

/// Decide admission for a path, taking token presence from either an
/// explicit flag or a cookie header.
pub fn gate_check(
    path: String,
    token: bool,
    cookie: Option<&str>,
    cookie_name: &str,
) -> GateCheckResult {
    let token_present = token || gate::token_present(cookie, cookie_name);
    let admission = gate::decide(&path, token_present);
    GateCheckResult {
        path,
        token_present,
        decision: if admission.is_allowed() {
            "allow"
        } else {
            "redirect"
        },
        location: admission.redirect_target(),
    }
}

/// Result of `td config show`.
#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    pub endpoint: String,
    pub endpoint_source: String,
    pub token_cookie: String,
    pub token_cookie_source: String,
}

impl Output for ConfigShowResult {
    fn to_human(&self) -> String {
        format!(
            "endpoint     = {} ({})\ntoken-cookie = {} ({})",
            self.endpoint, self.endpoint_source, self.token_cookie, self.token_cookie_source
        )
    }
}

/// Show the resolved configuration with sources.
pub fn config_show(config: &ResolvedConfig) -> ConfigShowResult {
    ConfigShowResult {
        endpoint: config.endpoint().to_string(),
        endpoint_source: config.endpoint.source.to_string(),
        token_cookie: config.token_cookie().to_string(),
        token_cookie_source: config.token_cookie.source.to_string(),
    }
}

/// Result of `td config path`.
#[derive(Debug, Serialize)]
pub struct ConfigPathResult {
    pub path: Option<String>,
}

impl Output for ConfigPathResult {
    fn to_human(&self) -> String {
        match self.path {
            Some(ref path) => path.clone(),
            None => "no config directory available".to_string(),
        }
    }
}

/// Print the config file location.
pub fn config_path() -> ConfigPathResult {
    ConfigPathResult {
        path: crate::config::config_file_path().map(|p| p.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn sample_task() -> Task {
        Task {
            id: 3,
            title: "Pay rent".to_string(),
            description: String::new(),
            due_date: "2025-01-01T00:00".to_string(),
            status: TaskStatus::Todo,
        }
    }

    #[test]
    fn test_task_result_output() {
        let result = TaskResult {
            action: "Created",
            task: sample_task(),
        };
        assert!(result.to_human().contains("Created task #3"));
        assert!(result.to_json().contains("\"title\":\"Pay rent\""));
    }

    #[test]
    fn test_gate_check_token_flag() {
        let result = gate_check("/dashboard/42".to_string(), false, None, "token");
        assert_eq!(result.decision, "redirect");
        assert_eq!(result.location, Some("/login"));

        let result = gate_check("/dashboard/42".to_string(), true, None, "token");
        assert_eq!(result.decision, "allow");
        assert!(result.location.is_none());
    }

    #[test]
    fn test_gate_check_cookie_header() {
        let result = gate_check(
            "/login".to_string(),
            false,
            Some("a=1; token=xyz"),
            "token",
        );
        assert_eq!(result.decision, "redirect");
        assert_eq!(result.location, Some("/dashboard"));
        assert!(result.token_present);
    }

    #[test]
    fn test_board_result_human_lists_buckets() {
        let result = BoardResult {
            buckets: Buckets {
                todo: vec![sample_task()],
                done: vec![],
                overdue: vec![],
            },
        };
        let human = result.to_human();
        assert!(human.contains("To Do (1)"));
        assert!(human.contains("#3 Pay rent"));
        assert!(human.contains("Done (0)"));
        assert!(human.contains("Overdue (0)"));
    }
}
