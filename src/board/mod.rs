//! Task board controller.
//!
//! The board owns the in-memory task collection and mediates every
//! mutation against the task store. The consistency model is
//! write-then-resynchronize: no operation patches the collection locally;
//! every successful write is followed by a full authoritative reload, so
//! the visible list also picks up anything the store recomputed on its own
//! (e.g. flipping a task to overdue).

use crate::models::{Buckets, Task, TaskDraft, TaskStatus};
use crate::store::TaskStore;
use thiserror::Error;

/// Operation-tagged, user-facing board errors.
///
/// Exactly one of these occupies the board's error slot at a time; the
/// most recent failure wins and only an explicit dismissal clears it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Failed to load tasks: {0}")]
    LoadFailed(String),

    #[error("Failed to create task: {0}")]
    CreateFailed(String),

    #[error("Failed to update task: {0}")]
    UpdateFailed(String),

    #[error("Failed to delete task: {0}")]
    DeleteFailed(String),

    #[error("Failed to update task status: {0}")]
    StatusChangeFailed(String),
}

impl BoardError {
    /// Short tag naming the originating operation.
    pub fn operation(&self) -> &'static str {
        match self {
            BoardError::LoadFailed(_) => "load",
            BoardError::CreateFailed(_) => "create",
            BoardError::UpdateFailed(_) => "update",
            BoardError::DeleteFailed(_) => "delete",
            BoardError::StatusChangeFailed(_) => "status",
        }
    }
}

/// The task board: collection, buffers, and the single error slot.
///
/// Generic over the store seam so tests can drive it in-memory. All
/// mutation goes through the methods here; readers only get shared
/// references.
pub struct Board<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
    draft: TaskDraft,
    editing: Option<Task>,
    error: Option<BoardError>,
    loading: bool,
}

impl<S: TaskStore> Board<S> {
    /// Create an empty board over the given store. Call `load` to
    /// populate it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            draft: TaskDraft::default(),
            editing: None,
            error: None,
            loading: false,
        }
    }

    /// The current task collection, in store order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current error, if one is showing.
    pub fn error(&self) -> Option<&BoardError> {
        self.error.as_ref()
    }

    /// Dismiss the current error. Successful operations never do this on
    /// their own; it takes an explicit user action.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Whether an initial load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The new-task draft buffer.
    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Mutable access to the draft for form input.
    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    /// The active edit buffer, if a task is being edited.
    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    /// Mutable access to the edit buffer fields.
    pub fn editing_mut(&mut self) -> Option<&mut Task> {
        self.editing.as_mut()
    }

    /// Start editing the task with the given id, copying it into the edit
    /// buffer. Any prior unsaved buffer is discarded silently.
    ///
    /// Returns false if the id is not in the current collection.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        match self.tasks.iter().find(|t| t.id == id) {
            Some(task) => {
                self.editing = Some(task.clone());
                true
            }
            None => false,
        }
    }

    /// Drop the edit buffer without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Fetch the full collection from the store and replace the current
    /// one atomically. On failure the previous collection stays in place
    /// and the error slot is set.
    pub fn load(&mut self) -> Result<(), BoardError> {
        self.loading = true;
        let result = self.store.list();
        self.loading = false;

        match result {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "reloaded task collection");
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => self.fail(BoardError::LoadFailed(e.to_string())),
        }
    }

    /// Create a task from the draft buffer, returning the record as the
    /// store confirmed it.
    ///
    /// Rejects an incomplete draft before any network call. On success the
    /// draft is cleared and the collection reloaded; on failure the draft
    /// is preserved so the user can retry without re-typing.
    pub fn create(&mut self) -> Result<Task, BoardError> {
        if let Err(msg) = self.draft.validate() {
            return self.fail(BoardError::CreateFailed(msg));
        }

        match self.store.create(&self.draft) {
            Ok(task) => {
                tracing::debug!(id = task.id, "created task");
                self.draft = TaskDraft::default();
                self.load()?;
                Ok(task)
            }
            Err(e) => self.fail(BoardError::CreateFailed(e.to_string())),
        }
    }

    /// Save the edit buffer back to the store as a full-buffer update.
    ///
    /// Rejected before any network call when no edit is active. On success
    /// the buffer is cleared and the collection reloaded; on failure the
    /// buffer stays open.
    pub fn update(&mut self) -> Result<Task, BoardError> {
        let Some(edit) = self.editing.clone() else {
            return self.fail(BoardError::UpdateFailed(
                "no task is being edited".to_string(),
            ));
        };

        match self.store.replace(edit.id, &(&edit).into()) {
            Ok(task) => {
                tracing::debug!(id = edit.id, "updated task");
                self.editing = None;
                self.load()?;
                Ok(task)
            }
            Err(e) => self.fail(BoardError::UpdateFailed(e.to_string())),
        }
    }

    /// Delete a task by id. The task stays visible until the store
    /// confirms and the reload lands (no optimistic removal).
    pub fn remove(&mut self, id: u64) -> Result<(), BoardError> {
        match self.store.remove(id) {
            Ok(()) => {
                tracing::debug!(id, "deleted task");
                self.load()
            }
            Err(e) => self.fail(BoardError::DeleteFailed(e.to_string())),
        }
    }

    /// Move a task to a new status. A restricted update: only the status
    /// field is sent.
    pub fn set_status(&mut self, id: u64, status: TaskStatus) -> Result<Task, BoardError> {
        match self
            .store
            .replace(id, &crate::models::TaskPatch::status_only(status))
        {
            Ok(task) => {
                tracing::debug!(id, "changed task status");
                self.load()?;
                Ok(task)
            }
            Err(e) => self.fail(BoardError::StatusChangeFailed(e.to_string())),
        }
    }

    /// Partition the current collection into the three status buckets,
    /// preserving collection order within each bucket. Tasks with an
    /// unrecognized status land in none of them.
    pub fn buckets_by_status(&self) -> Buckets {
        let mut buckets = Buckets::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Todo => buckets.todo.push(task.clone()),
                TaskStatus::Done => buckets.done.push(task.clone()),
                TaskStatus::Overdue => buckets.overdue.push(task.clone()),
                TaskStatus::Unknown(_) => {}
            }
        }
        buckets
    }

    /// Record a failure in the error slot and propagate it.
    fn fail<T>(&mut self, error: BoardError) -> Result<T, BoardError> {
        tracing::warn!(operation = error.operation(), %error, "board operation failed");
        self.error = Some(error.clone());
        Err(error)
    }
}
