//! Task store client layer.
//!
//! The remote task store is the system of record for tasks. This module
//! provides:
//! - `TaskStore` - the trait the board controller talks through
//! - `HttpTaskStore` - the JSON-over-HTTP implementation
//!
//! No business logic lives here: requests map one-to-one onto store
//! endpoints and every failure surfaces as a single `StoreError`. Retries,
//! if ever wanted, belong to the caller.

pub mod http;

pub use http::HttpTaskStore;

use crate::models::{Task, TaskDraft, TaskPatch};
use thiserror::Error;

/// Errors surfaced by a task store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-success status code.
    #[error("store returned HTTP {0}: {1}")]
    Status(u16, String),

    /// The request never completed (connection refused, DNS, timeout...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered but the body was not what we expected.
    #[error("failed to parse store response: {0}")]
    Parse(String),
}

/// Trait for task store clients.
///
/// The board controller is generic over this seam so tests can drive it
/// with an in-memory store.
pub trait TaskStore {
    /// Fetch all tasks in store order.
    fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Create a task; the store assigns id and initial status.
    fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError>;

    /// Update a task by id; fields absent from the patch are left
    /// unchanged by the store.
    fn replace(&self, id: u64, patch: &TaskPatch) -> Result<Task, StoreError>;

    /// Delete a task by id.
    fn remove(&self, id: u64) -> Result<(), StoreError>;
}
