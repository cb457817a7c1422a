//! JSON-over-HTTP task store client.
//!
//! Talks to the remote store's REST surface:
//! - `GET /tasks/` - full task list
//! - `POST /tasks/` - create
//! - `PUT /tasks/{id}/` - partial update
//! - `DELETE /tasks/{id}/` - delete
//!
//! All requests carry `Content-Type: application/json`. Blocking `ureq`
//! calls, which fits the CLI's one-shot usage.

use super::{StoreError, TaskStore};
use crate::models::{Task, TaskDraft, TaskPatch};

/// User-Agent header sent with every request
const USER_AGENT: &str = "taskdeck-cli";

/// Client for a task store reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    /// Base endpoint, e.g. "http://localhost:8000/api"
    base: String,
}

impl HttpTaskStore {
    /// Create a client against the given base endpoint.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// The configured base endpoint.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        ureq::request(method, &self.url(path))
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .set("User-Agent", USER_AGENT)
    }
}

/// Map a ureq failure onto a `StoreError`.
fn map_err(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(code, resp) => {
            let body = resp.into_string().unwrap_or_default();
            StoreError::Status(code, body)
        }
        other => StoreError::Transport(other.to_string()),
    }
}

impl TaskStore for HttpTaskStore {
    fn list(&self) -> Result<Vec<Task>, StoreError> {
        let resp = self.request("GET", "/tasks/").call().map_err(map_err)?;
        resp.into_json::<Vec<Task>>()
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let resp = self
            .request("POST", "/tasks/")
            .send_json(draft)
            .map_err(map_err)?;
        resp.into_json::<Task>()
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn replace(&self, id: u64, patch: &TaskPatch) -> Result<Task, StoreError> {
        let resp = self
            .request("PUT", &format!("/tasks/{}/", id))
            .send_json(patch)
            .map_err(map_err)?;
        resp.into_json::<Task>()
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn remove(&self, id: u64) -> Result<(), StoreError> {
        // Acknowledgement only; the body, if any, is ignored.
        self.request("DELETE", &format!("/tasks/{}/", id))
            .call()
            .map_err(map_err)?;
        Ok(())
    }
}
