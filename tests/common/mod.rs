//! Common test utilities for taskdeck integration tests.
//!
//! Provides `FakeStore`, an in-process task store speaking the same REST
//! surface as the real one, so client, board, CLI, and dashboard tests
//! never touch the network. Each test spawns its own store on an
//! ephemeral port, making tests parallel-safe.

#![allow(dead_code)]

use assert_cmd::Command;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, mpsc};
use taskdeck::models::{Task, TaskStatus};

/// Shared state of the fake store.
#[derive(Clone, Default)]
struct StoreState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
}

/// An in-process task store bound to an ephemeral loopback port.
pub struct FakeStore {
    pub addr: SocketAddr,
    state: StoreState,
}

impl FakeStore {
    /// Start a fake store on its own thread and runtime.
    pub fn spawn() -> Self {
        let state = StoreState::default();
        state.inner.lock().unwrap().next_id = 1;
        let app = store_router(state.clone());

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv().unwrap();
        Self { addr, state }
    }

    /// Base endpoint for clients, e.g. "http://127.0.0.1:49152/api".
    pub fn base(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Insert a task directly, bypassing the HTTP surface.
    pub fn seed(&self, title: &str, due_date: &str, status: TaskStatus) -> u64 {
        let mut inner = self.state.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.tasks.push(Task {
            id,
            title: title.to_string(),
            description: String::new(),
            due_date: due_date.to_string(),
            status,
        });
        id
    }

    /// Snapshot of the store's current tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.inner.lock().unwrap().tasks.clone()
    }

    /// Get a Command for the td binary pointed at this store.
    pub fn td(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_td"));
        cmd.env("TD_ENDPOINT", self.base());
        cmd.env_remove("TD_TOKEN_COOKIE");
        cmd
    }
}

/// Get a Command for the td binary with an explicit endpoint.
pub fn td_with_endpoint(endpoint: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_td"));
    cmd.env("TD_ENDPOINT", endpoint);
    cmd.env_remove("TD_TOKEN_COOKIE");
    cmd
}

fn store_router(state: StoreState) -> Router {
    Router::new()
        .route("/api/tasks/", get(list_tasks).post(create_task))
        .route("/api/tasks/:id/", put(update_task).delete(delete_task))
        .with_state(state)
}

async fn list_tasks(State(state): State<StoreState>) -> Json<Vec<Task>> {
    Json(state.inner.lock().unwrap().tasks.clone())
}

#[derive(Deserialize)]
struct CreateBody {
    title: String,
    #[serde(default)]
    description: String,
    due_date: String,
}

async fn create_task(
    State(state): State<StoreState>,
    Json(body): Json<CreateBody>,
) -> (StatusCode, Json<Task>) {
    let mut inner = state.inner.lock().unwrap();
    let id = inner.next_id;
    inner.next_id += 1;
    let task = Task {
        id,
        title: body.title,
        description: body.description,
        due_date: body.due_date,
        status: TaskStatus::Todo,
    };
    inner.tasks.push(task.clone());
    (StatusCode::CREATED, Json(task))
}

#[derive(Deserialize)]
struct PatchBody {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    status: Option<String>,
}

async fn update_task(
    State(state): State<StoreState>,
    Path(id): Path<u64>,
    Json(body): Json<PatchBody>,
) -> Result<Json<Task>, StatusCode> {
    let mut inner = state.inner.lock().unwrap();
    let task = inner
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = body.title {
        task.title = title;
    }
    if let Some(description) = body.description {
        task.description = description;
    }
    if let Some(due_date) = body.due_date {
        task.due_date = due_date;
    }
    if let Some(status) = body.status {
        task.status = TaskStatus::from(status);
    }
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<StoreState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut inner = state.inner.lock().unwrap();
    let before = inner.tasks.len();
    inner.tasks.retain(|t| t.id != id);
    if inner.tasks.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
