//! Taskdeck - a task-board client for a remote task store.
//!
//! This library provides the core functionality for the `td` CLI tool:
//! loading and mutating tasks against a remote store, partitioning them
//! into status buckets, and deciding route admission for the dashboard.

pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod gate;
pub mod models;
pub mod store;
pub mod web;

/// Library-level error type for taskdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Board(#[from] board::BoardError),

    #[error("{0}")]
    Store(#[from] store::StoreError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for taskdeck operations.
pub type Result<T> = std::result::Result<T, Error>;
