//! CLI argument definitions for taskdeck.

use clap::{Parser, Subcommand};

/// Taskdeck - a task board backed by a remote task store.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, about = "A CLI and local web dashboard for task boards", long_about = None)]
#[command(version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("TD_GIT_COMMIT"), " ", env!("TD_BUILD_TIMESTAMP"), ")"
))]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Base endpoint of the task store API
    /// (overrides TD_ENDPOINT and config.kdl)
    #[arg(short = 'e', long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board partitioned into todo/done/overdue buckets
    Board,

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Route admission gate commands
    Gate {
        #[command(subcommand)]
        command: GateCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Start the local web dashboard
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "TD_PORT", default_value = "3030")]
        port: u16,

        /// Host address to bind to (use 0.0.0.0 for network access)
        #[arg(long, env = "TD_HOST", default_value = "127.0.0.1")]
        host: String,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks, optionally filtered by status
    List {
        /// Filter by status (todo, done, overdue)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Create a new task
    Create {
        /// Task title
        title: String,

        /// Detailed description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Due timestamp (ISO 8601, e.g. 2025-01-01T00:00)
        #[arg(short = 'u', long = "due")]
        due_date: String,
    },

    /// Update an existing task
    Update {
        /// Task id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due timestamp
        #[arg(short = 'u', long = "due")]
        due_date: Option<String>,
    },

    /// Move a task to a new status
    Status {
        /// Task id
        id: u64,

        /// New status (todo, done, overdue)
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: u64,
    },
}

/// Gate subcommands
#[derive(Subcommand, Debug)]
pub enum GateCommands {
    /// Decide admission for a path
    Check {
        /// Requested path (e.g. /dashboard/42)
        path: String,

        /// Treat the session token as present
        #[arg(long)]
        token: bool,

        /// Cookie header to check for the token instead of --token
        #[arg(long)]
        cookie: Option<String>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration and where each value came from
    Show,

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_gate_check_args() {
        let cli = Cli::parse_from(["td", "gate", "check", "/dashboard/42", "--token"]);
        match cli.command {
            Commands::Gate {
                command: GateCommands::Check { path, token, cookie },
            } => {
                assert_eq!(path, "/dashboard/42");
                assert!(token);
                assert!(cookie.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_endpoint_flag_after_subcommand() {
        let cli = Cli::parse_from(["td", "board", "-e", "http://x:1/api"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://x:1/api"));
    }
}
