//! Taskdeck CLI - a task board backed by a remote task store.

use clap::Parser;
use std::process;
use taskdeck::cli::{Cli, Commands, ConfigCommands, GateCommands, TaskCommands};
use taskdeck::commands::{self, Output};
use taskdeck::config::{self, ConfigOverrides};

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    if let Err(e) = run_command(cli, human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn run_command(cli: Cli, human: bool) -> taskdeck::Result<()> {
    let mut overrides = ConfigOverrides::new();
    if let Some(endpoint) = cli.endpoint {
        overrides = overrides.with_endpoint(endpoint);
    }
    let config = config::resolve(&overrides)?;

    match cli.command {
        Commands::Board => {
            let result = commands::board_view(&config)?;
            output(&result, human);
        }

        Commands::Task { command } => match command {
            TaskCommands::List { status } => {
                let result = commands::task_list(&config, status.as_deref())?;
                output(&result, human);
            }

            TaskCommands::Create {
                title,
                description,
                due_date,
            } => {
                let result = commands::task_create(&config, title, description, due_date)?;
                output(&result, human);
            }

            TaskCommands::Update {
                id,
                title,
                description,
                due_date,
            } => {
                let result = commands::task_update(&config, id, title, description, due_date)?;
                output(&result, human);
            }

            TaskCommands::Status { id, status } => {
                let result = commands::task_status(&config, id, &status)?;
                output(&result, human);
            }

            TaskCommands::Delete { id } => {
                let result = commands::task_delete(&config, id)?;
                output(&result, human);
            }
        },

        Commands::Gate { command } => match command {
            GateCommands::Check {
                path,
                token,
                cookie,
            } => {
                let result =
                    commands::gate_check(path, token, cookie.as_deref(), config.token_cookie());
                output(&result, human);
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let result = commands::config_show(&config);
                output(&result, human);
            }
            ConfigCommands::Path => {
                let result = commands::config_path();
                output(&result, human);
            }
        },

        Commands::Serve { port, host } => {
            run_serve(config.endpoint(), config.token_cookie(), port, &host)?;
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Run the web dashboard server.
fn run_serve(endpoint: &str, token_cookie: &str, port: u16, host: &str) -> taskdeck::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| taskdeck::Error::Other(format!("Failed to create runtime: {}", e)))?
        .block_on(async {
            taskdeck::web::start_server(endpoint, token_cookie, port, host)
                .await
                .map_err(|e| taskdeck::Error::Other(format!("Dashboard server error: {}", e)))
        })
}
