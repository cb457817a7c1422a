//! Local web dashboard.
//!
//! Serves the board as a three-column HTML page plus a JSON view, with
//! the route admission gate mounted as middleware in front of every
//! request: `/dashboard` (and nested paths) require a session token
//! cookie, `/login` and `/register` bounce already-authenticated visitors
//! back to the dashboard. Token issuance is not handled here; the pages
//! only exist as navigation targets for the gate.

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::board::Board;
use crate::gate;
use crate::store::HttpTaskStore;

/// Default dashboard port
pub const DEFAULT_PORT: u16 = 3030;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The board, serialized behind a mutex so each request sees a
    /// consistent collection
    pub board: Arc<Mutex<Board<HttpTaskStore>>>,
    /// Name of the session token cookie the gate checks
    pub token_cookie: Arc<str>,
}

impl AppState {
    /// Build state for a board against the given store endpoint.
    pub fn new(endpoint: &str, token_cookie: &str) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::new(HttpTaskStore::new(endpoint)))),
            token_cookie: Arc::from(token_cookie),
        }
    }
}

/// Build the dashboard router with the admission gate layered in front.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_root))
        .route("/dashboard", get(serve_dashboard))
        .route("/dashboard/dismiss-error", get(dismiss_error))
        .route("/login", get(serve_login))
        .route("/register", get(serve_register))
        .route("/api/tasks", get(get_tasks))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admission_gate,
        ))
        .with_state(state)
}

/// Start the dashboard server.
pub async fn start_server(
    endpoint: &str,
    token_cookie: &str,
    port: u16,
    host: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(endpoint, token_cookie);
    let app = router(state);

    let host_addr: std::net::IpAddr = host
        .parse()
        .map_err(|e| format!("Invalid host address '{}': {}", host, e))?;
    let addr = SocketAddr::from((host_addr, port));
    println!("Starting taskdeck dashboard at http://{}", addr);
    println!("Press Ctrl+C to stop");
    tracing::info!(endpoint, %addr, "dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Admission middleware: every navigation passes through the gate before
/// any handler runs.
async fn admission_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok());
    let token_present = gate::token_present(cookie_header, &state.token_cookie);

    match gate::decide(req.uri().path(), token_present) {
        gate::Admission::Allow => next.run(req).await,
        decision => {
            let target = decision.redirect_target().unwrap_or(gate::LOGIN_PATH);
            tracing::debug!(path = req.uri().path(), target, "gate redirect");
            Redirect::temporary(target).into_response()
        }
    }
}

/// The root just forwards to the dashboard; the gate takes it from there.
async fn serve_root() -> Redirect {
    Redirect::temporary(gate::DASHBOARD_PATH)
}

/// Render the board.
async fn serve_dashboard(State(state): State<AppState>) -> Html<String> {
    let mut board = state.board.lock().await;
    // A failed reload keeps the last-known-good collection and shows up
    // in the banner below.
    let _ = board.load();
    Html(render_dashboard(&board))
}

/// Dismiss the error banner, then return to the board.
async fn dismiss_error(State(state): State<AppState>) -> Redirect {
    state.board.lock().await.dismiss_error();
    Redirect::temporary(gate::DASHBOARD_PATH)
}

async fn serve_login() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Sign in</title></head>\
         <body><h1>Sign in</h1>\
         <p>Sessions are issued by the identity service; set the session \
         cookie and open <a href=\"/dashboard\">the dashboard</a>.</p>\
         </body></html>",
    )
}

async fn serve_register() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Register</title></head>\
         <body><h1>Register</h1>\
         <p>Accounts are managed by the identity service.</p>\
         </body></html>",
    )
}

/// JSON view of the current collection.
async fn get_tasks(State(state): State<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut board = state.board.lock().await;
    board
        .load()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(serde_json::json!({ "tasks": board.tasks() })))
}

/// Minimal HTML escaping for user-supplied strings.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Server-side render of the three-column board.
fn render_dashboard(board: &Board<HttpTaskStore>) -> String {
    let buckets = board.buckets_by_status();
    let mut page = String::from(
        "<!doctype html><html><head><title>Task Manager</title></head><body>\
         <h1>Task Manager</h1>",
    );

    if let Some(error) = board.error() {
        page.push_str(&format!(
            "<div class=\"error\">{} <a href=\"/dashboard/dismiss-error\">&times;</a></div>",
            escape_html(&error.to_string())
        ));
    }

    for (label, tasks) in [
        ("To Do", &buckets.todo),
        ("Done", &buckets.done),
        ("Overdue", &buckets.overdue),
    ] {
        page.push_str(&format!("<section><h2>{}</h2>", label));
        if tasks.is_empty() {
            page.push_str("<p>No tasks</p>");
        } else {
            page.push_str("<ul>");
            for task in tasks {
                page.push_str(&format!(
                    "<li><strong>{}</strong> {} <em>due {}</em></li>",
                    escape_html(&task.title),
                    escape_html(&task.description),
                    escape_html(&task.due_date)
                ));
            }
            page.push_str("</ul>");
        }
        page.push_str("</section>");
    }

    page.push_str(&format!(
        "<footer>as of {}</footer></body></html>",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%SZ")
    ));
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a&b\"</b>"),
            "&lt;b&gt;&quot;a&amp;b&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_empty_board() {
        let board = Board::new(HttpTaskStore::new("http://127.0.0.1:1/api"));
        let page = render_dashboard(&board);
        assert!(page.contains("To Do"));
        assert!(page.contains("Done"));
        assert!(page.contains("Overdue"));
        assert!(page.contains("No tasks"));
        assert!(!page.contains("class=\"error\""));
    }
}
