//! Route admission gate.
//!
//! A stateless, synchronous decision evaluated per navigation attempt,
//! before any dashboard code runs. The only inputs are the requested path
//! and whether a session token is present; the token's content is never
//! read. Malformed or absent cookies count as "no token" - the gate has
//! no error path.

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Path of the registration page.
pub const REGISTER_PATH: &str = "/register";

/// Path of the dashboard (protected, including nested paths).
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Default name of the session token cookie.
pub const DEFAULT_TOKEN_COOKIE: &str = "token";

/// The gate's verdict for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Pass the request through unchanged.
    Allow,
    /// Redirect the visitor to the login page.
    RedirectToLogin,
    /// Redirect the visitor to the dashboard.
    RedirectToDashboard,
}

impl Admission {
    /// Whether the request passes through.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allow)
    }

    /// The redirect target, if the verdict is a redirect.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Admission::Allow => None,
            Admission::RedirectToLogin => Some(LOGIN_PATH),
            Admission::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// Decide admission for a navigation attempt.
///
/// Decision table:
/// - dashboard (exact or nested) without a token -> redirect to login
/// - dashboard with a token -> allow
/// - login/register with a token -> redirect to dashboard
/// - login/register without a token -> allow
/// - anything else -> allow
pub fn decide(path: &str, token_present: bool) -> Admission {
    if is_dashboard_path(path) {
        if token_present {
            Admission::Allow
        } else {
            Admission::RedirectToLogin
        }
    } else if path == LOGIN_PATH || path == REGISTER_PATH {
        if token_present {
            Admission::RedirectToDashboard
        } else {
            Admission::Allow
        }
    } else {
        Admission::Allow
    }
}

/// Whether a path is the dashboard or nested under it.
fn is_dashboard_path(path: &str) -> bool {
    path == DASHBOARD_PATH || path.strip_prefix(DASHBOARD_PATH).is_some_and(|rest| rest.starts_with('/'))
}

/// Presence check for a named cookie in a `Cookie` header value.
///
/// Presence only: an empty value counts as absent, and anything that does
/// not parse as `name=value` pairs is skipped.
pub fn token_present(cookie_header: Option<&str>, cookie_name: &str) -> bool {
    let Some(header) = cookie_header else {
        return false;
    };
    header.split(';').any(|pair| {
        let mut parts = pair.splitn(2, '=');
        let name = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        name == cookie_name && !value.is_empty()
    })
}
