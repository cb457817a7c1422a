//! Configuration for taskdeck.
//!
//! One KDL file holds user preferences:
//!
//! ## config.kdl
//!
//! Located at `~/.config/taskdeck/config.kdl`:
//!
//! ```kdl
//! endpoint "http://localhost:8000/api"
//! token-cookie "token"
//! ```
//!
//! - `endpoint` - base URL of the task store API
//! - `token-cookie` - name of the session token cookie the gate checks
//!
//! ## Precedence
//!
//! CLI flag > env var (`TD_ENDPOINT`, `TD_TOKEN_COOKIE`) > config.kdl >
//! built-in defaults.
//!
//! Use the [`resolver`] module for unified precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, Resolved, ResolvedConfig, TD_ENDPOINT_ENV, TD_TOKEN_COOKIE_ENV, ValueSource,
    resolve,
};
pub use schema::{DEFAULT_ENDPOINT, DeckConfig, config_file_path};
