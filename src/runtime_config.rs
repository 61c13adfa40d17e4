//! # Runtime Configuration Module
//!
//! Environment variable based configuration for how routers are built.
//!
//! ## Environment Variables
//!
//! ### `URLMAP_TRAILING_SLASH_MATCH`
//!
//! Whether `/users` and `/users/` are treated as the same path. Accepts
//! `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` (case-insensitive).
//!
//! Default: `true`
//!
//! ## Usage
//!
//! ```rust
//! use urlmap::runtime_config::RuntimeConfig;
//! use urlmap::Router;
//!
//! let config = RuntimeConfig::from_env();
//! let router: Router<()> = config.router();
//! assert!(router.is_empty());
//! ```
//!
//! A route manifest that sets `use_trailing_slash_match` explicitly takes
//! precedence over the environment.

use std::env;

use crate::router::Router;

/// Name of the variable read by [`RuntimeConfig::from_env`].
pub const TRAILING_SLASH_ENV: &str = "URLMAP_TRAILING_SLASH_MATCH";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Reconcile trailing slashes between paths and patterns (default: true)
    pub use_trailing_slash_match: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            use_trailing_slash_match: true,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let use_trailing_slash_match = env::var(TRAILING_SLASH_ENV)
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(true);
        RuntimeConfig {
            use_trailing_slash_match,
        }
    }

    /// An empty router configured with this policy.
    #[must_use]
    pub fn router<C>(&self) -> Router<C> {
        Router::new(self.use_trailing_slash_match)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
