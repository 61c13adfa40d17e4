//! Structured logging initialization
//!
//! Route registration is logged at `info`, each match at `debug` and each
//! match attempt at `trace`, all with structured fields (`route_name`,
//! `pattern`, `path`, ...). This module installs the subscriber that renders
//! them, as JSON for production or pretty-printed for development.
//!
//! ## Environment Variables
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `URLMAP_LOG_LEVEL` | trace/debug/info/warn/error | `info` |
//! | `URLMAP_LOG_FORMAT` | json/pretty | `json` |
//! | `URLMAP_LOG_LOCATION` | true/false | `false` |
//! | `URLMAP_LOG_TARGET_FILTER` | comma-separated directives | none |
//!
//! `RUST_LOG`, when set, replaces the level entirely.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// `pretty` in any case selects [`LogFormat::Pretty`]; anything else is JSON.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

/// Subscriber settings, normally read from `URLMAP_LOG_*`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub format: LogFormat,
    /// Extra `target=level` directives, comma-separated
    pub target_filter: Option<String>,
    /// Emit file and line of each event
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Unset or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("URLMAP_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: env::var("URLMAP_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            target_filter: env::var("URLMAP_LOG_TARGET_FILTER").ok(),
            include_location: env::var("URLMAP_LOG_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    /// Directives from `target_filter` that parse, in order.
    fn directives(&self) -> Vec<tracing_subscriber::filter::Directive> {
        let Some(filter) = &self.target_filter else {
            return Vec::new();
        };
        filter
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .filter_map(|d| match d.parse() {
                Ok(directive) => Some(directive),
                Err(_) => {
                    eprintln!("Warning: ignoring invalid log filter directive: {d}");
                    None
                }
            })
            .collect()
    }

    fn env_filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));
        self.directives()
            .into_iter()
            .fold(base, |filter, directive| filter.add_directive(directive))
    }
}

/// Initialize logging from [`LogConfig::from_env`], overriding the level.
///
/// # Example
///
/// ```no_run
/// urlmap::logging::init_logging("debug")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(log_level: &str) -> Result<()> {
    let config = LogConfig {
        log_level: log_level.to_string(),
        ..LogConfig::from_env()
    };
    init_logging_with_config(&config)
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let location = config.include_location;
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(location)
            .with_line_number(location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(location)
            .with_line_number(location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}
