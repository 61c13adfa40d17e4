use thiserror::Error;

/// Errors raised while registering routes or matching requests.
///
/// Registration errors (`InvalidRegistration`, `UnsupportedType`) are fatal to
/// startup. Match-time errors (`UnsupportedMethod`, `TypeConversion`,
/// `UnknownVariable`, `Handler`) are returned to the caller of a single
/// `match_path`/`dispatch` call. "No route matched" is never an error, see
/// [`crate::route::MatchResult::is_not_found`].
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route cannot be registered: missing identity or malformed pattern.
    #[error("invalid registration for pattern '{pattern}': {reason}")]
    InvalidRegistration {
        /// Pattern as given by the caller
        pattern: String,
        /// Human readable reason
        reason: String,
    },

    /// A declared variable type is not one of string, int, long, decimal, boolean.
    #[error("unsupported variable type '{name}'")]
    UnsupportedType {
        /// The type name that was rejected
        name: String,
    },

    /// Only GET, POST, PUT, DELETE, HEAD, OPTIONS and TRACE have route tables.
    #[error("HTTP method '{method}' is not supported")]
    UnsupportedMethod {
        /// The method token as received
        method: String,
    },

    /// A captured segment passed the matcher but could not be parsed.
    #[error("cannot convert '{value}' of variable '{variable}' to {expected}")]
    TypeConversion {
        /// Variable name from the pattern
        variable: String,
        /// Captured text
        value: String,
        /// Target type name
        expected: &'static str,
    },

    /// The matched route has no variable with this name.
    #[error("route '{route}' has no variable named '{variable}'")]
    UnknownVariable {
        /// Name of the matched route
        route: String,
        /// Requested variable
        variable: String,
    },

    /// The bound handler failed.
    #[error("handler for route '{route}' failed: {source}")]
    Handler {
        /// Name of the matched route
        route: String,
        /// Error returned by the handler
        #[source]
        source: anyhow::Error,
    },
}

impl RouterError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidRegistration {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case name of the variant, used by route manifests.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::InvalidRegistration { .. } => "invalid_registration",
            RouterError::UnsupportedType { .. } => "unsupported_type",
            RouterError::UnsupportedMethod { .. } => "unsupported_method",
            RouterError::TypeConversion { .. } => "type_conversion",
            RouterError::UnknownVariable { .. } => "unknown_variable",
            RouterError::Handler { .. } => "handler",
        }
    }

    /// True for errors that can only happen while building the router.
    #[must_use]
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            RouterError::InvalidRegistration { .. } | RouterError::UnsupportedType { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;
