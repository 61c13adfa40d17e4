//! # Route Module
//!
//! A [`Route`] is one compiled pattern bound to a name and, optionally, a
//! [`Handler`]. Matching a path against a route yields a [`MatchResult`]
//! carrying the typed variables of that one request.

mod matched;

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, RouterError};
use crate::pattern::{compile, CompiledPattern, VarType};

pub use matched::{MatchResult, VarVec, NOT_FOUND};

/// Callback bound to a route.
///
/// `C` is whatever the host passes through `dispatch` (a request/response
/// pair, a test recorder, `()`...). Any closure with the right signature is a
/// handler:
///
/// ```rust
/// use urlmap::route::{Handler, MatchResult};
///
/// fn assert_handler<H: Handler<Vec<String>>>(_: H) {}
///
/// assert_handler(
///     |m: &MatchResult<Vec<String>>, out: &mut Vec<String>| -> anyhow::Result<()> {
///         out.push(m.variable::<String>("slug")?);
///         Ok(())
///     },
/// );
/// ```
pub trait Handler<C>: Send + Sync {
    fn handle(&self, matched: &MatchResult<C>, args: &mut C) -> anyhow::Result<()>;
}

impl<C, F> Handler<C> for F
where
    F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync,
{
    fn handle(&self, matched: &MatchResult<C>, args: &mut C) -> anyhow::Result<()> {
        self(matched, args)
    }
}

/// Shared handler reference, compared by pointer for deduplication.
pub type BoxedHandler<C> = Arc<dyn Handler<C>>;

/// An immutable compiled pattern with its name and optional handler.
pub struct Route<C> {
    name: Arc<str>,
    pattern: CompiledPattern,
    handler: Option<BoxedHandler<C>>,
}

impl<C> Route<C> {
    /// Compile a route.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRegistration`] if `name` is empty and there is no
    /// handler (nothing would identify the match) or the pattern is malformed.
    pub fn new(
        name: &str,
        pattern: &str,
        handler: Option<BoxedHandler<C>>,
        types: &[VarType],
    ) -> Result<Self> {
        if name.is_empty() && handler.is_none() {
            return Err(RouterError::invalid(
                pattern,
                "a route without a handler needs a name to be told apart",
            ));
        }
        Ok(Self {
            name: Arc::from(name),
            pattern: compile(pattern, types)?,
            handler,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.pattern.has_trailing_slash()
    }

    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Convert captured strings into typed variables, in placeholder order.
    ///
    /// # Errors
    ///
    /// [`RouterError::TypeConversion`] when a capture does not parse as its
    /// declared type (numeric overflow).
    pub fn extract_variables(&self, captured: &[&str]) -> Result<VarVec> {
        self.pattern
            .variables()
            .iter()
            .zip(captured)
            .map(|(var, raw)| {
                var.var_type
                    .parse_value(&var.name, raw)
                    .map(|value| (Arc::clone(&var.name), value))
            })
            .collect()
    }

    /// Full match of an already normalized path.
    ///
    /// `Ok(None)` means the pattern does not match; a conversion failure on a
    /// matching path is an error, not a miss.
    pub fn try_match(&self, path: &str) -> Result<Option<MatchResult<C>>> {
        let Some(captured) = self.pattern.captures(path) else {
            return Ok(None);
        };
        let variables = self.extract_variables(&captured)?;
        Ok(Some(MatchResult::matched(
            Arc::clone(&self.name),
            self.pattern.pattern_arc(),
            variables,
            self.handler.as_ref().map(Arc::clone),
        )))
    }
}

impl<C> PartialEq for Route<C> {
    /// Same matcher and same handler; the name does not take part.
    fn eq(&self, other: &Self) -> bool {
        let same_handler = match (&self.handler, &other.handler) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_handler && self.pattern == other.pattern
    }
}

impl<C> fmt::Debug for Route<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern.pattern())
            .field("regex", &self.pattern.regex_source())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
