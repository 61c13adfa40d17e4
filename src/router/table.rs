//! Route table - hot path for matching within one HTTP method.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::error::Result;
use crate::pattern::VarType;
use crate::route::{BoxedHandler, MatchResult, Route};

/// Ordered routes for a single HTTP method.
///
/// Registration order is match priority: the first route whose pattern
/// matches wins, there is no "most specific" tie-break.
///
/// # Registration vs matching
///
/// `register*` takes `&mut self` and belongs to startup. Matching takes
/// `&self`, touches no shared mutable state and may run from any number of
/// threads once registration is done.
pub struct RouteTable<C> {
    routes: Vec<Route<C>>,
    use_trailing_slash_match: bool,
}

impl<C> RouteTable<C> {
    /// Create an empty table.
    ///
    /// With `use_trailing_slash_match` a route registered as `/users` also
    /// matches `/users/`, and one registered as `/users/` also matches `/users`.
    #[must_use]
    pub fn new(use_trailing_slash_match: bool) -> Self {
        Self {
            routes: Vec::new(),
            use_trailing_slash_match,
        }
    }

    #[must_use]
    pub fn use_trailing_slash_match(&self) -> bool {
        self.use_trailing_slash_match
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered routes in priority order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<C>> {
        self.routes.iter()
    }

    /// Register a route with an optional, already shared handler.
    ///
    /// A missing leading `/` is added. Registering a route equal to an
    /// existing one (same matcher, same handler) is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidRegistration` for an empty name without handler or a malformed
    /// pattern. Nothing is added on error.
    pub fn register_handler(
        &mut self,
        name: &str,
        pattern: &str,
        handler: Option<BoxedHandler<C>>,
        types: &[VarType],
    ) -> Result<&mut Self> {
        let pattern: Cow<'_, str> = if pattern.starts_with('/') {
            Cow::Borrowed(pattern)
        } else {
            Cow::Owned(format!("/{pattern}"))
        };

        let route = Route::new(name, &pattern, handler, types)?;

        if self.routes.iter().any(|r| *r == route) {
            debug!(
                route_name = %name,
                pattern = %pattern,
                "Duplicate route ignored"
            );
            return Ok(self);
        }

        info!(
            route_name = %name,
            pattern = %pattern,
            regex = %route.pattern().regex_source(),
            variables = route.pattern().variables().len(),
            has_handler = route.has_handler(),
            "Route registered"
        );
        self.routes.push(route);
        Ok(self)
    }

    /// Register a route whose handler runs on [`dispatch`](Self::dispatch).
    pub fn register<F>(
        &mut self,
        name: &str,
        pattern: &str,
        handler: F,
        types: &[VarType],
    ) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let handler: BoxedHandler<C> = Arc::new(handler);
        self.register_handler(name, pattern, Some(handler), types)
    }

    /// Register a route without handler, identified by `name` only.
    pub fn register_named(
        &mut self,
        name: &str,
        pattern: &str,
        types: &[VarType],
    ) -> Result<&mut Self> {
        self.register_handler(name, pattern, None, types)
    }

    /// Like [`register_named`](Self::register_named) with types given by name
    /// (`"int"`, `"long"`, `"decimal"`, `"boolean"`, `"string"`).
    ///
    /// # Errors
    ///
    /// `UnsupportedType` for an unknown type name, before anything is compiled.
    pub fn register_with_type_names<S: AsRef<str>>(
        &mut self,
        name: &str,
        pattern: &str,
        handler: Option<BoxedHandler<C>>,
        type_names: &[S],
    ) -> Result<&mut Self> {
        let types = VarType::parse_list(type_names)?;
        self.register_handler(name, pattern, handler, &types)
    }

    /// Reconcile the path's trailing slash with the pattern's.
    ///
    /// | path ends with `/` | pattern ends with `/` | result |
    /// |---|---|---|
    /// | yes | yes | unchanged |
    /// | yes | no | trailing `/` removed |
    /// | no | yes | `/` appended |
    /// | no | no | unchanged |
    ///
    /// With trailing-slash matching disabled the path is always unchanged.
    #[must_use]
    pub fn normalize_path<'p>(&self, path: &'p str, pattern_has_trailing_slash: bool) -> Cow<'p, str> {
        if !self.use_trailing_slash_match {
            return Cow::Borrowed(path);
        }
        match (path.strip_suffix('/'), pattern_has_trailing_slash) {
            (Some(stripped), false) => Cow::Borrowed(stripped),
            (None, true) => Cow::Owned(format!("{path}/")),
            _ => Cow::Borrowed(path),
        }
    }

    /// Match a path, scanning routes in registration order.
    ///
    /// An absent path is the empty string (the mount root). Returns the
    /// not-found result when no route matches.
    ///
    /// # Errors
    ///
    /// `TypeConversion` when the first matching route cannot convert a
    /// captured value. Later routes are not tried.
    pub fn match_path<'p>(&self, path: impl Into<Option<&'p str>>) -> Result<MatchResult<C>> {
        let path = path.into().unwrap_or("");
        trace!(path = %path, routes = self.routes.len(), "Route match attempt");

        for route in &self.routes {
            let candidate = self.normalize_path(path, route.has_trailing_slash());
            if let Some(matched) = route.try_match(&candidate)? {
                debug!(
                    path = %path,
                    route_name = %route.name(),
                    pattern = %route.pattern().pattern(),
                    variables = %matched,
                    "Route matched"
                );
                return Ok(matched);
            }
        }

        debug!(path = %path, "No route matched");
        Ok(MatchResult::not_found())
    }

    /// Match, then run the matched route's handler with `args`.
    ///
    /// # Errors
    ///
    /// Everything [`match_path`](Self::match_path) returns, plus
    /// `RouterError::Handler` wrapping whatever the handler returned.
    pub fn dispatch<'p>(
        &self,
        path: impl Into<Option<&'p str>>,
        args: &mut C,
    ) -> Result<MatchResult<C>> {
        let matched = self.match_path(path)?;
        if matched.has_handler() {
            trace!(route_name = %matched.name(), "Handling request");
            matched.invoke(args)?;
        }
        Ok(matched)
    }
}

impl<C> Default for RouteTable<C> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<C> std::fmt::Debug for RouteTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("use_trailing_slash_match", &self.use_trailing_slash_match)
            .finish()
    }
}
