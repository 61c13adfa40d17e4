//! Router core module - method selection in front of the route tables.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::table::RouteTable;
use crate::error::{Result, RouterError};
use crate::pattern::VarType;
use crate::route::{BoxedHandler, MatchResult};

/// The HTTP methods that own a route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Every supported method, in table order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for HttpMethod {
    type Err = RouterError;

    /// Case-insensitive: `get`, `Get` and `GET` are the same method.
    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouterError::UnsupportedMethod {
                method: s.to_string(),
            })
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = RouterError;

    fn try_from(method: &http::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Trace => http::Method::TRACE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One [`RouteTable`] per supported HTTP method.
///
/// Built once at startup through the fluent registration methods, then shared
/// read-only (e.g. behind an `Arc`) by every request worker.
///
/// # Example
///
/// ```rust
/// use urlmap::{pattern::VarType, router::Router};
///
/// let mut router: Router<Vec<String>> = Router::default();
/// router
///     .get("show", "/products/{id}", |m, out: &mut Vec<String>| {
///         out.push(format!("product {}", m.variable::<i32>("id")?));
///         Ok(())
///     }, &[VarType::Integer])?
///     .register_named("POST".parse()?, "create", "/products", &[])?;
///
/// let mut out = Vec::new();
/// let m = router.dispatch("get", "/products/13", &mut out)?;
/// assert!(m.is("show"));
/// assert_eq!(out, vec!["product 13".to_string()]);
///
/// assert!(router.match_path("GET", "/nope")?.is_not_found());
/// # Ok::<(), urlmap::RouterError>(())
/// ```
pub struct Router<C> {
    tables: [RouteTable<C>; 7],
}

impl<C> Router<C> {
    /// Create a router whose tables all share the trailing-slash policy.
    #[must_use]
    pub fn new(use_trailing_slash_match: bool) -> Self {
        Self {
            tables: std::array::from_fn(|_| RouteTable::new(use_trailing_slash_match)),
        }
    }

    /// The table for one method.
    #[must_use]
    pub fn table(&self, method: HttpMethod) -> &RouteTable<C> {
        &self.tables[method.index()]
    }

    fn table_mut(&mut self, method: HttpMethod) -> &mut RouteTable<C> {
        &mut self.tables[method.index()]
    }

    /// Total number of routes across all methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.iter().map(RouteTable::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(RouteTable::is_empty)
    }

    /// Register a route with a shared (or no) handler.
    pub fn register_handler(
        &mut self,
        method: HttpMethod,
        name: &str,
        pattern: &str,
        handler: Option<BoxedHandler<C>>,
        types: &[VarType],
    ) -> Result<&mut Self> {
        self.table_mut(method)
            .register_handler(name, pattern, handler, types)?;
        Ok(self)
    }

    /// Register a route with a handler closure.
    pub fn register<F>(
        &mut self,
        method: HttpMethod,
        name: &str,
        pattern: &str,
        handler: F,
        types: &[VarType],
    ) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.table_mut(method).register(name, pattern, handler, types)?;
        Ok(self)
    }

    /// Register a handler-less route, inspected by name after matching.
    pub fn register_named(
        &mut self,
        method: HttpMethod,
        name: &str,
        pattern: &str,
        types: &[VarType],
    ) -> Result<&mut Self> {
        self.table_mut(method).register_named(name, pattern, types)?;
        Ok(self)
    }

    /// Register with types given by name, see
    /// [`RouteTable::register_with_type_names`].
    pub fn register_with_type_names<S: AsRef<str>>(
        &mut self,
        method: HttpMethod,
        name: &str,
        pattern: &str,
        handler: Option<BoxedHandler<C>>,
        type_names: &[S],
    ) -> Result<&mut Self> {
        self.table_mut(method)
            .register_with_type_names(name, pattern, handler, type_names)?;
        Ok(self)
    }

    pub fn get<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Get, name, pattern, handler, types)
    }

    pub fn post<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Post, name, pattern, handler, types)
    }

    pub fn put<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Put, name, pattern, handler, types)
    }

    pub fn delete<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Delete, name, pattern, handler, types)
    }

    pub fn head<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Head, name, pattern, handler, types)
    }

    pub fn options<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Options, name, pattern, handler, types)
    }

    pub fn trace<F>(&mut self, name: &str, pattern: &str, handler: F, types: &[VarType]) -> Result<&mut Self>
    where
        F: Fn(&MatchResult<C>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(HttpMethod::Trace, name, pattern, handler, types)
    }

    /// Match `path` in the table of `method` (case-insensitive).
    ///
    /// # Errors
    ///
    /// `UnsupportedMethod` for anything but GET, POST, PUT, DELETE, HEAD,
    /// OPTIONS and TRACE; no table is consulted in that case.
    pub fn match_path<'p>(
        &self,
        method: &str,
        path: impl Into<Option<&'p str>>,
    ) -> Result<MatchResult<C>> {
        let method: HttpMethod = method.parse()?;
        self.match_method(method, path)
    }

    /// Match with an already resolved method.
    pub fn match_method<'p>(
        &self,
        method: HttpMethod,
        path: impl Into<Option<&'p str>>,
    ) -> Result<MatchResult<C>> {
        self.table(method).match_path(path)
    }

    /// Match and run the bound handler with `args`.
    pub fn dispatch<'p>(
        &self,
        method: &str,
        path: impl Into<Option<&'p str>>,
        args: &mut C,
    ) -> Result<MatchResult<C>> {
        let method: HttpMethod = method.parse()?;
        self.dispatch_method(method, path, args)
    }

    pub fn dispatch_method<'p>(
        &self,
        method: HttpMethod,
        path: impl Into<Option<&'p str>>,
        args: &mut C,
    ) -> Result<MatchResult<C>> {
        debug!(method = %method, "Dispatching");
        self.table(method).dispatch(path, args)
    }

    /// Log every registered route at info level.
    ///
    /// Useful for verifying at startup that routes are loaded correctly.
    pub fn dump_routes(&self) {
        info!(routes_count = self.len(), "Routing table");
        for method in HttpMethod::ALL {
            for route in self.table(method).routes() {
                info!(
                    method = %method,
                    route_name = %route.name(),
                    pattern = %route.pattern().pattern(),
                    regex = %route.pattern().regex_source(),
                    "Route"
                );
            }
        }
    }
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<C> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for method in HttpMethod::ALL {
            map.entry(&method, self.table(method));
        }
        map.finish()
    }
}
