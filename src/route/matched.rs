use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::Handler;
use crate::error::{Result, RouterError};
use crate::pattern::{FromPathValue, PathValue, MAX_INLINE_VARS};

/// Name carried by the result of a match that found no route.
pub const NOT_FOUND: &str = "404_NOT_FOUND";

/// Stack-allocated variable storage for the hot path.
///
/// Names are `Arc<str>` shared with the route, values are per request.
pub type VarVec = SmallVec<[(Arc<str>, PathValue); MAX_INLINE_VARS]>;

/// Outcome of matching one path.
///
/// Every successful match builds a fresh value; nothing is shared with other
/// requests except the route's immutable name, pattern and handler.
pub struct MatchResult<C> {
    name: Arc<str>,
    pattern: Option<Arc<str>>,
    variables: VarVec,
    handler: Option<Arc<dyn Handler<C>>>,
}

impl<C> MatchResult<C> {
    pub(crate) fn matched(
        name: Arc<str>,
        pattern: Arc<str>,
        variables: VarVec,
        handler: Option<Arc<dyn Handler<C>>>,
    ) -> Self {
        Self {
            name,
            pattern: Some(pattern),
            variables,
            handler,
        }
    }

    /// The "nothing matched" result. Its name is [`NOT_FOUND`].
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            name: Arc::from(NOT_FOUND),
            pattern: None,
            variables: VarVec::new(),
            handler: None,
        }
    }

    /// Name of the matched route, [`NOT_FOUND`] when nothing matched.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the matched route was registered under `name`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        *self.name == *name
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.pattern.is_none()
    }

    /// Pattern of the matched route as registered (with leading `/`).
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Raw typed value of a variable.
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&PathValue> {
        self.variables
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Read a variable as `T`.
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownVariable`] if the route has no such variable,
    /// [`RouterError::TypeConversion`] if it was declared with another type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use urlmap::{pattern::VarType, router::RouteTable};
    ///
    /// let mut table: RouteTable<()> = RouteTable::default();
    /// table.register_named("show", "/products/{id}", &[VarType::Integer]).unwrap();
    ///
    /// let m = table.match_path("/products/13").unwrap();
    /// assert_eq!(m.variable::<i32>("id").unwrap(), 13);
    /// ```
    pub fn variable<T: FromPathValue>(&self, name: &str) -> Result<T> {
        let value = self.value(name).ok_or_else(|| RouterError::UnknownVariable {
            route: self.name.to_string(),
            variable: name.to_string(),
        })?;
        T::from_path_value(value).ok_or_else(|| RouterError::TypeConversion {
            variable: name.to_string(),
            value: value.to_string(),
            expected: T::EXPECTED,
        })
    }

    /// String variables without a copy.
    #[must_use]
    pub fn variable_str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(PathValue::as_str)
    }

    /// Variables in placeholder order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &PathValue)> {
        self.variables.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Convert variables to a HashMap
    /// Note: This allocates - use value()/variable() in hot paths instead
    #[must_use]
    pub fn variables_map(&self) -> HashMap<String, PathValue> {
        self.variables
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Run the bound handler, if any.
    pub(crate) fn invoke(&self, args: &mut C) -> Result<()> {
        if let Some(handler) = &self.handler {
            handler
                .handle(self, args)
                .map_err(|source| RouterError::Handler {
                    route: self.name.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl<C> Clone for MatchResult<C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            pattern: self.pattern.as_ref().map(Arc::clone),
            variables: self.variables.clone(),
            handler: self.handler.as_ref().map(Arc::clone),
        }
    }
}

impl<C> fmt::Debug for MatchResult<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("variables", &self.variables)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl<C> fmt::Display for MatchResult<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.variables.is_empty() {
            f.write_str(" {")?;
            for (i, (k, v)) in self.variables.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}
