use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use super::types::VarType;
use crate::error::{Result, RouterError};

/// Maximum number of variables before heap allocation.
/// Most patterns have ≤4 placeholders (e.g. `/products/{id}/images/{imgId}`).
pub const MAX_INLINE_VARS: usize = 8;

/// `{name}` where name is letters, digits, `_` or `$`, not starting with a digit.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{([A-Za-z_$][A-Za-z0-9_$]*)\}").expect("placeholder regex should be valid")
});

/// A named, typed slot in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Shared with every match result, `Arc::clone` instead of a string copy
    pub name: Arc<str>,
    pub var_type: VarType,
}

/// A URL pattern compiled into an anchored regex plus ordered variable metadata.
///
/// Immutable after [`compile`]; cloning shares the regex program.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: Arc<str>,
    regex: Regex,
    variables: SmallVec<[Variable; MAX_INLINE_VARS]>,
    has_trailing_slash: bool,
}

/// Compile `pattern` with positional `types`.
///
/// The i-th placeholder takes `types[i]`, or [`VarType::String`] when the list
/// is shorter. Literal text is escaped, so only placeholders are dynamic.
///
/// # Errors
///
/// [`RouterError::InvalidRegistration`] when a brace is not part of a
/// well-formed placeholder, a variable name repeats, or more types are given
/// than there are placeholders.
///
/// # Example
///
/// ```rust
/// use urlmap::pattern::{compile, VarType};
///
/// let p = compile("/products/{id}", &[VarType::Integer]).unwrap();
/// assert_eq!(p.regex_source(), "^/products/([0-9]+)$");
/// assert_eq!(p.variable_names().collect::<Vec<_>>(), vec!["id"]);
/// ```
pub fn compile(pattern: &str, types: &[VarType]) -> Result<CompiledPattern> {
    let mut source = String::with_capacity(pattern.len() + 16);
    source.push('^');
    let mut variables: SmallVec<[Variable; MAX_INLINE_VARS]> = SmallVec::new();
    let mut seen = HashSet::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(pattern) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_literal(&mut source, pattern, &pattern[last..whole.start()])?;
        last = whole.end();

        let name = name.as_str();
        if !seen.insert(name) {
            return Err(RouterError::invalid(
                pattern,
                format!("variable '{name}' appears more than once"),
            ));
        }

        let var_type = types.get(variables.len()).copied().unwrap_or_default();
        source.push('(');
        source.push_str(var_type.regex_fragment());
        source.push(')');
        variables.push(Variable {
            name: Arc::from(name),
            var_type,
        });
    }
    push_literal(&mut source, pattern, &pattern[last..])?;
    source.push('$');

    if types.len() > variables.len() {
        return Err(RouterError::invalid(
            pattern,
            format!(
                "{} types declared for {} variables",
                types.len(),
                variables.len()
            ),
        ));
    }

    let regex = Regex::new(&source).map_err(|e| RouterError::invalid(pattern, e.to_string()))?;

    Ok(CompiledPattern {
        pattern: Arc::from(pattern),
        regex,
        variables,
        has_trailing_slash: pattern.ends_with('/'),
    })
}

fn push_literal(source: &mut String, pattern: &str, literal: &str) -> Result<()> {
    if literal.contains(['{', '}']) {
        return Err(RouterError::invalid(
            pattern,
            format!("malformed placeholder near '{literal}'"),
        ));
    }
    source.push_str(&regex::escape(literal));
    Ok(())
}

impl CompiledPattern {
    /// The pattern text this was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn pattern_arc(&self) -> Arc<str> {
        Arc::clone(&self.pattern)
    }

    /// Source of the generated regex. Two patterns with equal sources match
    /// exactly the same paths with the same variable types.
    #[must_use]
    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.has_trailing_slash
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_ref())
    }

    /// Full-string match; returns the captured text of each variable in order.
    #[must_use]
    pub fn captures<'p>(&self, path: &'p str) -> Option<SmallVec<[&'p str; MAX_INLINE_VARS]>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map_or("", |m| m.as_str()))
                .collect(),
        )
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str() && self.variables == other.variables
    }
}

impl Eq for CompiledPattern {}
