use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, RouterError};

/// Declared type of a path variable.
///
/// Each variant carries the regex fragment a placeholder of this type compiles
/// to and the parse rule applied to the captured text. Untyped placeholders
/// default to [`VarType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarType {
    /// One or more characters other than `/`
    #[default]
    String,
    /// 32-bit signed integer written as base-10 digits
    Integer,
    /// 64-bit signed integer written as base-10 digits
    Long,
    /// Digits with an optional fractional part (`35`, `35.5`)
    Decimal,
    /// `true` or `false` in any casing
    Boolean,
}

impl VarType {
    /// All supported types, in declaration order.
    pub const ALL: [VarType; 5] = [
        VarType::String,
        VarType::Integer,
        VarType::Long,
        VarType::Decimal,
        VarType::Boolean,
    ];

    /// Regex fragment matched by a placeholder of this type.
    ///
    /// Fragments never contain capturing groups; the compiler wraps each one
    /// in exactly one group so capture indices line up with variable indices.
    #[must_use]
    pub const fn regex_fragment(self) -> &'static str {
        match self {
            VarType::String => "[^/]+",
            VarType::Integer | VarType::Long => "[0-9]+",
            VarType::Decimal => r"[0-9]+(?:\.[0-9]+)?",
            VarType::Boolean => "(?i:true|false)",
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Integer => "int",
            VarType::Long => "long",
            VarType::Decimal => "decimal",
            VarType::Boolean => "boolean",
        }
    }

    /// Convert captured text into a typed value.
    ///
    /// The matcher already restricts the character class, so failures here
    /// are limited to numeric overflow and non-finite decimals.
    pub fn parse_value(self, variable: &str, raw: &str) -> Result<PathValue> {
        let fail = || RouterError::TypeConversion {
            variable: variable.to_string(),
            value: raw.to_string(),
            expected: self.name(),
        };

        let value = match self {
            VarType::String => PathValue::Str(raw.to_string()),
            VarType::Integer => PathValue::Int(raw.parse().map_err(|_| fail())?),
            VarType::Long => PathValue::Long(raw.parse().map_err(|_| fail())?),
            VarType::Decimal => {
                let v: f64 = raw.parse().map_err(|_| fail())?;
                if !v.is_finite() {
                    return Err(fail());
                }
                PathValue::Decimal(v)
            }
            VarType::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    PathValue::Bool(true)
                } else if raw.eq_ignore_ascii_case("false") {
                    PathValue::Bool(false)
                } else {
                    return Err(fail());
                }
            }
        };
        Ok(value)
    }

    /// Parse a list of type names, failing on the first unsupported one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<VarType>> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for VarType {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(VarType::String),
            "int" | "integer" | "i32" => Ok(VarType::Integer),
            "long" | "i64" => Ok(VarType::Long),
            "decimal" | "double" | "float" | "f64" => Ok(VarType::Decimal),
            "bool" | "boolean" => Ok(VarType::Boolean),
            _ => Err(RouterError::UnsupportedType {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted path variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathValue {
    Str(String),
    Int(i32),
    Long(i64),
    Decimal(f64),
    Bool(bool),
}

impl PathValue {
    /// The declared type this value was produced from.
    #[must_use]
    pub fn var_type(&self) -> VarType {
        match self {
            PathValue::Str(_) => VarType::String,
            PathValue::Int(_) => VarType::Integer,
            PathValue::Long(_) => VarType::Long,
            PathValue::Decimal(_) => VarType::Decimal,
            PathValue::Bool(_) => VarType::Boolean,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PathValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathValue::Str(s) => f.write_str(s),
            PathValue::Int(v) => write!(f, "{v}"),
            PathValue::Long(v) => write!(f, "{v}"),
            PathValue::Decimal(v) => write!(f, "{v}"),
            PathValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Types a [`PathValue`] can be read back as.
///
/// Integers widen (`int` reads as `i64`); nothing narrows and nothing crosses
/// between numbers, strings and booleans.
pub trait FromPathValue: Sized {
    /// Name used in conversion errors.
    const EXPECTED: &'static str;

    fn from_path_value(value: &PathValue) -> Option<Self>;
}

impl FromPathValue for String {
    const EXPECTED: &'static str = "string";

    fn from_path_value(value: &PathValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromPathValue for i32 {
    const EXPECTED: &'static str = "int";

    fn from_path_value(value: &PathValue) -> Option<Self> {
        match value {
            PathValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromPathValue for i64 {
    const EXPECTED: &'static str = "long";

    fn from_path_value(value: &PathValue) -> Option<Self> {
        match value {
            PathValue::Int(v) => Some(i64::from(*v)),
            PathValue::Long(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromPathValue for f64 {
    const EXPECTED: &'static str = "decimal";

    fn from_path_value(value: &PathValue) -> Option<Self> {
        match value {
            PathValue::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromPathValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_path_value(value: &PathValue) -> Option<Self> {
        match value {
            PathValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromPathValue for PathValue {
    const EXPECTED: &'static str = "any";

    fn from_path_value(value: &PathValue) -> Option<Self> {
        Some(value.clone())
    }
}
