//! # Pattern Module
//!
//! Compiles user-authored URL patterns such as `/products/{id}/images/{imgId}`
//! into anchored regex matchers with ordered, typed variable metadata.
//!
//! ## Placeholders
//!
//! A placeholder is `{` + identifier + `}`. Identifiers use letters, digits,
//! `_` and `$` and do not start with a digit. Every other character of the
//! pattern is literal, so `/files/report.pdf` only matches that exact path.
//!
//! ## Types
//!
//! Types are positional: the i-th declared [`VarType`] applies to the i-th
//! placeholder, counted left to right. Placeholders without a declared type
//! are [`VarType::String`].
//!
//! | Type | Matches | Value |
//! |---|---|---|
//! | `string` | one or more non-`/` characters | [`PathValue::Str`] |
//! | `int` | digits | [`PathValue::Int`] (`i32`, overflow is an error) |
//! | `long` | digits | [`PathValue::Long`] (`i64`, overflow is an error) |
//! | `decimal` | digits, optional `.digits` | [`PathValue::Decimal`] |
//! | `boolean` | `true`/`false`, any casing | [`PathValue::Bool`] |

mod compile;
mod types;


pub use compile::{compile, CompiledPattern, Variable, MAX_INLINE_VARS};
pub use types::{FromPathValue, PathValue, VarType};
