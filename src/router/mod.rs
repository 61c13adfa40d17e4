//! # Router Module
//!
//! The router maps an HTTP method and path to a registered route, extracting
//! typed path variables on the way.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Keeping one ordered [`RouteTable`] per supported HTTP method
//! - Resolving method tokens case-insensitively ([`HttpMethod`])
//! - Reconciling trailing slashes between request paths and patterns
//! - Returning a fresh [`MatchResult`](crate::route::MatchResult) per request,
//!   or the not-found result
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: at startup, patterns (e.g. `/pets/{id}`) are compiled
//!    into anchored regexes with typed capture groups and appended to the
//!    table of their method.
//!
//! 2. **Matching**: for each request, the table of the request's method is
//!    scanned in registration order and the first full match wins.
//!
//! ## Example
//!
//! ```rust
//! use urlmap::{pattern::VarType, router::{HttpMethod, Router}};
//!
//! let mut router: Router<()> = Router::default();
//! router.register_named(
//!     HttpMethod::Get,
//!     "image",
//!     "/products/{id}/images/{imgId}",
//!     &[VarType::Integer, VarType::Long],
//! )?;
//!
//! let m = router.match_path("GET", "/products/13/images/35")?;
//! assert!(m.is("image"));
//! assert_eq!(m.variable::<i32>("id")?, 13);
//! assert_eq!(m.variable::<i64>("imgId")?, 35);
//! # Ok::<(), urlmap::RouterError>(())
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan: O(n) in the number of routes registered for the
//! method. Patterns are compiled once at registration; matching never
//! recompiles anything.

mod core;
mod shared;
mod table;

pub use self::core::{HttpMethod, Router};
pub use shared::SharedRouter;
pub use table::RouteTable;
