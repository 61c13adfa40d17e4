//! # urlmap
//!
//! **urlmap** maps an HTTP method and a URL path to a named route, extracting
//! typed path variables from `{placeholder}` segments.
//!
//! ## Overview
//!
//! Routes are registered at startup with a name and/or a handler, a pattern
//! such as `/products/{id}/images/{imgId}` and the declared type of each
//! placeholder. Each request is then resolved against the table of its HTTP
//! method: the first route (in registration order) whose pattern matches wins,
//! and its variables are converted to the declared types.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Compiles patterns into anchored regexes with typed capture groups
//! - **[`route`]** - A compiled route, handler binding and the per-request [`MatchResult`]
//! - **[`router`]** - Ordered [`RouteTable`]s, one per [`HttpMethod`], and a swappable [`router::SharedRouter`]
//! - **[`manifest`]** - Route definitions loaded from YAML or JSON files
//! - **[`service`]** - Adapter from `http::Request` to dispatch with 404 translation
//! - **[`error`]** - The [`RouterError`] taxonomy
//! - **[`logging`]** / **[`runtime_config`]** - Environment driven setup
//! - **[`cli`]** - The `urlmap` binary's commands
//!
//! ## Quick Start
//!
//! ```rust
//! use urlmap::{Router, VarType};
//!
//! let mut router: Router<Vec<String>> = Router::default();
//! router
//!     .get("image", "/products/{id}/images/{imgId}", |m, out: &mut Vec<String>| {
//!         let id: i32 = m.variable("id")?;
//!         let img: i64 = m.variable("imgId")?;
//!         out.push(format!("image {img} of product {id}"));
//!         Ok(())
//!     }, &[VarType::Integer, VarType::Long])?
//!     .post("discount", "/products/{id}/discounts/{amount}", |m, out: &mut Vec<String>| {
//!         out.push(format!("discount {}", m.variable::<f64>("amount")?));
//!         Ok(())
//!     }, &[VarType::Long, VarType::Decimal])?;
//!
//! let mut out = Vec::new();
//! router.dispatch("GET", "/products/13/images/35", &mut out)?;
//! router.dispatch("POST", "/products/13/discounts/35.5", &mut out)?;
//! assert_eq!(out, ["image 35 of product 13", "discount 35.5"]);
//!
//! assert!(router.match_path("GET", "/unknown")?.is_not_found());
//! # Ok::<(), urlmap::RouterError>(())
//! ```
//!
//! ## Thread safety
//!
//! A [`Router`] is built with `&mut self` and read with `&self`. Once built it
//! can be shared between request workers (`Arc<Router<C>>`); matching never
//! mutates shared state. To replace routes while serving, publish a new router
//! through [`router::SharedRouter`].

pub mod cli;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod pattern;
pub mod route;
pub mod router;
pub mod runtime_config;
pub mod service;

pub use error::RouterError;
pub use pattern::{PathValue, VarType};
pub use route::{MatchResult, NOT_FOUND};
pub use router::{HttpMethod, RouteTable, Router};
