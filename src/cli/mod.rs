//! # CLI Module
//!
//! Command-line tooling around route manifests (see [`crate::manifest`]).
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List every route in match order, grouped by method:
//!
//! ```bash
//! urlmap routes --manifest routes.yaml
//! ```
//!
//! ### `match`
//!
//! Resolve a single request and print the result as JSON:
//!
//! ```bash
//! urlmap match --manifest routes.yaml -X POST /products/13/discounts/35.5
//! ```
//!
//! ### `check`
//!
//! Run the manifest's `cases`, exiting non-zero if any of them fails:
//!
//! ```bash
//! urlmap check --manifest routes.yaml
//! ```
//!
//! `URLMAP_TRAILING_SLASH_MATCH` applies unless the manifest sets
//! `use_trailing_slash_match` itself.

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
