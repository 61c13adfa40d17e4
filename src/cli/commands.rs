use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::manifest::{load_manifest, RouteManifest};
use crate::router::{HttpMethod, Router};
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for urlmap
///
/// Inspects route manifests and resolves requests against them.
#[derive(Parser, Debug)]
#[command(name = "urlmap")]
#[command(about = "URL pattern routing: inspect and test route manifests", long_about = None)]
pub struct Cli {
    /// Log level for routing diagnostics (trace shows every match attempt)
    #[arg(long, global = true, env = "URLMAP_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the routes of a manifest in match order
    Routes {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Resolve one request and print the result as JSON
    Match {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// HTTP method of the request
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /products/13
        path: String,
    },
    /// Run the cases of a manifest and report mismatches
    Check {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

/// Run a parsed command line, printing to stdout.
pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}

/// Run a command, writing its report to `out`.
///
/// # Errors
///
/// Unreadable or invalid manifests, routes that fail to register and, for
/// `check`, any failing case.
pub fn execute(command: &Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Routes { manifest } => {
            let (_, router) = load_router(manifest)?;
            for method in HttpMethod::ALL {
                for route in router.table(method).routes() {
                    writeln!(
                        out,
                        "{:<8}{:<40}{}",
                        method.as_str(),
                        route.pattern().pattern(),
                        route.name()
                    )?;
                }
            }
            Ok(())
        }
        Commands::Match {
            manifest,
            method,
            path,
        } => {
            let (_, router) = load_router(manifest)?;
            let matched = router.match_path(method, path.as_str())?;
            let report = json!({
                "name": matched.name(),
                "pattern": matched.pattern(),
                "variables": matched.variables_map(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            Ok(())
        }
        Commands::Check { manifest } => {
            let (parsed, router) = load_router(manifest)?;
            let failures = parsed.check(&router);
            for failure in &failures {
                writeln!(out, "❌ {failure}")?;
            }
            let passed = parsed.cases.len() - failures.len();
            writeln!(out, "{passed}/{} cases passed", parsed.cases.len())?;
            if !failures.is_empty() {
                bail!("{} of {} cases failed", failures.len(), parsed.cases.len());
            }
            Ok(())
        }
    }
}

fn load_router(path: &Path) -> anyhow::Result<(RouteManifest, Router<()>)> {
    let manifest = load_manifest(path)?;
    let config = RuntimeConfig::from_env();
    let router = manifest
        .build_router(config.use_trailing_slash_match)
        .with_context(|| format!("Invalid route in {}", path.display()))?;
    Ok((manifest, router))
}
