use clap::Parser;
use urlmap::cli::{run_cli, Cli};
use urlmap::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    run_cli(&cli)
}
