//! Planner CLI
//!
//! Exit codes:
//! - 0: Success
//! - 1: Validation or other error
//! - 2: Not found

use clap::Parser;
use planner_cli::logging::configure_logging;
use planner_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = planner_cli::run::run(cli).await;
    std::process::exit(exit_code);
}
