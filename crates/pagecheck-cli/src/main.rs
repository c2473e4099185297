//! pagecheck - smoke-test a static web page in headless Chrome.
//!
//! Parses arguments, sets up logging and runs the check. A failed run
//! becomes a miette report on stderr and exit status 1.

use clap::Parser;
use miette::Result;
use pagecheck_cli::{cli, commands, error, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::check_execute(args)
        .await
        .map_err(error::cli_error_to_miette)
}
