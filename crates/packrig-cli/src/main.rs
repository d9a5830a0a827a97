//! packrig CLI entry point.
//!
//! Parses arguments, installs logging, and dispatches to the selected command.

use clap::Parser;
use miette::Result;
use packrig_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let no_color = args.no_color || !logger::should_use_colors();
    logger::init_logger(args.verbose, args.quiet, no_color);

    let result = match args.command {
        cli::Command::Print(print_args) => commands::print(print_args),
        cli::Command::Inspect(inspect_args) => commands::inspect(inspect_args, no_color),
    };

    result.map_err(error::cli_error_to_miette)
}
