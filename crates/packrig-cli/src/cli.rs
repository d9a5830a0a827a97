//! Command-line interface definition.
//!
//! - `packrig print` - write the finalized configuration as JSON to stdout
//! - `packrig inspect` - summarize entries, rules and plugins

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// packrig - assemble bundler configuration from project settings
#[derive(Parser, Debug)]
#[command(
    name = "packrig",
    version,
    about = "Assemble bundler configuration from project settings",
    long_about = "packrig discovers entry points, transform rules and plugins for a project,\n\
                  applies an environment profile (production, development, test) and emits\n\
                  the finalized bundler configuration as JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the finalized configuration as JSON
    Print(PrintArgs),

    /// Summarize entries, rules and plugins for a profile
    Inspect(InspectArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Profile to apply (production, development, test)
    #[arg(short, long = "env", env = "NODE_ENV", default_value = "development")]
    pub env: String,

    /// Project root containing config/packrig.yml
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct PrintArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Emit a single line instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
