// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, MissingPayerPolicy, StrategyType};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// `--help`), clap displays an error message or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
