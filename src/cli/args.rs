use crate::strategy::RunConfig;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compute club membership dues per billing family
#[derive(Parser, Debug)]
#[command(name = "club-dues")]
#[command(
    about = "Compute club membership dues per billing family from a roster export",
    long_about = None
)]
pub struct CliArgs {
    /// Roster export (semicolon separated, with header row)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "INPUT",
        help = "Path to the roster CSV file"
    )]
    pub input_file: PathBuf,

    /// Dues report to write
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT",
        help = "Path of the report CSV file to write"
    )]
    pub output_file: PathBuf,

    /// Add one breakdown row per member of every multi-member family
    #[arg(short = 'v', long = "verbose", visible_alias = "debug")]
    pub verbose: bool,

    /// Date ages are computed on
    #[arg(
        long = "date",
        value_name = "YYYY-MM-DD",
        help = "Evaluation date for ages (default: today)"
    )]
    pub evaluation_date: Option<NaiveDate>,

    /// What to do with a family that has no designated payer
    #[arg(
        long = "on-missing-payer",
        value_name = "POLICY",
        default_value = "abort",
        help = "'abort' stops the run, 'skip' logs a warning and omits the family"
    )]
    pub missing_payer: MissingPayerPolicy,

    /// Loading strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Loading strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,
}

/// Available loading strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Handling of billing families without a member that is its own payer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MissingPayerPolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Log a warning and leave the family out of the report
    Skip,
}

impl CliArgs {
    /// Create a RunConfig from CLI arguments
    ///
    /// Without `--date`, the local current date is used.
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            evaluation_date: self
                .evaluation_date
                .unwrap_or_else(|| Local::now().date_naive()),
            verbose: self.verbose,
            missing_payer: self.missing_payer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "-i", "in.csv", "-o", "out.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "-i", "in.csv", "-o", "out.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "-i", "in.csv", "-o", "out.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::short(&["program", "-i", "in.csv", "-o", "out.csv"])]
    #[case::long(&["program", "--input", "in.csv", "--output", "out.csv"])]
    fn test_paths(#[case] args: &[&str]) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.input_file, PathBuf::from("in.csv"));
        assert_eq!(parsed.output_file, PathBuf::from("out.csv"));
        assert!(!parsed.verbose);
        assert_eq!(parsed.missing_payer, MissingPayerPolicy::Abort);
    }

    #[rstest]
    #[case::short(&["program", "-v", "-i", "in.csv", "-o", "out.csv"])]
    #[case::long(&["program", "--verbose", "-i", "in.csv", "-o", "out.csv"])]
    #[case::debug_alias(&["program", "--debug", "-i", "in.csv", "-o", "out.csv"])]
    fn test_verbose_flag(#[case] args: &[&str]) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert!(parsed.verbose);
        assert!(parsed.to_run_config().verbose);
    }

    #[test]
    fn test_run_config_with_explicit_date_and_policy() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "-i",
            "in.csv",
            "-o",
            "out.csv",
            "--date",
            "2024-06-15",
            "--on-missing-payer",
            "skip",
        ])
        .unwrap();

        let config = parsed.to_run_config();
        assert_eq!(
            config.evaluation_date,
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert_eq!(config.missing_payer, MissingPayerPolicy::Skip);
    }

    #[test]
    fn test_run_config_defaults_to_today() {
        let parsed = CliArgs::try_parse_from(["program", "-i", "in.csv", "-o", "out.csv"]).unwrap();
        let before = Local::now().date_naive();
        let config = parsed.to_run_config();
        let after = Local::now().date_naive();

        assert!(config.evaluation_date == before || config.evaluation_date == after);
    }

    #[rstest]
    #[case::missing_input(&["program", "-o", "out.csv"])]
    #[case::missing_output(&["program", "-i", "in.csv"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "-i", "in.csv", "-o", "out.csv"])]
    #[case::invalid_date(&["program", "--date", "15.06.2024", "-i", "in.csv", "-o", "out.csv"])]
    #[case::invalid_policy(&["program", "--on-missing-payer", "ignore", "-i", "in.csv", "-o", "out.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
