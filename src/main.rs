//! Club Dues CLI
//!
//! Command-line interface for computing membership dues from a roster export.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- -i roster.csv -o dues.csv
//! cargo run -- -i roster.csv -o dues.csv --verbose --date 2024-01-01
//! cargo run -- -i roster.csv -o dues.csv --on-missing-payer skip --strategy async
//! ```
//!
//! Diagnostics are logged to stderr; set `RUST_LOG=debug` for per-member fees.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, roster parse error, family without payer, etc.)

use club_dues_engine::cli;
use club_dues_engine::strategy;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();

    let strategy = strategy::create_strategy(args.strategy.clone(), args.to_run_config());

    if let Err(e) = strategy.process_to_file(&args.input_file, &args.output_file) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
