//! Processing strategy module for dues computation
//!
//! This module defines the Strategy pattern for the complete pipeline: load
//! the roster, aggregate dues per family, write the report. Strategies differ
//! only in how the roster is loaded (synchronous or asynchronous I/O);
//! evaluation is the same single pass over the loaded roster for both.

use crate::cli::{MissingPayerPolicy, StrategyType};
use crate::core::{ClubFeeSchedule, FamilyAggregator, ReportRow, Roster};
use crate::io::csv_format::write_report_csv;
use crate::types::DuesError;
use chrono::NaiveDate;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncProcessingStrategy;
pub use sync::SyncProcessingStrategy;

/// Settings of one batch run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Date all ages are computed on
    pub evaluation_date: NaiveDate,
    /// Emit per-member breakdown rows
    pub verbose: bool,
    pub missing_payer: MissingPayerPolicy,
}

impl RunConfig {
    pub fn new(evaluation_date: NaiveDate) -> Self {
        Self {
            evaluation_date,
            verbose: false,
            missing_payer: MissingPayerPolicy::Abort,
        }
    }
}

/// Processing strategy trait for the complete dues pipeline
pub trait ProcessingStrategy: Send + Sync {
    /// Settings this strategy runs with
    fn config(&self) -> &RunConfig;

    /// Load the roster from `input_path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read, or on the first
    /// row that fails to parse.
    fn load(&self, input_path: &Path) -> Result<Roster, DuesError>;

    /// Load the roster and compute the report rows
    fn compute(&self, input_path: &Path) -> Result<Vec<ReportRow>, DuesError> {
        let roster = self.load(input_path)?;
        info!("Loaded {} members from {}", roster.len(), input_path.display());

        let config = self.config();
        FamilyAggregator::new(ClubFeeSchedule, config.evaluation_date)
            .verbose(config.verbose)
            .missing_payer(config.missing_payer)
            .aggregate(&roster)
            .map(|billing| billing.rows)
    }

    /// Compute the report and write it to `output`
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), DuesError> {
        let rows = self.compute(input_path)?;
        write_report_csv(&rows, output)
    }

    /// Compute the report and write it to a file at `output_path`
    ///
    /// The output file is only created once the report has been computed, so
    /// a failed load or integrity check leaves no file behind.
    fn process_to_file(&self, input_path: &Path, output_path: &Path) -> Result<(), DuesError> {
        let rows = self.compute(input_path)?;

        let file = File::create(output_path).map_err(|e| DuesError::IoError {
            message: format!("Failed to create file '{}': {}", output_path.display(), e),
        })?;
        let mut writer = BufWriter::new(file);
        write_report_csv(&rows, &mut writer)?;
        writer.flush()?;

        info!("Wrote {} report rows to {}", rows.len(), output_path.display());
        Ok(())
    }
}

/// Create a processing strategy based on the specified strategy type
pub fn create_strategy(
    strategy_type: StrategyType,
    config: RunConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config)),
    }
}
