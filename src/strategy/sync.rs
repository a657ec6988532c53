//! Synchronous processing strategy
//!
//! Loads the roster through `SyncReader` (iterator interface) and leaves
//! aggregation and report output to the shared pipeline in
//! [`ProcessingStrategy`].

use crate::core::Roster;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, RunConfig};
use crate::types::DuesError;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use club_dues_engine::strategy::{ProcessingStrategy, RunConfig, SyncProcessingStrategy};
/// use chrono::NaiveDate;
/// use std::path::Path;
///
/// let config = RunConfig::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// let strategy = SyncProcessingStrategy::new(config);
///
/// strategy
///     .process_to_file(Path::new("roster.csv"), Path::new("dues.csv"))
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    config: RunConfig,
}

impl SyncProcessingStrategy {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn config(&self) -> &RunConfig {
        &self.config
    }

    fn load(&self, input_path: &Path) -> Result<Roster, DuesError> {
        Roster::load(SyncReader::new(input_path)?)
    }
}
