//! Asynchronous processing strategy
//!
//! Loads the roster with csv-async on a current-thread tokio runtime,
//! reading the file in batches. Once loaded, the roster is evaluated by the
//! same sequential pipeline as the synchronous strategy, so both produce
//! identical reports for the same input.
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── tokio::fs::File (+ tokio-util compat)
//!     ├── AsyncReader (batch CSV reading)
//!     └── Roster → FamilyAggregator (shared pipeline)
//! ```

use crate::core::Roster;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::bom_len;
use crate::strategy::{ProcessingStrategy, RunConfig};
use crate::types::DuesError;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Rows read per batch
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Asynchronous processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: RunConfig,
    batch_size: usize,
}

impl AsyncProcessingStrategy {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Use a custom batch size; zero falls back to the default
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = if batch_size == 0 {
            log::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                DEFAULT_BATCH_SIZE
            );
            DEFAULT_BATCH_SIZE
        } else {
            batch_size
        };
        self
    }

    async fn load_async(&self, input_path: &Path) -> Result<Roster, DuesError> {
        let file = tokio::fs::File::open(input_path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DuesError::FileNotFound {
                path: input_path.display().to_string(),
            },
            _ => DuesError::IoError {
                message: format!("Failed to open file '{}': {}", input_path.display(), e),
            },
        })?;

        let mut buffered = BufReader::new(file);
        let skip = bom_len(buffered.fill_buf().await?);
        buffered.consume(skip);

        // Wrap tokio reader in a compatibility layer for csv-async
        let compat = tokio_util::compat::TokioAsyncReadCompatExt::compat(buffered);
        let mut reader = AsyncReader::new(compat).await?;

        let mut roster = Roster::new();
        loop {
            let batch = reader.read_batch(self.batch_size).await?;
            if batch.is_empty() {
                break;
            }
            for member in batch {
                roster.push(member);
            }
        }

        Ok(roster)
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn config(&self) -> &RunConfig {
        &self.config
    }

    fn load(&self, input_path: &Path) -> Result<Roster, DuesError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| DuesError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(self.load_async(input_path))
    }
}
