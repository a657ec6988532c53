//! Synchronous roster reader with iterator interface
//!
//! Provides a streaming iterator over member records from a semicolon
//! delimited roster export. Delegates CSV format concerns to the csv_format
//! module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Member, DuesError>`
//! for each roster row:
//!
//! ```no_run
//! use club_dues_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("roster.csv")).unwrap();
//! let members: Result<Vec<_>, _> = reader.collect();
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors, missing columns) are returned from `new()`
//! - Row errors are yielded as Err variants carrying the line number
//! - Callers stop at the first row error; a roster is never loaded partially

use crate::io::csv_format::{
    bom_len, convert_csv_record, validate_headers, CsvMemberRecord, DELIMITER,
};
use crate::types::{DuesError, Member};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Synchronous roster reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<BufReader<File>>,
    line_num: u64,
}

impl SyncReader {
    /// Open a roster export and validate its header row
    ///
    /// The CSV reader is configured to:
    /// - Split fields on `;`
    /// - Trim whitespace from all fields
    /// - Skip a leading UTF-8 byte order mark
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the file does not exist
    /// * `IoError` if it cannot be read
    /// * `ParseError` if a required column is missing from the header
    pub fn new(path: &Path) -> Result<Self, DuesError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DuesError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => DuesError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut buffered = BufReader::with_capacity(8 * 1024, file);
        let skip = bom_len(buffered.fill_buf()?);
        buffered.consume(skip);

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .trim(Trim::All)
            .from_reader(buffered);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        validate_headers(headers.iter().map(String::as_str))?;

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Member, DuesError>;

    /// Get the next member from the roster
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Member))` - Successfully parsed row
    /// * `Some(Err(DuesError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvMemberRecord>();
        let result = deserializer.next()?;
        self.line_num += 1;

        Some(
            result
                .map_err(DuesError::from)
                .and_then(convert_csv_record)
                .map_err(|e| e.at_line(self.line_num)),
        )
    }
}
