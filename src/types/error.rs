//! Error types for the club dues engine
//!
//! This module defines all error types that can occur while loading a roster,
//! computing dues and writing the report. Errors are designed to be
//! descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parse Errors**: Missing columns, malformed numbers or dates, unknown labels
//! - **Integrity Errors**: A billing family without its own payer
//! - **Rule Errors**: The fee engine was called outside its contract
//! - **Report Errors**: The output could not be serialized
//!
//! Every variant is fatal for the run. The unimplemented-department
//! condition is not an error: it is logged as a warning and billed as zero.

use super::member::MemberId;
use thiserror::Error;

/// Main error type for the dues engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DuesError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A roster row could not be loaded
    ///
    /// Raised for missing columns, values that cannot be coerced to their
    /// expected type, and category or department labels outside the known set.
    #[error("Roster parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A billing family has no member that is its own payer
    #[error("No designated payer in family {payer}: [{}]", members.join(", "))]
    IntegrityError {
        /// Payer id shared by the family's members
        payer: MemberId,
        /// The family's member rows, for diagnosis
        members: Vec<String>,
    },

    /// The fee engine was asked to evaluate a member outside its contract
    #[error("Rule error for member {member}: {message}")]
    RuleError {
        /// Member being evaluated
        member: MemberId,
        /// Description of the violated contract
        message: String,
    },

    /// The report could not be written
    #[error("Report error: {message}")]
    ReportError {
        /// Description of the serialization failure
        message: String,
    },
}

// Conversion from io::Error to DuesError
impl From<std::io::Error> for DuesError {
    fn from(error: std::io::Error) -> Self {
        DuesError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to DuesError
impl From<csv::Error> for DuesError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        DuesError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Line numbers are attached by AsyncReader
impl From<csv_async::Error> for DuesError {
    fn from(error: csv_async::Error) -> Self {
        DuesError::parse(error.to_string())
    }
}

// Helper functions for creating common errors

impl DuesError {
    /// Create a ParseError without line information
    pub fn parse(message: impl Into<String>) -> Self {
        DuesError::ParseError {
            line: None,
            message: message.into(),
        }
    }

    /// Create a ParseError for a label outside the known set
    pub fn unknown_label(kind: &str, value: &str) -> Self {
        DuesError::parse(format!("unknown {} '{}'", kind, value))
    }

    /// Create a ParseError for a field that could not be coerced
    pub fn invalid_field(column: &str, value: &str, expected: &str) -> Self {
        DuesError::parse(format!(
            "invalid value '{}' in column '{}' (expected {})",
            value, column, expected
        ))
    }

    /// Create a ParseError for a missing required column
    pub fn missing_column(column: &str) -> Self {
        DuesError::parse(format!("missing required column '{}'", column))
    }

    /// Create an IntegrityError
    pub fn missing_payer(payer: MemberId, members: Vec<String>) -> Self {
        DuesError::IntegrityError { payer, members }
    }

    /// Create a RuleError
    pub fn rule(member: MemberId, message: impl Into<String>) -> Self {
        DuesError::RuleError {
            member,
            message: message.into(),
        }
    }

    /// Attach a line number to a ParseError that does not carry one yet
    ///
    /// Other variants are returned unchanged.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            DuesError::ParseError { line: None, message } => DuesError::ParseError {
                line: Some(line),
                message,
            },
            other => other,
        }
    }
}
