//! I/O module
//!
//! Handles roster parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, report serialization)
//! - `sync_reader` - Synchronous roster reader with iterator interface
//! - `async_reader` - Asynchronous roster reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, member_to_csv, write_report_csv, CsvMemberRecord};
pub use sync_reader::SyncReader;
