//! CSV format handling for roster rows and the dues report
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvMemberRecord structure for deserialization
//! - Header validation and conversion from CSV rows to Members
//! - Report serialization
//! - The compact `id;first;last;birth;payer` member form used in diagnostics
//!
//! All functions are pure (no file handling) for easy testing.

use crate::core::age::date_from_serial;
use crate::core::ReportRow;
use crate::types::{Category, Department, DuesError, Member, MemberId, MembershipStatus};
use serde::Deserialize;
use std::io::Write;

/// Field separator of roster exports and reports
pub const DELIMITER: u8 = b';';

pub const COLUMN_ID: &str = "Mitgliedsnummer";
pub const COLUMN_FIRST_NAME: &str = "Vorname";
pub const COLUMN_LAST_NAME: &str = "Nachname";
pub const COLUMN_BIRTH_DATE: &str = "Geburtsdatum";
pub const COLUMN_STATUS: &str = "Status";
pub const COLUMN_PAYER: &str = "Hauptzahler Mitgliedsnummer";
pub const COLUMN_CATEGORY: &str = "Beitragskategorie";
pub const COLUMN_DEPARTMENT: &str = "Abteilung";

/// Columns every roster export must carry; any others are ignored
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COLUMN_ID,
    COLUMN_FIRST_NAME,
    COLUMN_LAST_NAME,
    COLUMN_BIRTH_DATE,
    COLUMN_STATUS,
    COLUMN_PAYER,
    COLUMN_CATEGORY,
    COLUMN_DEPARTMENT,
];

pub const REPORT_HEADER: [&str; 11] = [
    "Payer",
    "FirstName",
    "LastName",
    "MemberId",
    "Department",
    "Status",
    "Age",
    "Category",
    "ClubFee",
    "DepartmentFee",
    "Total",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV record structure for deserialization
///
/// Fields stay textual here so conversion errors can name the column and
/// the offending value.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvMemberRecord {
    #[serde(rename = "Mitgliedsnummer")]
    pub id: String,
    #[serde(rename = "Vorname")]
    pub first_name: String,
    #[serde(rename = "Nachname")]
    pub last_name: String,
    #[serde(rename = "Geburtsdatum")]
    pub birth_date: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Hauptzahler Mitgliedsnummer")]
    pub payer: String,
    #[serde(rename = "Beitragskategorie")]
    pub category: String,
    #[serde(rename = "Abteilung")]
    pub department: String,
}

/// Number of leading bytes to skip for a UTF-8 byte order mark
pub fn bom_len(prefix: &[u8]) -> usize {
    if prefix.starts_with(UTF8_BOM) {
        UTF8_BOM.len()
    } else {
        0
    }
}

/// Check that a header row carries every required column
pub fn validate_headers<'a, I>(headers: I) -> Result<(), DuesError>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    for column in REQUIRED_COLUMNS {
        if !headers.clone().into_iter().any(|header| header == column) {
            return Err(DuesError::missing_column(column));
        }
    }
    Ok(())
}

fn parse_member_id(column: &str, value: &str) -> Result<MemberId, DuesError> {
    match value.parse::<MemberId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DuesError::invalid_field(column, value, "positive integer")),
    }
}

/// Convert a CsvMemberRecord to a Member
///
/// # Errors
///
/// Returns a ParseError naming the column and value if:
/// - the member id or payer id is not a positive integer
/// - the birth date is not a serial day count
/// - the category or department label is not recognized
pub fn convert_csv_record(record: CsvMemberRecord) -> Result<Member, DuesError> {
    let id = parse_member_id(COLUMN_ID, &record.id)?;
    let payer = parse_member_id(COLUMN_PAYER, &record.payer)?;
    let birth_date = date_from_serial(&record.birth_date)?;
    let category: Category = record.category.parse()?;
    let department: Department = record.department.parse()?;

    Ok(Member {
        id,
        first_name: record.first_name,
        last_name: record.last_name,
        birth_date,
        status: MembershipStatus::from_label(&record.status),
        payer,
        category,
        department,
    })
}

/// Render a member as `id;first;last;YYYY-MM-DD;payer`
pub fn member_to_csv(member: &Member) -> String {
    format!(
        "{};{};{};{};{}",
        member.id,
        member.first_name,
        member.last_name,
        member.birth_date.format("%Y-%m-%d"),
        member.payer
    )
}

/// Write report rows in CSV format
///
/// Writes the header followed by one record per row, in the given order.
/// Breakdown rows carry an empty payer field.
pub fn write_report_csv(rows: &[ReportRow], output: &mut dyn Write) -> Result<(), DuesError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(output);

    writer
        .write_record(REPORT_HEADER)
        .map_err(|e| report_error("Failed to write report header", e))?;

    for row in rows {
        writer
            .write_record(&[
                row.payer.map(|payer| payer.to_string()).unwrap_or_default(),
                row.first_name.clone(),
                row.last_name.clone(),
                row.member_id.to_string(),
                row.department.to_string(),
                row.status.to_string(),
                row.age.to_string(),
                row.category.to_string(),
                row.fees.base.to_string(),
                row.fees.department.to_string(),
                row.fees.total().to_string(),
            ])
            .map_err(|e| report_error("Failed to write report row", e))?;
    }

    writer
        .flush()
        .map_err(|e| report_error("Failed to flush report", e))?;

    Ok(())
}

fn report_error(context: &str, error: impl std::fmt::Display) -> DuesError {
    DuesError::ReportError {
        message: format!("{}: {}", context, error),
    }
}
