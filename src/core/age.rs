//! Date decoding and age derivation
//!
//! Roster exports store birth dates as spreadsheet serial day counts.
//! Ages are computed against an explicit evaluation date, never the system
//! clock, so the engine gives the same answer for the same run date.

use crate::types::DuesError;
use chrono::{Datelike, Days, NaiveDate};

/// Age below which a member counts as a child
pub const ADULT_AGE: i32 = 18;

/// Epoch of spreadsheet serial dates: serial `0` is 1899-12-30
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid date")
}

/// Decode a spreadsheet serial day count (days since 1899-12-30)
///
/// # Errors
///
/// Returns a ParseError if the value is not a non-negative integer or
/// falls outside the representable date range.
pub fn date_from_serial(serial: &str) -> Result<NaiveDate, DuesError> {
    let days: u64 = serial
        .trim()
        .parse()
        .map_err(|_| DuesError::invalid_field("Geburtsdatum", serial, "serial day count"))?;

    serial_epoch()
        .checked_add_days(Days::new(days))
        .ok_or_else(|| DuesError::invalid_field("Geburtsdatum", serial, "serial day count"))
}

/// Whole years elapsed between `birth_date` and `today`
///
/// Uses calendar comparison: the age increases once `today`'s month and day
/// reach those of the birth date. Birth dates after `today` yield a negative age.
pub fn age(today: NaiveDate, birth_date: NaiveDate) -> i32 {
    let had_birthday = (today.month(), today.day()) >= (birth_date.month(), birth_date.day());
    today.year() - birth_date.year() - if had_birthday { 0 } else { 1 }
}

/// Whether someone born on `birth_date` is a minor on `today`
pub fn is_child(today: NaiveDate, birth_date: NaiveDate) -> bool {
    age(today, birth_date) < ADULT_AGE
}
