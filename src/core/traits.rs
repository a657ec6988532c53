//! Core traits for fee computation
//!
//! The aggregator evaluates members through this trait, so the rule table can
//! be swapped (e.g. for a different season's rates) without touching the
//! grouping and summation logic.

use crate::core::rules::DepartmentFee;
use crate::types::{Cents, Member};
use chrono::NaiveDate;

/// Per-member fee rules
///
/// Implementations must be pure: the result depends only on the member and
/// the evaluation date. Family-scoped rules are expressed through
/// [`Member::is_payer`] rather than by inspecting the rest of the family.
pub trait FeeSchedule {
    /// Club base fee owed by `member` on `today`
    fn base_fee(&self, member: &Member, today: NaiveDate) -> Cents;

    /// Department fee owed by `member` on `today`
    fn department_fee(&self, member: &Member, today: NaiveDate) -> DepartmentFee;
}
