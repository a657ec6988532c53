//! Core business logic module
//!
//! This module contains the dues computation components:
//! - `age` - Serial date decoding and age derivation
//! - `roster` - Member indexes and billing family grouping
//! - `traits` - Trait abstraction over the fee rule table
//! - `rules` - The club's fee rules per line item
//! - `aggregator` - Per-family summation and report rows

pub mod age;
pub mod aggregator;
pub mod roster;
pub mod rules;
pub mod traits;

pub use aggregator::{Billing, FamilyAggregator, MemberFees, Notice, ReportRow};
pub use roster::{Family, Roster};
pub use rules::{ClubFeeSchedule, DepartmentFee};
pub use traits::FeeSchedule;
