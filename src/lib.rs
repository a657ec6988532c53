//! Club Dues Engine Library
//! # Overview
//!
//! This library computes membership dues for a sports club from a roster
//! export. Members are grouped into billing families (all members sharing
//! one responsible payer), each member is priced by the club's rule table,
//! and one report row per family is produced, billed to the payer.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Member, Cents, DuesError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::age`] - Serial dates and age derivation
//!   - [`core::roster`] - Member indexes and billing families
//!   - [`core::rules`] - Club base fee and department fee rules
//!   - [`core::aggregator`] - Per-family totals and report rows
//! - [`io`] - Roster reading and report writing
//! - [`strategy`] - Complete load/compute/write pipelines
//!
//! # Fee Line Items
//!
//! - **Club base fee**: depends on status, category and age; the family rate
//!   is billed once per family
//! - **Department fee**: depends on the member's department, evaluated with
//!   that department's own rule set
//!
//! All ages are computed against an explicit evaluation date.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    Billing, ClubFeeSchedule, FamilyAggregator, FeeSchedule, Notice, ReportRow, Roster,
};
pub use crate::io::write_report_csv;
pub use crate::types::{Category, Cents, Department, DuesError, Member, MemberId, MembershipStatus};
