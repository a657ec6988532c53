//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `member`: Member record and its enumerated attributes
//! - `fee`: Money amounts in integer cents
//! - `error`: Error types for the dues engine

pub mod error;
pub mod fee;
pub mod member;

pub use error::DuesError;
pub use fee::Cents;
pub use member::{Category, Department, Member, MemberId, MembershipStatus};
