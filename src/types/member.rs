//! Member-related types for the club dues engine
//!
//! This module defines the normalized representation of one roster line and
//! the closed sets of labels a roster may use for status, category and
//! department. Labels are validated when a row is loaded; nothing leaves the
//! loader as a free-text string.

use super::error::DuesError;
use crate::core::age;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Member identifier (membership number)
pub type MemberId = u32;

/// Membership status
///
/// Only the literal `Aktiv` marks an active membership; any other status
/// value is treated as passive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipStatus {
    Active,
    Passive,
}

impl MembershipStatus {
    pub const ACTIVE_LABEL: &'static str = "Aktiv";
    pub const PASSIVE_LABEL: &'static str = "Passiv";

    pub fn from_label(label: &str) -> Self {
        if label == Self::ACTIVE_LABEL {
            MembershipStatus::Active
        } else {
            MembershipStatus::Passive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipStatus::Active => Self::ACTIVE_LABEL,
            MembershipStatus::Passive => Self::PASSIVE_LABEL,
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contribution category a member is billed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Single parent with children, billed through the parent
    SingleParent,
    /// Two partners billed through one payer
    Couple,
    /// Family membership, billed once per family through the payer
    Family,
    /// Pupil, apprentice or student
    Student,
    Retiree,
    PlainMember,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::SingleParent,
        Category::Couple,
        Category::Family,
        Category::Student,
        Category::Retiree,
        Category::PlainMember,
    ];

    /// Label used for this category in roster exports and reports
    pub fn label(&self) -> &'static str {
        match self {
            Category::SingleParent => "Alleinerziehend",
            Category::Couple => "Ehepaar",
            Category::Family => "Familie",
            Category::Student => "Schüler/Student",
            Category::Retiree => "Rentner",
            Category::PlainMember => "Mitglied",
        }
    }
}

impl FromStr for Category {
    type Err = DuesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| DuesError::unknown_label("category", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sport department (section) a member belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Tennis,
    TableTennis,
    Gymnastics,
    Dance,
    AdaptiveSports,
    Hiking,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Tennis,
        Department::TableTennis,
        Department::Gymnastics,
        Department::Dance,
        Department::AdaptiveSports,
        Department::Hiking,
    ];

    /// Label used for this department in roster exports and reports
    pub fn label(&self) -> &'static str {
        match self {
            Department::Tennis => "Tennis",
            Department::TableTennis => "Tischtennis",
            Department::Gymnastics => "Turnen",
            Department::Dance => "Tanzen",
            Department::AdaptiveSports => "Behindertensport",
            Department::Hiking => "Wandern",
        }
    }
}

impl FromStr for Department {
    type Err = DuesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|department| department.label() == s)
            .ok_or_else(|| DuesError::unknown_label("department", s))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One member of the roster
///
/// Immutable once loaded. Age is never stored; it is derived from the birth
/// date for whatever evaluation date the caller supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Unique membership number
    pub id: MemberId,

    pub first_name: String,

    pub last_name: String,

    pub birth_date: NaiveDate,

    pub status: MembershipStatus,

    /// Membership number of the member responsible for paying this member's dues
    ///
    /// A member is its own payer when `payer == id`.
    pub payer: MemberId,

    pub category: Category,

    pub department: Department,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }

    /// Whether this member is the designated payer of its billing family
    pub fn is_payer(&self) -> bool {
        self.payer == self.id
    }

    /// Age in whole years on `today`
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age::age(today, self.birth_date)
    }

    /// Whether this member is a minor on `today`
    pub fn is_child_on(&self, today: NaiveDate) -> bool {
        age::is_child(today, self.birth_date)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Alleinerziehend", Category::SingleParent)]
    #[case("Ehepaar", Category::Couple)]
    #[case("Familie", Category::Family)]
    #[case("Schüler/Student", Category::Student)]
    #[case("Rentner", Category::Retiree)]
    #[case("Mitglied", Category::PlainMember)]
    fn test_category_labels(#[case] label: &str, #[case] expected: Category) {
        assert_eq!(label.parse::<Category>().unwrap(), expected);
        assert_eq!(expected.to_string(), label);
    }

    #[rstest]
    #[case("Tennis", Department::Tennis)]
    #[case("Tischtennis", Department::TableTennis)]
    #[case("Turnen", Department::Gymnastics)]
    #[case("Tanzen", Department::Dance)]
    #[case("Behindertensport", Department::AdaptiveSports)]
    #[case("Wandern", Department::Hiking)]
    fn test_department_labels(#[case] label: &str, #[case] expected: Department) {
        assert_eq!(label.parse::<Department>().unwrap(), expected);
        assert_eq!(expected.to_string(), label);
    }

    #[test]
    fn test_unknown_department_names_value() {
        let err = "Schach".parse::<Department>().unwrap_err();
        assert!(matches!(err, DuesError::ParseError { .. }));
        assert!(err.to_string().contains("'Schach'"));
    }

    #[test]
    fn test_unknown_category_names_value() {
        let err = "familie".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("unknown category 'familie'"));
    }

    #[rstest]
    #[case("Aktiv", MembershipStatus::Active)]
    #[case("Passiv", MembershipStatus::Passive)]
    #[case("aktiv", MembershipStatus::Passive)]
    #[case("", MembershipStatus::Passive)]
    fn test_status_from_label(#[case] label: &str, #[case] expected: MembershipStatus) {
        assert_eq!(MembershipStatus::from_label(label), expected);
    }

    #[test]
    fn test_member_is_payer() {
        let member = Member {
            id: 7,
            first_name: "Anna".to_string(),
            last_name: "Berg".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 5, 1).unwrap(),
            status: MembershipStatus::Active,
            payer: 7,
            category: Category::Family,
            department: Department::Tennis,
        };
        assert!(member.is_payer());
        assert!(member.is_active());

        let child = Member {
            id: 8,
            payer: 7,
            ..member
        };
        assert!(!child.is_payer());
    }
}
