//! Dues rule table
//!
//! Maps a member's status, category, department and age to the two fee line
//! items billed by the club: the club base fee and the department fee.
//!
//! Rules that belong to a family unit (Couple, Family, SingleParent) are
//! evaluated per member: the payer is billed the unit amount and the other
//! members are billed their individual share (often zero). Summing over the
//! family happens once, in the aggregator.

use crate::core::traits::FeeSchedule;
use crate::types::{Category, Cents, Department, Member};
use chrono::NaiveDate;

/// Fee rates in cents
pub mod rates {
    use crate::types::Cents;

    pub const BASE_PASSIVE: Cents = Cents(3000);
    pub const BASE_STUDENT: Cents = Cents(5500);
    pub const BASE_RETIREE_65: Cents = Cents(7200);
    pub const BASE_FAMILY: Cents = Cents(16500);
    pub const BASE_CHILD: Cents = Cents(5500);
    pub const BASE_ADULT: Cents = Cents(8500);

    pub const TENNIS_PASSIVE_STUDENT: Cents = Cents(1800);
    pub const TENNIS_PASSIVE_UNDER_14: Cents = Cents(600);
    pub const TENNIS_PASSIVE_UNDER_18: Cents = Cents(1800);
    pub const TENNIS_PASSIVE_ADULT: Cents = Cents(2900);
    pub const TENNIS_STUDENT_UNDER_27: Cents = Cents(9600);
    pub const TENNIS_STUDENT: Cents = Cents(15500);
    pub const TENNIS_COUPLE: Cents = Cents(28000);
    /// Two adults and one child
    pub const TENNIS_FAMILY: Cents = Cents(30000);
    /// One adult and one child
    pub const TENNIS_SINGLE_PARENT: Cents = Cents(20000);
    /// Billed for every child in a family or single-parent unit
    pub const TENNIS_PER_CHILD: Cents = Cents(4000);
    pub const TENNIS_CHILD: Cents = Cents(9600);
    pub const TENNIS_ADULT: Cents = Cents(15500);

    pub const TABLE_TENNIS_CHILD: Cents = Cents(6000);
    pub const TABLE_TENNIS_ADULT: Cents = Cents(8000);

    pub const HIKING: Cents = Cents(3500);
}

pub const RETIREE_REDUCED_AGE: i32 = 65;
pub const TENNIS_STUDENT_REDUCED_AGE: i32 = 27;
pub const TENNIS_PASSIVE_YOUTH_AGE: i32 = 14;

/// Outcome of the department fee rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentFee {
    /// The department's rules produced this amount
    Charged(Cents),
    /// The department has no rule set yet; nothing is billed
    Unimplemented(Department),
}

impl DepartmentFee {
    pub fn amount(&self) -> Cents {
        match self {
            DepartmentFee::Charged(amount) => *amount,
            DepartmentFee::Unimplemented(_) => Cents::ZERO,
        }
    }
}

/// The club's current rule table
#[derive(Debug, Clone, Copy, Default)]
pub struct ClubFeeSchedule;

impl FeeSchedule for ClubFeeSchedule {
    fn base_fee(&self, member: &Member, today: NaiveDate) -> Cents {
        base_fee(member, today)
    }

    fn department_fee(&self, member: &Member, today: NaiveDate) -> DepartmentFee {
        department_fee(member, today)
    }
}

/// Club base fee
///
/// Status dominates, then category flat rates, then the minor fallback. The
/// family rate is billed once, entirely to the payer.
pub fn base_fee(member: &Member, today: NaiveDate) -> Cents {
    if !member.is_active() {
        return rates::BASE_PASSIVE;
    }

    match member.category {
        Category::Student => rates::BASE_STUDENT,
        Category::Retiree if member.age_on(today) >= RETIREE_REDUCED_AGE => rates::BASE_RETIREE_65,
        Category::Retiree => rates::BASE_ADULT,
        Category::Family if member.is_payer() => rates::BASE_FAMILY,
        Category::Family => Cents::ZERO,
        _ if member.is_child_on(today) => rates::BASE_CHILD,
        _ => rates::BASE_ADULT,
    }
}

/// Department fee, dispatched on the member's department
pub fn department_fee(member: &Member, today: NaiveDate) -> DepartmentFee {
    match member.department {
        Department::Tennis => DepartmentFee::Charged(tennis_fee(member, today)),
        Department::TableTennis => DepartmentFee::Charged(table_tennis_fee(member, today)),
        Department::Hiking => DepartmentFee::Charged(hiking_fee(member)),
        department @ (Department::Gymnastics | Department::Dance | Department::AdaptiveSports) => {
            DepartmentFee::Unimplemented(department)
        }
    }
}

fn tennis_fee(member: &Member, today: NaiveDate) -> Cents {
    let age = member.age_on(today);

    if !member.is_active() {
        return match member.category {
            Category::Student => rates::TENNIS_PASSIVE_STUDENT,
            _ if age < TENNIS_PASSIVE_YOUTH_AGE => rates::TENNIS_PASSIVE_UNDER_14,
            _ if member.is_child_on(today) => rates::TENNIS_PASSIVE_UNDER_18,
            _ => rates::TENNIS_PASSIVE_ADULT,
        };
    }

    match member.category {
        Category::Student if age < TENNIS_STUDENT_REDUCED_AGE => rates::TENNIS_STUDENT_UNDER_27,
        Category::Student => rates::TENNIS_STUDENT,
        Category::Couple if member.is_payer() => rates::TENNIS_COUPLE,
        Category::Couple => Cents::ZERO,
        // Payer covers the two-adult rate minus its included child; each
        // child is then billed the per-child rate.
        Category::Family if member.is_child_on(today) => rates::TENNIS_PER_CHILD,
        Category::Family if member.is_payer() => {
            Cents(rates::TENNIS_FAMILY.0 - rates::TENNIS_PER_CHILD.0)
        }
        Category::Family => Cents::ZERO,
        Category::SingleParent if member.is_payer() => {
            Cents(rates::TENNIS_SINGLE_PARENT.0 - rates::TENNIS_PER_CHILD.0)
        }
        Category::SingleParent => rates::TENNIS_PER_CHILD,
        _ if member.is_child_on(today) => rates::TENNIS_CHILD,
        _ => rates::TENNIS_ADULT,
    }
}

fn table_tennis_fee(member: &Member, today: NaiveDate) -> Cents {
    if !member.is_active() {
        Cents::ZERO
    } else if member.is_child_on(today) {
        rates::TABLE_TENNIS_CHILD
    } else {
        rates::TABLE_TENNIS_ADULT
    }
}

fn hiking_fee(member: &Member) -> Cents {
    if member.is_active() {
        rates::HIKING
    } else {
        Cents::ZERO
    }
}
