//! Family aggregation
//!
//! Turns per-member fees into one bill per billing family. Every family must
//! contain exactly the member it is named after (its payer); the family's
//! base and department fees are summed over all members and attributed to
//! that payer.
//!
//! In verbose mode each multi-member family is followed by one breakdown row
//! per member. Breakdown rows are informational and are never summed again.

use crate::cli::MissingPayerPolicy;
use crate::core::roster::{Family, Roster};
use crate::core::rules::DepartmentFee;
use crate::core::traits::FeeSchedule;
use crate::io::csv_format::member_to_csv;
use crate::types::{Category, Cents, Department, DuesError, Member, MemberId, MembershipStatus};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::fmt;

/// Fees of one member for both line items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberFees {
    pub base: Cents,
    pub department: Cents,
}

impl MemberFees {
    /// Saturates; family totals are checked when the family is summed
    pub fn total(&self) -> Cents {
        self.base.saturating_add(self.department)
    }
}

/// A condition worth reporting that does not stop the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The member's department has no fee rules and was billed zero
    UnimplementedDepartment {
        member: MemberId,
        department: Department,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UnimplementedDepartment { member, department } => write!(
                f,
                "No fee rules for department {} yet, billing 0 for member {}",
                department, member
            ),
        }
    }
}

/// Report rows plus the notices raised while computing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Billing {
    pub rows: Vec<ReportRow>,
    pub notices: Vec<Notice>,
}

/// One line of the dues report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Payer the amounts are billed to; `None` marks a per-member breakdown row
    pub payer: Option<MemberId>,
    pub first_name: String,
    pub last_name: String,
    pub member_id: MemberId,
    pub department: Department,
    pub status: MembershipStatus,
    pub age: i32,
    pub category: Category,
    pub fees: MemberFees,
}

impl ReportRow {
    fn new(member: &Member, payer: Option<MemberId>, age: i32, fees: MemberFees) -> Self {
        ReportRow {
            payer,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            member_id: member.id,
            department: member.department,
            status: member.status,
            age,
            category: member.category,
            fees,
        }
    }

    pub fn is_breakdown(&self) -> bool {
        self.payer.is_none()
    }
}

/// Groups a roster into billing families and totals their dues
pub struct FamilyAggregator<S: FeeSchedule> {
    schedule: S,
    evaluation_date: NaiveDate,
    verbose: bool,
    missing_payer: MissingPayerPolicy,
}

impl<S: FeeSchedule> FamilyAggregator<S> {
    pub fn new(schedule: S, evaluation_date: NaiveDate) -> Self {
        FamilyAggregator {
            schedule,
            evaluation_date,
            verbose: false,
            missing_payer: MissingPayerPolicy::Abort,
        }
    }

    /// Emit per-member breakdown rows for multi-member families
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn missing_payer(mut self, policy: MissingPayerPolicy) -> Self {
        self.missing_payer = policy;
        self
    }

    /// Fees of a single member, with a notice if a line item could not be rated
    pub fn member_fees(&self, member: &Member) -> (MemberFees, Option<Notice>) {
        let base = self.schedule.base_fee(member, self.evaluation_date);
        let fee = self.schedule.department_fee(member, self.evaluation_date);
        let (department, notice) = match fee {
            DepartmentFee::Charged(amount) => (amount, None),
            DepartmentFee::Unimplemented(department) => {
                let notice = Notice::UnimplementedDepartment {
                    member: member.id,
                    department,
                };
                warn!("{} ({})", notice, member.full_name());
                (Cents::ZERO, Some(notice))
            }
        };

        debug!(
            "Member {} ({}): base {} department {}",
            member.id,
            member.full_name(),
            base,
            department
        );

        (MemberFees { base, department }, notice)
    }

    /// Compute the report rows for every family of the roster
    ///
    /// # Errors
    ///
    /// - `IntegrityError` if a family has no payer and the policy is `Abort`
    /// - `RuleError` if a family contains a member billed to another payer,
    ///   or if a family total does not fit the amount type
    pub fn aggregate(&self, roster: &Roster) -> Result<Billing, DuesError> {
        let mut billing = Billing::default();
        let mut billed_families = 0usize;
        let mut grand_total = Cents::ZERO;

        for family in roster.families() {
            match self.evaluate_family(&family) {
                Ok(family_billing) => {
                    billed_families += 1;
                    let family_total = family_billing.rows[0].fees.total();
                    grand_total = grand_total.saturating_add(family_total);
                    billing.rows.extend(family_billing.rows);
                    billing.notices.extend(family_billing.notices);
                }
                Err(e @ DuesError::IntegrityError { .. })
                    if self.missing_payer == MissingPayerPolicy::Skip =>
                {
                    warn!("Skipping family: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Billed {} families ({} members), total {}, {} notices",
            billed_families,
            roster.len(),
            grand_total,
            billing.notices.len()
        );

        Ok(billing)
    }

    /// Compute the payer row (and breakdown rows, in verbose mode) of one family
    ///
    /// The first returned row is always the payer row.
    pub fn evaluate_family(&self, family: &Family<'_>) -> Result<Billing, DuesError> {
        if let Some(stray) = family.members.iter().find(|m| m.payer != family.payer_id) {
            return Err(DuesError::rule(
                stray.id,
                format!(
                    "billed to payer {} but evaluated in family {}",
                    stray.payer, family.payer_id
                ),
            ));
        }

        let payer = family.payer().ok_or_else(|| {
            DuesError::missing_payer(
                family.payer_id,
                family.members.iter().map(|m| member_to_csv(m)).collect(),
            )
        })?;

        let mut notices = Vec::new();
        let mut member_fees = Vec::with_capacity(family.len());
        for member in &family.members {
            let (fees, notice) = self.member_fees(member);
            member_fees.push(fees);
            notices.extend(notice);
        }

        let overflow = || DuesError::rule(payer.id, "family total exceeds the amount range");
        let family_fees = MemberFees {
            base: Cents::checked_sum(member_fees.iter().map(|fees| fees.base))
                .ok_or_else(overflow)?,
            department: Cents::checked_sum(member_fees.iter().map(|fees| fees.department))
                .ok_or_else(overflow)?,
        };
        family_fees
            .base
            .checked_add(family_fees.department)
            .ok_or_else(overflow)?;

        let mut rows = vec![ReportRow::new(
            payer,
            Some(payer.id),
            payer.age_on(self.evaluation_date),
            family_fees,
        )];

        if self.verbose && family.len() > 1 {
            let breakdown = family.members.iter().zip(member_fees);
            rows.extend(breakdown.map(|(member, fees)| {
                let age = member.age_on(self.evaluation_date);
                ReportRow::new(member, None, age, fees)
            }));
        }

        Ok(Billing { rows, notices })
    }
}
