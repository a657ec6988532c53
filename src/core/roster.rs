//! Roster indexes
//!
//! Holds the loaded members in file order, indexed by membership number, and
//! derives billing families (members sharing one payer id) from them.

use crate::io::csv_format::member_to_csv;
use crate::types::{DuesError, Member, MemberId};
use log::warn;
use std::collections::{BTreeMap, HashMap};

/// All members of one roster export
///
/// Membership numbers are unique: inserting a member whose id is already
/// present replaces the earlier record in place, so the last row wins while
/// the member keeps the position of its first occurrence.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    members: Vec<Member>,
    index: HashMap<MemberId, usize>,
}

/// A billing family: every member sharing the same payer id, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Family<'a> {
    pub payer_id: MemberId,
    pub members: Vec<&'a Member>,
}

impl Family<'_> {
    /// The member that is its own payer, if the family has one
    pub fn payer(&self) -> Option<&Member> {
        self.members
            .iter()
            .copied()
            .find(|member| member.id == self.payer_id && member.is_payer())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, returning the record it replaced (if any)
    pub fn insert(&mut self, member: Member) -> Option<Member> {
        match self.index.get(&member.id) {
            Some(&position) => Some(std::mem::replace(&mut self.members[position], member)),
            None => {
                self.index.insert(member.id, self.members.len());
                self.members.push(member);
                None
            }
        }
    }

    /// Insert a member, warning when it replaces an earlier row
    pub fn push(&mut self, member: Member) {
        let id = member.id;
        if let Some(replaced) = self.insert(member) {
            warn!(
                "Duplicate member id {}: row [{}] replaced by a later row",
                id,
                member_to_csv(&replaced)
            );
        }
    }

    /// Build a roster from loaded rows, stopping at the first error
    pub fn load<I>(rows: I) -> Result<Self, DuesError>
    where
        I: IntoIterator<Item = Result<Member, DuesError>>,
    {
        let mut roster = Roster::new();
        for row in rows {
            roster.push(row?);
        }
        Ok(roster)
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.index.get(&id).map(|&position| &self.members[position])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in file order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Group members by payer id
    ///
    /// Families are returned in ascending payer id order, not in the order
    /// their payer ids first appear in the file. Members inside a family keep
    /// file order.
    pub fn families(&self) -> Vec<Family<'_>> {
        let mut grouped: BTreeMap<MemberId, Vec<&Member>> = BTreeMap::new();
        for member in &self.members {
            grouped.entry(member.payer).or_default().push(member);
        }

        grouped
            .into_iter()
            .map(|(payer_id, members)| Family { payer_id, members })
            .collect()
    }
}

impl FromIterator<Member> for Roster {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for member in iter {
            roster.insert(member);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Department, MembershipStatus};
    use chrono::NaiveDate;

    fn member(id: MemberId, payer: MemberId, first_name: &str) -> Member {
        Member {
            id,
            first_name: first_name.to_string(),
            last_name: "Muster".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
            status: MembershipStatus::Active,
            payer,
            category: Category::Family,
            department: Department::Tennis,
        }
    }

    #[test]
    fn test_index_by_id() {
        let roster: Roster = vec![member(1, 1, "Anna"), member(2, 1, "Ben")]
            .into_iter()
            .collect();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(2).unwrap().first_name, "Ben");
        assert!(roster.get(3).is_none());
    }

    #[test]
    fn test_duplicate_id_last_wins_in_place() {
        let mut roster = Roster::new();
        roster.insert(member(1, 1, "Anna"));
        roster.insert(member(2, 1, "Ben"));
        let replaced = roster.insert(member(1, 1, "Anne"));

        assert_eq!(replaced.unwrap().first_name, "Anna");
        assert_eq!(roster.len(), 2);
        let names: Vec<_> = roster.members().map(|m| m.first_name.as_str()).collect();
        assert_eq!(names, vec!["Anne", "Ben"]);
    }

    #[test]
    fn test_families_sorted_by_payer_id_not_first_appearance() {
        let roster: Roster = vec![
            member(30, 20, "Carl"),
            member(10, 10, "Dora"),
            member(20, 20, "Emil"),
            member(21, 20, "Frieda"),
        ]
        .into_iter()
        .collect();

        let families = roster.families();
        assert_eq!(families.len(), 2);

        assert_eq!(families[0].payer_id, 10);
        assert_eq!(families[0].len(), 1);

        assert_eq!(families[1].payer_id, 20);
        let ids: Vec<_> = families[1].members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![30, 20, 21]);
        assert_eq!(families[1].payer().unwrap().id, 20);
    }

    #[test]
    fn test_family_without_payer() {
        let roster: Roster = vec![member(5, 4, "Gina"), member(6, 4, "Hans")]
            .into_iter()
            .collect();

        let families = roster.families();
        assert_eq!(families.len(), 1);
        assert!(families[0].payer().is_none());
    }

    #[test]
    fn test_load_stops_at_first_error() {
        let rows = vec![
            Ok(member(1, 1, "Anna")),
            Err(DuesError::unknown_label("department", "Schach")),
            Ok(member(2, 1, "Ben")),
        ];

        let err = Roster::load(rows).unwrap_err();
        assert_eq!(err, DuesError::unknown_label("department", "Schach"));
    }

    #[test]
    fn test_load_keeps_last_duplicate() {
        let rows = vec![Ok(member(1, 1, "Anna")), Ok(member(1, 1, "Anne"))];

        let roster = Roster::load(rows).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(1).unwrap().first_name, "Anne");
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert!(roster.families().is_empty());
    }
}
