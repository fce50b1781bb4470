//! A single calendar date that needs staffing.

use crate::{
    error::{RosterError, RosterResult},
    tier::Tier,
    types::PersonId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Head-count per assignable tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    #[serde(default = "one")]
    pub leader: usize,
    #[serde(default = "two")]
    pub committee: usize,
    #[serde(default = "one")]
    pub general: usize,
}

fn one() -> usize { 1 }
fn two() -> usize { 2 }

impl Default for TierCounts {
    fn default() -> Self {
        Self { leader: 1, committee: 2, general: 1 }
    }
}

impl TierCounts {
    pub fn new(leader: usize, committee: usize, general: usize) -> Self {
        Self { leader, committee, general }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Leader    => self.leader,
            Tier::Committee => self.committee,
            Tier::General   => self.general,
            Tier::Exempt    => 0,
        }
    }
}

/// Parse a `YYYY-MM-DD` string. Anything else is a hard input error.
pub fn parse_date(input: &str) -> RosterResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        RosterError::InvalidDate { input: input.to_string(), source }
    })
}

/// Required counts plus the people committed so far.
///
/// `assignees(tier).len() <= required.get(tier)` holds after every
/// commit; the engine is the only writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkDate {
    pub date: NaiveDate,
    pub required: TierCounts,
    /// Informational only; the engine staffs school-off dates as usual.
    pub school_off: bool,
    /// Grade/cohort tags consumed by roster sources, not by the engine.
    pub exempt_tags: Vec<String>,
    assignees_leader: Vec<PersonId>,
    assignees_committee: Vec<PersonId>,
    assignees_general: Vec<PersonId>,
}

impl WorkDate {
    pub fn new(date: NaiveDate, required: TierCounts) -> Self {
        Self {
            date,
            required,
            school_off: false,
            exempt_tags: Vec::new(),
            assignees_leader: Vec::new(),
            assignees_committee: Vec::new(),
            assignees_general: Vec::new(),
        }
    }

    pub fn parse(datestr: &str, required: TierCounts) -> RosterResult<Self> {
        Ok(Self::new(parse_date(datestr)?, required))
    }

    pub fn with_school_off(mut self, school_off: bool) -> Self {
        self.school_off = school_off;
        self
    }

    pub fn with_exempt_tags(mut self, tags: Vec<String>) -> Self {
        self.exempt_tags = tags;
        self
    }

    /// Seed a tier with people committed before this solve.
    pub fn prefill(&mut self, tier: Tier, ids: &[PersonId]) -> RosterResult<()> {
        if self.assignees(tier).len() + ids.len() > self.required.get(tier) {
            return Err(anyhow::anyhow!(
                "{}: {} pre-assigned {tier} entries exceed the {} required",
                self.date,
                self.assignees(tier).len() + ids.len(),
                self.required.get(tier)
            )
            .into());
        }
        for &id in ids {
            self.push_assignee(tier, id);
        }
        Ok(())
    }

    pub fn assignees(&self, tier: Tier) -> &[PersonId] {
        match tier {
            Tier::Leader    => &self.assignees_leader,
            Tier::Committee => &self.assignees_committee,
            Tier::General   => &self.assignees_general,
            Tier::Exempt    => &[],
        }
    }

    pub(crate) fn push_assignee(&mut self, tier: Tier, id: PersonId) {
        match tier {
            Tier::Leader    => self.assignees_leader.push(id),
            Tier::Committee => self.assignees_committee.push(id),
            Tier::General   => self.assignees_general.push(id),
            Tier::Exempt    => {}
        }
    }

    pub fn open_slots(&self, tier: Tier) -> usize {
        self.required.get(tier).saturating_sub(self.assignees(tier).len())
    }

    pub fn is_tier_full(&self, tier: Tier) -> bool {
        self.open_slots(tier) == 0
    }

    /// Whether (leader, committee, general) each have enough people.
    pub fn enough_assignees(&self) -> (bool, bool, bool) {
        (
            self.is_tier_full(Tier::Leader),
            self.is_tier_full(Tier::Committee),
            self.is_tier_full(Tier::General),
        )
    }

    /// SATISFIED when every tier is full, NEEDS_ATTENTION otherwise.
    pub fn is_satisfied(&self) -> bool {
        Tier::ASSIGNABLE.iter().all(|t| self.is_tier_full(*t))
    }

    pub fn is_satisfied_for(&self, tiers: &[Tier]) -> bool {
        tiers.iter().all(|t| self.is_tier_full(*t))
    }

    pub fn total_assignees(&self) -> usize {
        self.assignees_leader.len() + self.assignees_committee.len() + self.assignees_general.len()
    }

    /// Stints held by `person_id` on this date, across all tiers.
    pub fn count_of(&self, person_id: PersonId) -> usize {
        Tier::ASSIGNABLE
            .iter()
            .map(|t| self.assignees(*t).iter().filter(|id| **id == person_id).count())
            .sum()
    }

    pub fn is_on_duty(&self, person_id: PersonId) -> bool {
        self.count_of(person_id) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_dates_do_not_share_assignee_lists() {
        let mut a = WorkDate::parse("2024-04-06", TierCounts::default()).unwrap();
        let b = WorkDate::parse("2024-04-13", TierCounts::default()).unwrap();
        a.push_assignee(Tier::General, 7);
        assert_eq!(a.assignees(Tier::General), &[7]);
        assert!(b.assignees(Tier::General).is_empty());
    }

    #[test]
    fn malformed_date_is_an_input_error() {
        let err = WorkDate::parse("2024/04/06", TierCounts::default()).unwrap_err();
        assert!(matches!(err, RosterError::InvalidDate { .. }));
    }

    #[test]
    fn prefill_beyond_requirement_fails() {
        let mut d = WorkDate::parse("2024-04-06", TierCounts::new(1, 2, 1)).unwrap();
        assert!(d.prefill(Tier::Leader, &[1, 2]).is_err());
        assert!(d.assignees(Tier::Leader).is_empty());
    }

    #[test]
    fn satisfaction_tracks_every_tier() {
        let mut d = WorkDate::parse("2024-04-06", TierCounts::new(1, 1, 0)).unwrap();
        assert!(!d.is_satisfied());
        d.push_assignee(Tier::Leader, 1);
        assert!(d.is_satisfied_for(&[Tier::Leader, Tier::General]));
        d.push_assignee(Tier::Committee, 2);
        assert!(d.is_satisfied());
        assert_eq!(d.total_assignees(), 2);
    }
}
