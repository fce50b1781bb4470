//! Capacity planning: how many stints each person should take.
//!
//! Only static information is used here (required counts and roster
//! tiers), never the current assignee state of a date.

use crate::{
    error::{RosterError, RosterResult},
    person::PersonBank,
    tier::Tier,
    workdate::WorkDate,
};
use serde::{Deserialize, Serialize};

/// Stint arithmetic for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stint {
    /// Stints each person should normally take in the period.
    pub max_stint: usize,
    /// Surplus people when demand fits the pool.
    pub available_extra: usize,
    /// People who must take one stint beyond `max_stint`.
    pub unlucky: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTable {
    pub leader: Stint,
    pub committee: Stint,
    pub general: Stint,
}

impl CapacityTable {
    /// `None` for Exempt.
    pub fn get(&self, tier: Tier) -> Option<&Stint> {
        match tier {
            Tier::Leader    => Some(&self.leader),
            Tier::Committee => Some(&self.committee),
            Tier::General   => Some(&self.general),
            Tier::Exempt    => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotTotals {
    pub leader: usize,
    pub committee: usize,
    pub general: usize,
}

/// Leader is not tallied: committee headcount doubles as the leader pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersonTotals {
    pub committee: usize,
    pub general: usize,
    pub exempt: usize,
}

pub fn total_slots_required(dates: &[WorkDate]) -> SlotTotals {
    dates.iter().fold(SlotTotals::default(), |mut acc, day| {
        acc.leader += day.required.leader;
        acc.committee += day.required.committee;
        acc.general += day.required.general;
        acc
    })
}

/// Each person is counted once, under their highest-priority tier.
/// Leader-only persons are left out.
pub fn total_persons_available(bank: &PersonBank) -> PersonTotals {
    let mut totals = PersonTotals::default();
    for person in bank.iter() {
        match person.headcount_tier() {
            Some(Tier::Committee) => totals.committee += 1,
            Some(Tier::General)   => totals.general += 1,
            Some(Tier::Exempt)    => totals.exempt += 1,
            _ => log::debug!(
                "Person {} ({}) holds only the leader tier, which has no headcount of its own; not counted",
                person.id(),
                person.name
            ),
        }
    }
    totals
}

pub fn calc_stint(needed: usize, available: usize) -> RosterResult<Stint> {
    if needed == 0 {
        // Some tiers legitimately need nobody.
        return Ok(Stint { max_stint: 0, available_extra: available, unlucky: 0 });
    }
    if available == 0 {
        return Err(RosterError::NoEligiblePersonnel { needed });
    }
    let stint = if needed <= available {
        Stint { max_stint: 1, available_extra: available - needed, unlucky: 0 }
    } else {
        Stint {
            max_stint: needed / available,
            available_extra: 0,
            unlucky: needed % available,
        }
    };
    log::debug!("needed {needed}, available {available} -> {stint:?}");
    Ok(stint)
}

/// Builds the capacity table for a solve. The leader tier draws on the
/// committee headcount.
pub fn max_allowed_days_per_person(
    dates: &[WorkDate],
    bank: &PersonBank,
) -> RosterResult<CapacityTable> {
    let needed = total_slots_required(dates);
    let available = total_persons_available(bank);

    for (tier, needed, available) in [
        (Tier::Leader, needed.leader, available.committee),
        (Tier::Committee, needed.committee, available.committee),
        (Tier::General, needed.general, available.general),
    ] {
        if needed > 0 && available == 0 {
            return Err(RosterError::InsufficientPopulation { tier, needed, available });
        }
    }

    log::info!(
        "{} dates: needed leader {} committee {} general {}; available committee {} general {} (exempt {})",
        dates.len(),
        needed.leader,
        needed.committee,
        needed.general,
        available.committee,
        available.general,
        available.exempt
    );

    let table = CapacityTable {
        leader:    calc_stint(needed.leader, available.committee)?,
        committee: calc_stint(needed.committee, available.committee)?,
        general:   calc_stint(needed.general, available.general)?,
    };
    log::info!("Capacity table: {table:?}");
    Ok(table)
}
