//! Eligibility classifier.
//!
//! Sorts candidates for one tier into free / fully booked / overbooked
//! by how many stints they already hold across the whole date range.
//! Classification is read-only: calling it twice with no commit in
//! between gives the same buckets.

use crate::{
    capacity::{CapacityTable, Stint},
    error::{RosterError, RosterResult},
    person::{Person, PersonBank},
    requirements::Requirements,
    tier::{effective_tier, Tier},
    types::PersonId,
    workdate::WorkDate,
};
use serde::Serialize;

/// A person left out of every bucket for this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedPerson {
    pub person_id: PersonId,
    pub assigned: usize,
}

/// Bucket membership for one tier. Ids keep roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    /// Below max stint.
    pub free: Vec<PersonId>,
    /// Exactly at max stint. The overbook phase draws from here.
    pub fully_booked: Vec<PersonId>,
    /// Already at max stint plus the overbook allowance.
    pub overbooked: Vec<PersonId>,
    pub skipped: Vec<SkippedPerson>,
}

/// Stints held by a person across every tier of every date.
pub fn assigned_count(person_id: PersonId, dates: &[WorkDate]) -> usize {
    dates.iter().map(|d| d.count_of(person_id)).sum()
}

/// Classify `persons` against `stint` for `tier`.
///
/// Exempt persons are ignored. A count above
/// `max_stint + overbook_allowance` means the engine committed past the
/// ceiling and aborts the solve.
pub fn find_free_workers<'a>(
    dates: &[WorkDate],
    persons: impl IntoIterator<Item = &'a Person>,
    tier: Tier,
    stint: &Stint,
    overbook_allowance: usize,
) -> RosterResult<Eligibility> {
    let ceiling = stint.max_stint + overbook_allowance;
    let mut buckets = Eligibility::default();

    for person in persons {
        if person.is_exempt() {
            continue;
        }
        let id = person.id();
        let assigned = assigned_count(id, dates);

        if assigned < stint.max_stint {
            buckets.free.push(id);
        } else if assigned == stint.max_stint {
            buckets.fully_booked.push(id);
        } else if assigned == ceiling {
            buckets.overbooked.push(id);
        } else if assigned > ceiling {
            return Err(RosterError::OverAssigned {
                person_id: id,
                tier,
                assigned,
                max_stint: stint.max_stint,
                allowance: overbook_allowance,
            });
        } else {
            log::warn!(
                "Person {id} holds {assigned} stints, between max {} and ceiling {ceiling} for {tier}; skipping this round",
                stint.max_stint
            );
            buckets.skipped.push(SkippedPerson { person_id: id, assigned });
        }
    }

    log::debug!(
        "{tier}: free {}, fully booked {}, overbooked {}, skipped {}",
        buckets.free.len(),
        buckets.fully_booked.len(),
        buckets.overbooked.len(),
        buckets.skipped.len()
    );
    Ok(buckets)
}

/// Whether `person` can be offered a `tier` slot under `reqs`' duty type.
pub fn can_serve(person: &Person, tier: Tier, reqs: &Requirements) -> bool {
    person
        .tiers()
        .iter()
        .any(|held| effective_tier(*held, tier, reqs.duty_type()) == tier)
}

/// Highest ceiling among the tiers `person` may be committed to.
fn entitled_ceiling(
    person: &Person,
    table: &CapacityTable,
    reqs: &Requirements,
    overbook_allowance: usize,
) -> Option<usize> {
    Tier::ASSIGNABLE
        .into_iter()
        .filter(|t| can_serve(person, *t, reqs))
        .filter_map(|t| table.get(t))
        .map(|stint| stint.max_stint + overbook_allowance)
        .max()
}

/// Classify every person in the bank who can serve `tier`, using that
/// tier's entry in the bank's capacity table.
///
/// A person past `tier`'s ceiling whose count is still within the quota of
/// another tier they may serve (a general member standing in as leader,
/// say) is skipped for this round rather than treated as over-assigned.
pub fn find_free_workers_per_responsibility(
    tier: Tier,
    dates: &[WorkDate],
    bank: &PersonBank,
    reqs: &Requirements,
    overbook_allowance: usize,
) -> RosterResult<Eligibility> {
    let table = bank.capacity().ok_or(RosterError::CapacityNotComputed)?;
    let stint = table
        .get(tier)
        .ok_or_else(|| anyhow::anyhow!("{tier} is not an assignable tier"))?;
    let ceiling = stint.max_stint + overbook_allowance;

    let mut candidates = Vec::new();
    let mut quota_skipped = Vec::new();
    for person in bank.iter().filter(|p| can_serve(p, tier, reqs)) {
        let assigned = assigned_count(person.id(), dates);
        match entitled_ceiling(person, table, reqs, overbook_allowance) {
            Some(entitled) if !person.is_exempt() && assigned > ceiling && assigned <= entitled => {
                log::debug!(
                    "Person {} holds {assigned} stints, past the {tier} ceiling {ceiling} but within their own quota {entitled}; skipping this round",
                    person.id()
                );
                quota_skipped.push(SkippedPerson { person_id: person.id(), assigned });
            }
            _ => candidates.push(person),
        }
    }

    let mut buckets = find_free_workers(dates, candidates, tier, stint, overbook_allowance)?;
    buckets.skipped.extend(quota_skipped);
    Ok(buckets)
}
