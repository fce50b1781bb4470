//! The assignment engine.
//!
//! EXECUTION ORDER (fixed, one pass, never re-looped):
//!   1. Partition dates into NEEDS_ATTENTION and SATISFIED.
//!   2. Compute the capacity table once and attach it to the bank.
//!   3. For each date needing attention:
//!        a. regular phase: draw from the free pool, tier by tier
//!        b. overbook phase: only if a required tier is still short,
//!           draw from the fully booked pool
//!   4. Dates whose assignee count grew join the filled set.
//!
//! RULES:
//!   - Candidate order comes from the seeded shuffle stream only.
//!   - Rejections are recoverable and move on to the next candidate.
//!   - Every other error aborts the solve.
//!   - Every decision is recorded in the event log.

use crate::{
    capacity::{max_allowed_days_per_person, CapacityTable},
    config::{RosterConfig, DEFAULT_OVERBOOK_ALLOWANCE},
    eligibility::find_free_workers_per_responsibility,
    error::{Rejection, RosterError, RosterResult},
    event::SolveEvent,
    person::{Person, PersonBank},
    requirements::Requirements,
    rng::{RngBank, RngStream, SolveRng},
    tier::{DutyType, Tier},
    types::RunId,
    workdate::WorkDate,
};
use serde::Serialize;

/// The two result sets of a match. Both keep input order.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub filled: Vec<WorkDate>,
    pub still_short: Vec<WorkDate>,
}

/// Everything a report needs after a solve.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub run_id: RunId,
    pub seed: u64,
    pub duty: DutyType,
    pub filled: Vec<WorkDate>,
    pub still_short: Vec<WorkDate>,
    pub bank: PersonBank,
    pub capacity: CapacityTable,
    pub events: Vec<SolveEvent>,
}

pub struct Matcher {
    pub run_id:         RunId,
    seed:               u64,
    requirements:       Requirements,
    rng:                SolveRng,
    overbook_allowance: usize,
    events:             Vec<SolveEvent>,
}

impl Matcher {
    pub fn new(run_id: RunId, seed: u64, requirements: Requirements) -> Self {
        Self {
            rng:                RngBank::new(seed).for_stream(RngStream::Shuffle),
            overbook_allowance: DEFAULT_OVERBOOK_ALLOWANCE,
            events:             Vec::new(),
            requirements,
            seed,
            run_id,
        }
    }

    pub fn from_config(run_id: RunId, seed: u64, config: &RosterConfig) -> Self {
        Self::new(run_id, seed, config.requirements.clone())
            .with_overbook_allowance(config.overbook_allowance)
    }

    pub fn with_overbook_allowance(mut self, allowance: usize) -> Self {
        self.overbook_allowance = allowance;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Event log of the most recent solve.
    pub fn events(&self) -> &[SolveEvent] {
        &self.events
    }

    /// Run a match and package the result for report sinks.
    pub fn solve(&mut self, dates: Vec<WorkDate>, mut bank: PersonBank) -> RosterResult<Solution> {
        let outcome = self.run_match(dates, &mut bank)?;
        let capacity = *bank.capacity().ok_or(RosterError::CapacityNotComputed)?;
        Ok(Solution {
            run_id: self.run_id.clone(),
            seed: self.seed,
            duty: self.requirements.duty_type(),
            filled: outcome.filled,
            still_short: outcome.still_short,
            bank,
            capacity,
            events: self.events.clone(),
        })
    }

    /// One pass over every date that needs attention.
    ///
    /// Dates already satisfied go straight to `filled`. Partial success
    /// is a normal outcome; only structural errors abort.
    pub fn run_match(
        &mut self,
        mut dates: Vec<WorkDate>,
        bank: &mut PersonBank,
    ) -> RosterResult<MatchOutcome> {
        self.events.clear();
        self.events.push(SolveEvent::SolveStarted {
            run_id: self.run_id.clone(),
            seed: self.seed,
            duty: self.requirements.duty_type(),
            dates: dates.len(),
            persons: bank.len(),
        });

        let needs_attention: Vec<usize> = (0..dates.len())
            .filter(|&i| !dates[i].is_satisfied())
            .collect();
        if needs_attention.is_empty() {
            return Err(RosterError::AlreadyFullyAssigned { dates: dates.len() });
        }
        log::info!(
            "{} of {} dates need attention ({} duty)",
            needs_attention.len(),
            dates.len(),
            self.requirements.duty_type()
        );

        let table = max_allowed_days_per_person(&dates, bank)?;
        bank.attach_capacity(table);
        self.events.push(SolveEvent::CapacityComputed { table });

        let mut is_filled = vec![true; dates.len()];
        for idx in needs_attention {
            let before = dates[idx].total_assignees();
            self.assign_person(&mut dates, idx, bank)?;
            let day = &dates[idx];
            let after = day.total_assignees();

            if after > before {
                log::debug!("{}: {before} -> {after} assignees", day.date);
                self.events.push(SolveEvent::DateFilled { date: day.date, assignees: after });
            } else {
                log::warn!("{}: no one could be assigned", day.date);
                is_filled[idx] = false;
                self.events.push(SolveEvent::DateStillShort {
                    date:           day.date,
                    open_leader:    day.open_slots(Tier::Leader),
                    open_committee: day.open_slots(Tier::Committee),
                    open_general:   day.open_slots(Tier::General),
                });
            }
        }

        let mut outcome = MatchOutcome { filled: Vec::new(), still_short: Vec::new() };
        for (day, filled) in dates.into_iter().zip(is_filled) {
            if filled {
                outcome.filled.push(day);
            } else {
                outcome.still_short.push(day);
            }
        }
        log::info!(
            "Match complete: {} filled, {} still short",
            outcome.filled.len(),
            outcome.still_short.len()
        );
        Ok(outcome)
    }

    /// Regular phase, then one overbook phase if a required tier is
    /// still short. No further retries.
    pub fn assign_person(
        &mut self,
        dates: &mut [WorkDate],
        idx: usize,
        bank: &mut PersonBank,
    ) -> RosterResult<()> {
        self.assign_day(dates, idx, bank, false)?;

        let day = &dates[idx];
        if !day.is_satisfied_for(self.requirements.required_tiers()) {
            log::warn!("{}: regular pool exhausted, overbooking", day.date);
            self.events.push(SolveEvent::OverbookTriggered {
                date:           day.date,
                open_leader:    day.open_slots(Tier::Leader),
                open_committee: day.open_slots(Tier::Committee),
                open_general:   day.open_slots(Tier::General),
            });
            self.assign_day(dates, idx, bank, true)?;
        }
        Ok(())
    }

    /// Fill each required tier of the duty type, in its fixed order.
    pub fn assign_day(
        &mut self,
        dates: &mut [WorkDate],
        idx: usize,
        bank: &mut PersonBank,
        overbook: bool,
    ) -> RosterResult<()> {
        for &tier in self.requirements.required_tiers() {
            let interval_days = self.requirements.interval_for(tier)?;
            self.assign_day_per_responsibility(dates, idx, bank, tier, interval_days, overbook)?;
        }
        Ok(())
    }

    /// Offer open `tier` slots on `dates[idx]` to shuffled candidates.
    /// Returns how many were committed.
    pub fn assign_day_per_responsibility(
        &mut self,
        dates: &mut [WorkDate],
        idx: usize,
        bank: &mut PersonBank,
        tier: Tier,
        interval_days: i64,
        overbook: bool,
    ) -> RosterResult<usize> {
        let date = dates[idx].date;
        if dates[idx].is_tier_full(tier) {
            return Ok(0);
        }

        let buckets = find_free_workers_per_responsibility(
            tier,
            dates,
            bank,
            &self.requirements,
            self.overbook_allowance,
        )?;

        if let Some(stint) = bank.capacity().and_then(|t| t.get(tier)) {
            for skipped in &buckets.skipped {
                self.events.push(SolveEvent::PersonSkipped {
                    date,
                    tier,
                    person_id: skipped.person_id,
                    assigned:  skipped.assigned,
                    max_stint: stint.max_stint,
                });
            }
        }

        let mut candidates = if overbook { buckets.fully_booked } else { buckets.free };
        self.rng.shuffle(&mut candidates);

        let mut committed = 0;
        for person_id in candidates {
            if dates[idx].is_tier_full(tier) {
                break;
            }
            let person = bank.get_mut(person_id)?;
            match assign_responsibility(&mut dates[idx], person, tier, interval_days) {
                Ok(true) => {
                    committed += 1;
                    log::debug!("{date}: {tier} <- person {person_id}{}", if overbook { " (overbook)" } else { "" });
                    self.events.push(SolveEvent::AssignmentCommitted { date, tier, person_id, overbook });
                }
                Ok(false) => break,
                Err(RosterError::Rejected(reason)) => {
                    log::debug!("{date}: {reason}");
                    self.events.push(SolveEvent::CandidateRejected {
                        date,
                        tier,
                        person_id,
                        reason: reason.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(committed)
    }
}

/// Try to commit `person` to `tier` on `date`.
///
/// Returns `Ok(true)` on commit and `Ok(false)` when the date is already
/// satisfied. Constraint violations come back as `RosterError::Rejected`.
/// The gap is signed: a date on or before the person's latest `tier`
/// stint, or at most `interval_days` after it, is too soon. A person never
/// assigned to `tier` always passes the interval check.
pub fn assign_responsibility(
    date: &mut WorkDate,
    person: &mut Person,
    tier: Tier,
    interval_days: i64,
) -> RosterResult<bool> {
    if !tier.is_assignable() {
        return Err(anyhow::anyhow!("cannot commit anyone to the {tier} tier").into());
    }
    if person.is_exempt() {
        return Err(Rejection::Exempt { person_id: person.id() }.into());
    }

    if let Some(last) = person.last_assigned(tier) {
        let days_since = (date.date - last).num_days();
        if days_since <= interval_days {
            return Err(Rejection::TooSoon {
                person_id: person.id(),
                tier,
                date: date.date,
                days_since,
                interval: interval_days,
            }
            .into());
        }
    }

    if date.is_satisfied() {
        return Ok(false);
    }

    if date.is_on_duty(person.id()) {
        return Err(Rejection::AlreadyOnDuty { person_id: person.id(), date: date.date }.into());
    }

    if date.open_slots(tier) > 0 {
        date.push_assignee(tier, person.id());
        person.record_assignment(date.date, tier);
        return Ok(true);
    }

    let (leader_full, committee_full, general_full) = date.enough_assignees();
    log::warn!(
        "{}: person {} offered a {tier} slot that is not open (leader {leader_full}, committee {committee_full}, general {general_full})",
        date.date,
        person.id()
    );
    Err(Rejection::TierFull { tier, date: date.date, leader_full, committee_full, general_full }.into())
}
