use crate::{tier::Tier, types::PersonId};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    // ── Input / configuration ──────────────────────
    #[error("Invalid date '{input}': expected YYYY-MM-DD ({source})")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Interval for {tier} must be a positive number of days, got {days}")]
    NonPositiveInterval { tier: Tier, days: i64 },

    #[error("Person {person_id} has no responsibility tier")]
    MissingResponsibility { person_id: PersonId },

    #[error("Roster record {record} has no resolvable name")]
    MissingName { record: String },

    #[error("Person {person_id} appears twice with conflicting details")]
    DuplicatePerson { person_id: PersonId },

    #[error("No {tier} personnel available but {needed} slots are required")]
    InsufficientPopulation { tier: Tier, needed: usize, available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ── Structural ─────────────────────────────────
    #[error("No eligible personnel: {needed} slots cannot be divided among 0 people")]
    NoEligiblePersonnel { needed: usize },

    #[error(
        "Person {person_id} holds {assigned} stints while resolving {tier}, \
         above the ceiling of {max_stint} + {allowance}"
    )]
    OverAssigned {
        person_id: PersonId,
        tier: Tier,
        assigned: usize,
        max_stint: usize,
        allowance: usize,
    },

    #[error("Capacity table has not been computed for this person bank")]
    CapacityNotComputed,

    #[error("Exempt persons carry no assignment interval")]
    ExemptHasNoInterval,

    #[error("Person {person_id} not found in the person bank")]
    UnknownPerson { person_id: PersonId },

    // ── Not a fault ────────────────────────────────
    #[error("All {dates} dates already have every slot filled")]
    AlreadyFullyAssigned { dates: usize },

    // ── Recoverable, caught inside the engine ──────
    #[error("Candidate rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RosterError {
    /// True for constraint violations the engine skips past.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Per-candidate constraint violations raised by `assign_responsibility`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("person {person_id} on {date} is {days_since} days past their latest {tier} stint, needs more than {interval}")]
    TooSoon {
        person_id: PersonId,
        tier: Tier,
        date: NaiveDate,
        days_since: i64,
        interval: i64,
    },

    #[error("no open {tier} slot on {date} (leader {leader_full}, committee {committee_full}, general {general_full})")]
    TierFull {
        tier: Tier,
        date: NaiveDate,
        leader_full: bool,
        committee_full: bool,
        general_full: bool,
    },

    #[error("person {person_id} is already on duty on {date}")]
    AlreadyOnDuty { person_id: PersonId, date: NaiveDate },

    #[error("person {person_id} is exempt from duty")]
    Exempt { person_id: PersonId },
}

pub type RosterResult<T> = Result<T, RosterError>;
