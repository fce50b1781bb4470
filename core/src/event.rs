//! Structured diagnostics for a single solve.
//!
//! RULE: every decision the engine makes that a coordinator might ask
//! about afterwards ("why is Tanaka on three dates?") is recorded here.
//! The `log` facade carries operator tracing; this log travels with the
//! Solution and is what reports and tests inspect.

use crate::{capacity::CapacityTable, tier::{DutyType, Tier}, types::{PersonId, RunId}};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolveEvent {
    SolveStarted {
        run_id: RunId,
        seed: u64,
        duty: DutyType,
        dates: usize,
        persons: usize,
    },
    CapacityComputed {
        table: CapacityTable,
    },
    /// Classifier left a person out of every bucket for this round.
    PersonSkipped {
        date: NaiveDate,
        tier: Tier,
        person_id: PersonId,
        assigned: usize,
        max_stint: usize,
    },
    OverbookTriggered {
        date: NaiveDate,
        open_leader: usize,
        open_committee: usize,
        open_general: usize,
    },
    CandidateRejected {
        date: NaiveDate,
        tier: Tier,
        person_id: PersonId,
        reason: String,
    },
    AssignmentCommitted {
        date: NaiveDate,
        tier: Tier,
        person_id: PersonId,
        overbook: bool,
    },
    DateFilled {
        date: NaiveDate,
        assignees: usize,
    },
    DateStillShort {
        date: NaiveDate,
        open_leader: usize,
        open_committee: usize,
        open_general: usize,
    },
}

impl SolveEvent {
    /// Stable name of the variant, matching its serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SolveStarted { .. }        => "solve_started",
            Self::CapacityComputed { .. }    => "capacity_computed",
            Self::PersonSkipped { .. }       => "person_skipped",
            Self::OverbookTriggered { .. }   => "overbook_triggered",
            Self::CandidateRejected { .. }   => "candidate_rejected",
            Self::AssignmentCommitted { .. } => "assignment_committed",
            Self::DateFilled { .. }          => "date_filled",
            Self::DateStillShort { .. }      => "date_still_short",
        }
    }
}
