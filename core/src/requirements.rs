//! Immutable per-solve requirements.

use crate::{
    error::{RosterError, RosterResult},
    tier::{DutyType, Tier},
    workdate::TierCounts,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INTERVAL_LEADER: i64 = 3;
pub const DEFAULT_INTERVAL_COMMITTEE: i64 = 4;
pub const DEFAULT_INTERVAL_GENERAL: i64 = 5;

/// Minimum days between two stints of the same person in the same tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalDays {
    #[serde(default = "default_leader")]
    pub leader: i64,
    #[serde(default = "default_committee")]
    pub committee: i64,
    #[serde(default = "default_general")]
    pub general: i64,
}

fn default_leader() -> i64 { DEFAULT_INTERVAL_LEADER }
fn default_committee() -> i64 { DEFAULT_INTERVAL_COMMITTEE }
fn default_general() -> i64 { DEFAULT_INTERVAL_GENERAL }

impl Default for IntervalDays {
    fn default() -> Self {
        Self {
            leader:    DEFAULT_INTERVAL_LEADER,
            committee: DEFAULT_INTERVAL_COMMITTEE,
            general:   DEFAULT_INTERVAL_GENERAL,
        }
    }
}

/// Built once before a solve and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirements {
    duty_type: DutyType,
    intervals: IntervalDays,
    default_counts: TierCounts,
}

impl Requirements {
    /// Rejects any interval that is zero or negative.
    pub fn new(
        duty_type: DutyType,
        intervals: IntervalDays,
        default_counts: TierCounts,
    ) -> RosterResult<Self> {
        for (tier, days) in [
            (Tier::Leader, intervals.leader),
            (Tier::Committee, intervals.committee),
            (Tier::General, intervals.general),
        ] {
            if days <= 0 {
                return Err(RosterError::NonPositiveInterval { tier, days });
            }
        }
        Ok(Self { duty_type, intervals, default_counts })
    }

    pub fn with_defaults(duty_type: DutyType) -> Self {
        Self {
            duty_type,
            intervals: IntervalDays::default(),
            default_counts: TierCounts::default(),
        }
    }

    pub fn duty_type(&self) -> DutyType {
        self.duty_type
    }

    pub fn intervals(&self) -> IntervalDays {
        self.intervals
    }

    pub fn default_counts(&self) -> TierCounts {
        self.default_counts
    }

    /// Tiers to fill per date, in order.
    pub fn required_tiers(&self) -> &'static [Tier] {
        self.duty_type.required_tiers()
    }

    /// Fails fast for Exempt: exempt persons are filtered out upstream
    /// and must never reach an interval check.
    pub fn interval_for(&self, tier: Tier) -> RosterResult<i64> {
        match tier {
            Tier::Leader    => Ok(self.intervals.leader),
            Tier::Committee => Ok(self.intervals.committee),
            Tier::General   => Ok(self.intervals.general),
            Tier::Exempt    => Err(RosterError::ExemptHasNoInterval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        let intervals = IntervalDays { committee: 0, ..IntervalDays::default() };
        let err = Requirements::new(DutyType::Library, intervals, TierCounts::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RosterError::NonPositiveInterval { tier: Tier::Committee, days: 0 }
        ));
    }

    #[test]
    fn negative_interval_is_rejected() {
        let intervals = IntervalDays { leader: -2, ..IntervalDays::default() };
        assert!(Requirements::new(DutyType::Safety, intervals, TierCounts::default()).is_err());
    }

    #[test]
    fn exempt_interval_lookup_fails() {
        let reqs = Requirements::with_defaults(DutyType::Health);
        assert!(matches!(
            reqs.interval_for(Tier::Exempt),
            Err(RosterError::ExemptHasNoInterval)
        ));
        assert_eq!(reqs.interval_for(Tier::General).unwrap(), DEFAULT_INTERVAL_GENERAL);
    }
}
