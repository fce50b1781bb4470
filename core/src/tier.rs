//! Responsibility tiers and duty types.
//!
//! A tier is what a person is on the hook for on a given date.
//! A duty type decides which tiers a date needs, in fill order, and
//! which held tiers may stand in for a leader.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Leader,
    Committee,
    General,
    /// Never assignable. Filtered out before any interval lookup.
    Exempt,
}

impl Tier {
    /// The three tiers a date can require.
    pub const ASSIGNABLE: [Tier; 3] = [Tier::Leader, Tier::Committee, Tier::General];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Leader    => "leader",
            Self::Committee => "committee",
            Self::General   => "general",
            Self::Exempt    => "exempt",
        }
    }

    pub fn is_assignable(&self) -> bool {
        !matches!(self, Self::Exempt)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leader"    => Ok(Self::Leader),
            "committee" => Ok(Self::Committee),
            "general"   => Ok(Self::General),
            "exempt"    => Ok(Self::Exempt),
            other       => Err(format!("unknown tier '{other}'")),
        }
    }
}

/// The recurring duty a roster is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyType {
    Library,
    Safety,
    Health,
}

impl DutyType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Safety  => "safety",
            Self::Health  => "health",
        }
    }

    /// Tiers a date must be staffed with, in fill order.
    pub fn required_tiers(&self) -> &'static [Tier] {
        match self {
            Self::Library => &[Tier::General, Tier::Committee, Tier::Leader],
            Self::Safety  => &[Tier::General, Tier::Leader],
            Self::Health  => &[Tier::General, Tier::Leader],
        }
    }

    /// The held tier that may act as leader for this duty, if any.
    pub fn leader_stand_in(&self) -> Option<Tier> {
        match self {
            Self::Library | Self::Safety => Some(Tier::Committee),
            Self::Health                 => Some(Tier::General),
        }
    }
}

impl fmt::Display for DutyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DutyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "library" => Ok(Self::Library),
            "safety"  => Ok(Self::Safety),
            "health"  => Ok(Self::Health),
            other     => Err(format!("unknown duty type '{other}'")),
        }
    }
}

/// The tier `held` counts as when `requested` is being filled for `duty`.
///
/// Leader is a per-date role rather than a personal attribute, so a
/// committee member (library, safety) or a general member (health) is
/// treated as a leader for that lookup only. Nothing is written back.
pub fn effective_tier(held: Tier, requested: Tier, duty: DutyType) -> Tier {
    if requested == Tier::Leader && duty.leader_stand_in() == Some(held) {
        Tier::Leader
    } else {
        held
    }
}
