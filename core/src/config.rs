use crate::{
    requirements::{IntervalDays, Requirements},
    tier::DutyType,
    workdate::TierCounts,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERBOOK_ALLOWANCE: usize = 1;

fn default_allowance() -> usize { DEFAULT_OVERBOOK_ALLOWANCE }

/// On-disk shape of `requirements.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RequirementsFile {
    duty_type: DutyType,
    #[serde(default)]
    interval_days: IntervalDays,
    #[serde(default)]
    default_counts: TierCounts,
    #[serde(default = "default_allowance")]
    overbook_allowance: usize,
}

/// Everything a solve needs besides its dates and roster.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub requirements: Requirements,
    /// Extra stints a fully booked person may take when the regular pool
    /// runs dry.
    pub overbook_allowance: usize,
}

impl RosterConfig {
    /// Load from `{data_dir}/requirements.json`. Non-positive intervals
    /// are rejected here, before any solve starts.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/requirements.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid {path}: {e}"))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let file: RequirementsFile = serde_json::from_str(content)?;
        let requirements =
            Requirements::new(file.duty_type, file.interval_days, file.default_counts)?;
        log::info!(
            "Loaded requirements: duty {}, intervals {:?}, default counts {:?}, overbook allowance {}",
            requirements.duty_type(),
            requirements.intervals(),
            requirements.default_counts(),
            file.overbook_allowance
        );
        Ok(Self { requirements, overbook_allowance: file.overbook_allowance })
    }

    /// Swap the duty type while keeping intervals and counts.
    pub fn with_duty(self, duty: DutyType) -> anyhow::Result<Self> {
        let reqs = &self.requirements;
        let requirements = Requirements::new(duty, reqs.intervals(), reqs.default_counts())?;
        Ok(Self { requirements, ..self })
    }

    /// Hardcoded defaults for unit tests. Never used in production.
    pub fn default_test() -> Self {
        Self {
            requirements: Requirements::with_defaults(DutyType::Library),
            overbook_allowance: DEFAULT_OVERBOOK_ALLOWANCE,
        }
    }
}
