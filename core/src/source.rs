//! Roster and calendar sources.
//!
//! Sources turn files into validated core input. All input errors
//! surface here, at load time, never inside the assignment loop.

use crate::{
    error::{RosterError, RosterResult},
    person::{Person, PersonBank},
    requirements::Requirements,
    tier::Tier,
    types::PersonId,
    workdate::{parse_date, TierCounts, WorkDate},
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Yields the persons of one solve.
pub trait RosterSource {
    fn load_persons(&self) -> RosterResult<PersonBank>;
}

/// Yields the dates of one solve. Counts missing from a record fall back
/// to `reqs.default_counts()`.
pub trait CalendarSource {
    fn load_dates(&self, reqs: &Requirements) -> RosterResult<Vec<WorkDate>>;
}

fn read_file(path: &Path) -> RosterResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()).into())
}

// ── Persons ────────────────────────────────────

/// Normalized roster row, whatever the file format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub tiers: Vec<Tier>,
    /// Tier -> `YYYY-MM-DD` of the most recent stint before this period.
    #[serde(default)]
    pub last_assigned: BTreeMap<Tier, String>,
}

impl PersonRecord {
    fn into_person(self) -> RosterResult<Person> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RosterError::MissingName { record: format!("id {}", self.id) });
        }
        let mut person = Person::new(self.id, name, self.tiers)?
            .with_contact(self.email.trim(), self.phone.trim());
        for (tier, date) in &self.last_assigned {
            person = person.with_last_assigned(*tier, parse_date(date)?);
        }
        Ok(person)
    }
}

/// Validate rows and build the bank.
///
/// Duplicate ids resolve deterministically: a row identical to an
/// earlier one is dropped, a conflicting one is an error.
pub fn build_bank(records: Vec<PersonRecord>) -> RosterResult<PersonBank> {
    let mut seen: BTreeMap<PersonId, PersonRecord> = BTreeMap::new();
    let mut persons = Vec::with_capacity(records.len());

    for record in records {
        if let Some(earlier) = seen.get(&record.id) {
            if *earlier == record {
                log::warn!("Dropping repeated roster row for person {}", record.id);
                continue;
            }
            return Err(RosterError::DuplicatePerson { person_id: record.id });
        }
        seen.insert(record.id, record.clone());
        persons.push(record.into_person()?);
    }

    PersonBank::new(persons)
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    persons: Vec<PersonRecord>,
}

/// `{ "persons": [ { "id": 1, "name": "...", "tiers": ["committee"] } ] }`
pub struct JsonRosterSource {
    path: PathBuf,
}

impl JsonRosterSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn parse(content: &str) -> RosterResult<PersonBank> {
        let file: RosterFile = serde_json::from_str(content)?;
        build_bank(file.persons)
    }
}

impl RosterSource for JsonRosterSource {
    fn load_persons(&self) -> RosterResult<PersonBank> {
        let bank = Self::parse(&read_file(&self.path)?)?;
        log::info!("Loaded {} persons from {}", bank.len(), self.path.display());
        Ok(bank)
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: PersonId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    tiers: String,
    #[serde(default)]
    last_leader: Option<String>,
    #[serde(default)]
    last_committee: Option<String>,
    #[serde(default)]
    last_general: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> RosterResult<PersonRecord> {
        let mut tiers = Vec::new();
        for raw in self.tiers.split('|').map(str::trim).filter(|t| !t.is_empty()) {
            let tier = raw
                .parse::<Tier>()
                .map_err(|e| anyhow::anyhow!("person {}: {e}", self.id))?;
            tiers.push(tier);
        }

        let mut last_assigned = BTreeMap::new();
        for (tier, date) in [
            (Tier::Leader, self.last_leader),
            (Tier::Committee, self.last_committee),
            (Tier::General, self.last_general),
        ] {
            if let Some(date) = date.filter(|d| !d.trim().is_empty()) {
                last_assigned.insert(tier, date);
            }
        }

        Ok(PersonRecord {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            tiers,
            last_assigned,
        })
    }
}

/// Header `id,name,email,phone,tiers`, tiers separated by `|`.
/// Optional `last_leader`, `last_committee`, `last_general` columns.
pub struct CsvRosterSource {
    path: PathBuf,
}

impl CsvRosterSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl RosterSource for CsvRosterSource {
    fn load_persons(&self) -> RosterResult<PersonBank> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            records.push(row?.into_record()?);
        }
        let bank = build_bank(records)?;
        log::info!("Loaded {} persons from {}", bank.len(), self.path.display());
        Ok(bank)
    }
}

/// Picks the roster reader by file extension.
pub fn roster_source_for(path: impl AsRef<Path>) -> Box<dyn RosterSource> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Box::new(CsvRosterSource::new(path)),
        _ => Box::new(JsonRosterSource::new(path)),
    }
}

// ── Dates ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DateRecord {
    date: String,
    req_num_leader: Option<usize>,
    req_num_committee: Option<usize>,
    req_num_general: Option<usize>,
    #[serde(default)]
    school_off: bool,
    #[serde(default)]
    exempt_tags: Vec<String>,
    #[serde(default)]
    assignees_leader: Vec<PersonId>,
    #[serde(default)]
    assignees_committee: Vec<PersonId>,
    #[serde(default)]
    assignees_general: Vec<PersonId>,
}

impl DateRecord {
    fn into_workdate(self, defaults: TierCounts) -> RosterResult<WorkDate> {
        let required = TierCounts::new(
            self.req_num_leader.unwrap_or(defaults.leader),
            self.req_num_committee.unwrap_or(defaults.committee),
            self.req_num_general.unwrap_or(defaults.general),
        );
        let mut day = WorkDate::parse(&self.date, required)?
            .with_school_off(self.school_off)
            .with_exempt_tags(self.exempt_tags);
        day.prefill(Tier::Leader, &self.assignees_leader)?;
        day.prefill(Tier::Committee, &self.assignees_committee)?;
        day.prefill(Tier::General, &self.assignees_general)?;
        Ok(day)
    }
}

#[derive(Debug, Deserialize)]
struct CalendarFile {
    dates: Vec<DateRecord>,
}

/// `{ "dates": [ { "date": "2024-04-06", "req_num_leader": 1, ... } ] }`
pub struct JsonCalendarSource {
    path: PathBuf,
}

impl JsonCalendarSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn parse(content: &str, reqs: &Requirements) -> RosterResult<Vec<WorkDate>> {
        let file: CalendarFile = serde_json::from_str(content)?;
        file.dates
            .into_iter()
            .map(|r| r.into_workdate(reqs.default_counts()))
            .collect()
    }
}

impl CalendarSource for JsonCalendarSource {
    fn load_dates(&self, reqs: &Requirements) -> RosterResult<Vec<WorkDate>> {
        let dates = Self::parse(&read_file(&self.path)?, reqs)?;
        log::info!("Loaded {} dates from {}", dates.len(), self.path.display());
        Ok(dates)
    }
}
