//! People and the bank that owns them for one solve.

use crate::{
    capacity::CapacityTable,
    error::{RosterError, RosterResult},
    tier::Tier,
    types::PersonId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One committed stint. Append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub date: NaiveDate,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    id: PersonId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// First entry is the primary tier.
    tiers: Vec<Tier>,
    last_assigned: BTreeMap<Tier, NaiveDate>,
    history: Vec<AssignmentRecord>,
}

impl Person {
    /// Identity and tiers are fixed here and never change afterwards.
    pub fn new(id: PersonId, name: impl Into<String>, tiers: Vec<Tier>) -> RosterResult<Self> {
        if tiers.is_empty() {
            return Err(RosterError::MissingResponsibility { person_id: id });
        }
        let mut unique = Vec::with_capacity(tiers.len());
        for t in tiers {
            if !unique.contains(&t) {
                unique.push(t);
            }
        }
        Ok(Self {
            id,
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            tiers: unique,
            last_assigned: BTreeMap::new(),
            history: Vec::new(),
        })
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    /// Seed the last-assigned date from prior rosters.
    pub fn with_last_assigned(mut self, tier: Tier, date: NaiveDate) -> Self {
        self.last_assigned.insert(tier, date);
        self
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn primary_tier(&self) -> Tier {
        self.tiers[0]
    }

    pub fn holds(&self, tier: Tier) -> bool {
        self.tiers.contains(&tier)
    }

    pub fn is_exempt(&self) -> bool {
        self.holds(Tier::Exempt)
    }

    /// Highest-priority tier for headcount purposes:
    /// committee, then general, then exempt. Leader-only persons have none.
    pub fn headcount_tier(&self) -> Option<Tier> {
        [Tier::Committee, Tier::General, Tier::Exempt]
            .into_iter()
            .find(|t| self.holds(*t))
    }

    /// `None` means never assigned to this tier.
    pub fn last_assigned(&self, tier: Tier) -> Option<NaiveDate> {
        self.last_assigned.get(&tier).copied()
    }

    pub fn history(&self) -> &[AssignmentRecord] {
        &self.history
    }

    /// Commit bookkeeping. Only the engine calls this.
    /// `last_assigned` only ever moves forward.
    pub(crate) fn record_assignment(&mut self, date: NaiveDate, tier: Tier) {
        self.history.push(AssignmentRecord { date, tier });
        let latest = self.last_assigned.entry(tier).or_insert(date);
        if date > *latest {
            *latest = date;
        }
    }
}

/// Persons keyed by id, plus the capacity table of the current solve.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonBank {
    persons: BTreeMap<PersonId, Person>,
    capacity: Option<CapacityTable>,
}

impl PersonBank {
    pub fn new(persons: Vec<Person>) -> RosterResult<Self> {
        let mut map = BTreeMap::new();
        for p in persons {
            let id = p.id();
            if map.insert(id, p).is_some() {
                return Err(RosterError::DuplicatePerson { person_id: id });
            }
        }
        Ok(Self { persons: map, capacity: None })
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, id: PersonId) -> RosterResult<&Person> {
        self.persons.get(&id).ok_or(RosterError::UnknownPerson { person_id: id })
    }

    pub(crate) fn get_mut(&mut self, id: PersonId) -> RosterResult<&mut Person> {
        self.persons.get_mut(&id).ok_or(RosterError::UnknownPerson { person_id: id })
    }

    /// Persons in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn capacity(&self) -> Option<&CapacityTable> {
        self.capacity.as_ref()
    }

    /// Attached by the engine once per solve, read-only afterwards.
    pub fn attach_capacity(&mut self, table: CapacityTable) {
        if self.capacity.is_some() {
            log::debug!("Replacing capacity table from an earlier solve");
        }
        self.capacity = Some(table);
    }
}
