//! Synthetic rosters for dry runs.
//!
//! Tier assignment is a cumulative-share roll per person, so the mix is
//! approximate for small counts but fully reproducible from the seed.

use crate::{
    error::RosterResult,
    name_generator::NameGenerator,
    person::{Person, PersonBank},
    rng::SolveRng,
    tier::Tier,
    types::PersonId,
};

pub struct SyntheticRoster {
    count: usize,
    first_id: PersonId,
    leader_share: f64,
    committee_share: f64,
    exempt_share: f64,
}

impl SyntheticRoster {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            first_id: 1,
            leader_share: 0.10,
            committee_share: 0.30,
            exempt_share: 0.05,
        }
    }

    /// Shares are fractions of the roster; whatever remains is general.
    /// Leader-share persons are committee members who can also lead.
    pub fn with_mix(mut self, leader_share: f64, committee_share: f64, exempt_share: f64) -> Self {
        self.leader_share = leader_share.max(0.0);
        self.committee_share = committee_share.max(0.0);
        self.exempt_share = exempt_share.max(0.0);
        self
    }

    pub fn with_first_id(mut self, first_id: PersonId) -> Self {
        self.first_id = first_id;
        self
    }

    pub fn build(&self, rng: &mut SolveRng) -> RosterResult<PersonBank> {
        let total = self.leader_share + self.committee_share + self.exempt_share;
        if total > 1.0 {
            return Err(anyhow::anyhow!(
                "tier shares add up to {total:.2}, above 1.0"
            )
            .into());
        }

        let mut persons = Vec::with_capacity(self.count);
        for offset in 0..self.count {
            let id = self.first_id + offset as PersonId;
            let name = NameGenerator::generate_full_name(rng);
            let email = NameGenerator::placeholder_email(id, &name);
            let phone = NameGenerator::placeholder_phone(id);
            let person = Person::new(id, name, self.pick_tiers(rng))?.with_contact(email, phone);
            persons.push(person);
        }

        let bank = PersonBank::new(persons)?;
        log::info!("Generated synthetic roster of {} persons", bank.len());
        Ok(bank)
    }

    fn pick_tiers(&self, rng: &mut SolveRng) -> Vec<Tier> {
        let roll = rng.next_f64();
        let mut cumulative = self.leader_share;
        if roll < cumulative {
            return vec![Tier::Committee, Tier::Leader];
        }
        cumulative += self.committee_share;
        if roll < cumulative {
            return vec![Tier::Committee];
        }
        cumulative += self.exempt_share;
        if roll < cumulative {
            return vec![Tier::Exempt];
        }
        vec![Tier::General]
    }
}

