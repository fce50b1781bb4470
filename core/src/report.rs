//! Report sinks: render a finished solve for coordinators.

use crate::{
    capacity::Stint,
    engine::Solution,
    error::RosterResult,
    tier::Tier,
    types::PersonId,
    workdate::WorkDate,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

pub trait ReportSink {
    fn render(&mut self, solution: &Solution) -> RosterResult<()>;
}

/// Stints one person ended up with across the whole period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub person_id: PersonId,
    pub name: String,
    pub tiers: Vec<Tier>,
    pub stints: usize,
    pub by_tier: BTreeMap<Tier, usize>,
    pub dates: Vec<NaiveDate>,
    /// Took more stints than their primary tier's max stint.
    pub overbooked: bool,
}

/// One summary per person in the bank, in id order, including people
/// who were never assigned.
pub fn person_summaries(solution: &Solution) -> Vec<PersonSummary> {
    let mut summaries: BTreeMap<PersonId, PersonSummary> = solution
        .bank
        .iter()
        .map(|p| {
            let summary = PersonSummary {
                person_id: p.id(),
                name: p.name.clone(),
                tiers: p.tiers().to_vec(),
                stints: 0,
                by_tier: BTreeMap::new(),
                dates: Vec::new(),
                overbooked: false,
            };
            (p.id(), summary)
        })
        .collect();

    for day in all_dates(solution) {
        for tier in Tier::ASSIGNABLE {
            for id in day.assignees(tier) {
                if let Some(s) = summaries.get_mut(id) {
                    s.stints += 1;
                    *s.by_tier.entry(tier).or_insert(0) += 1;
                    s.dates.push(day.date);
                }
            }
        }
    }

    for s in summaries.values_mut() {
        s.dates.sort_unstable();
        let max = s
            .tiers
            .first()
            .and_then(|t| solution.capacity.get(*t))
            .map(|stint| stint.max_stint);
        s.overbooked = matches!(max, Some(max) if s.stints > max);
    }
    summaries.into_values().collect()
}

fn all_dates(solution: &Solution) -> impl Iterator<Item = &WorkDate> {
    solution.filled.iter().chain(solution.still_short.iter())
}

fn display_name(solution: &Solution, id: PersonId) -> String {
    solution
        .bank
        .get(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|_| format!("#{id}"))
}

/// Human-readable summary for any writer.
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_stint(&mut self, tier: Tier, stint: &Stint) -> RosterResult<()> {
        writeln!(
            self.out,
            "  {:<10} max_stint {:>2}  extra {:>3}  unlucky {:>3}",
            tier.name(),
            stint.max_stint,
            stint.available_extra,
            stint.unlucky
        )?;
        Ok(())
    }

    fn write_day(&mut self, solution: &Solution, day: &WorkDate) -> RosterResult<()> {
        let mut parts = Vec::new();
        for tier in Tier::ASSIGNABLE {
            if day.required.get(tier) == 0 {
                continue;
            }
            let names: Vec<String> = day
                .assignees(tier)
                .iter()
                .map(|id| display_name(solution, *id))
                .collect();
            parts.push(format!(
                "{}: {} ({}/{})",
                tier.name(),
                if names.is_empty() { "-".to_string() } else { names.join(", ") },
                day.assignees(tier).len(),
                day.required.get(tier)
            ));
        }
        let off = if day.school_off { "  [school off]" } else { "" };
        writeln!(self.out, "{}  {}{off}", day.date, parts.join(" | "))?;
        Ok(())
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn render(&mut self, solution: &Solution) -> RosterResult<()> {
        writeln!(self.out, "=== ROSTER SUMMARY ===")?;
        writeln!(self.out, "Run:        {}", solution.run_id)?;
        writeln!(self.out, "Seed:       {}", solution.seed)?;
        writeln!(self.out, "Duty:       {}", solution.duty)?;
        writeln!(self.out, "Persons:    {}", solution.bank.len())?;
        writeln!(self.out, "Capacity:")?;
        for tier in Tier::ASSIGNABLE {
            if let Some(stint) = solution.capacity.get(tier) {
                self.write_stint(tier, stint)?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "=== FILLED ({}) ===", solution.filled.len())?;
        for day in &solution.filled {
            self.write_day(solution, day)?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "=== STILL SHORT ({}) ===", solution.still_short.len())?;
        for day in &solution.still_short {
            writeln!(
                self.out,
                "{}  missing leader {}, committee {}, general {}",
                day.date,
                day.open_slots(Tier::Leader),
                day.open_slots(Tier::Committee),
                day.open_slots(Tier::General)
            )?;
        }

        let summaries = person_summaries(solution);
        writeln!(self.out)?;
        writeln!(self.out, "=== PER PERSON ===")?;
        for s in &summaries {
            let dates: Vec<String> = s.dates.iter().map(|d| d.to_string()).collect();
            writeln!(
                self.out,
                "{:>5}  {:<22} {:<10} {:>2} stints{}  [{}]",
                s.person_id,
                s.name,
                s.tiers.first().map(|t| t.name()).unwrap_or(""),
                s.stints,
                if s.overbooked { " (overbooked)" } else { "" },
                dates.join(", ")
            )?;
        }
        let overbooked = summaries.iter().filter(|s| s.overbooked).count();
        writeln!(self.out)?;
        writeln!(self.out, "{overbooked} people are overbooked")?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    #[serde(flatten)]
    solution: &'a Solution,
    persons: Vec<PersonSummary>,
    overbooked: usize,
}

/// Pretty-printed JSON of the solution plus per-person summaries.
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn render(&mut self, solution: &Solution) -> RosterResult<()> {
        let persons = person_summaries(solution);
        let overbooked = persons.iter().filter(|s| s.overbooked).count();
        let view = ReportView { solution, persons, overbooked };
        serde_json::to_writer_pretty(&mut self.out, &view)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
