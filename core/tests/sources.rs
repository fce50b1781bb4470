//! Roster and calendar source tests.

use chrono::NaiveDate;
use roster_core::{
    error::RosterError,
    requirements::{IntervalDays, Requirements},
    source::{
        roster_source_for, CalendarSource, CsvRosterSource, JsonCalendarSource, JsonRosterSource,
        RosterSource,
    },
    tier::{DutyType, Tier},
    workdate::TierCounts,
};
use std::fs;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const PERSONS_JSON: &str = r#"{
  "persons": [
    { "id": 1, "name": "Sato Yui", "email": "yui@example.org", "tiers": ["committee", "leader"],
      "last_assigned": { "leader": "2024-03-23" } },
    { "id": 2, "name": "  Tanaka Kenji ", "tiers": ["general"] },
    { "id": 3, "name": "Goto Rin", "tiers": ["exempt"] }
  ]
}"#;

#[test]
fn json_roster_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persons.json");
    fs::write(&path, PERSONS_JSON).unwrap();

    let bank = JsonRosterSource::new(&path).load_persons().unwrap();
    assert_eq!(bank.len(), 3);

    let sato = bank.get(1).unwrap();
    assert_eq!(sato.tiers(), &[Tier::Committee, Tier::Leader]);
    assert_eq!(sato.primary_tier(), Tier::Committee);
    assert_eq!(sato.email, "yui@example.org");
    assert_eq!(sato.last_assigned(Tier::Leader), Some(ymd(2024, 3, 23)));
    assert_eq!(sato.last_assigned(Tier::Committee), None);

    assert_eq!(bank.get(2).unwrap().name, "Tanaka Kenji");
    assert!(bank.get(3).unwrap().is_exempt());
}

#[test]
fn blank_name_is_rejected() {
    let json = r#"{ "persons": [ { "id": 4, "name": "   ", "tiers": ["general"] } ] }"#;
    let err = JsonRosterSource::parse(json).unwrap_err();
    assert!(matches!(err, RosterError::MissingName { .. }), "got {err:?}");
}

#[test]
fn record_without_tiers_is_rejected() {
    let json = r#"{ "persons": [ { "id": 4, "name": "Ito Haruka" } ] }"#;
    let err = JsonRosterSource::parse(json).unwrap_err();
    assert!(matches!(err, RosterError::MissingResponsibility { person_id: 4 }));
}

#[test]
fn malformed_last_assigned_date_is_rejected() {
    let json = r#"{ "persons": [
        { "id": 4, "name": "Ito Haruka", "tiers": ["general"], "last_assigned": { "general": "04/01/2024" } }
    ] }"#;
    let err = JsonRosterSource::parse(json).unwrap_err();
    assert!(matches!(err, RosterError::InvalidDate { .. }), "got {err:?}");
}

#[test]
fn repeated_row_is_dropped_but_conflict_fails() {
    let repeated = r#"{ "persons": [
        { "id": 1, "name": "Sato Yui", "tiers": ["general"] },
        { "id": 1, "name": "Sato Yui", "tiers": ["general"] },
        { "id": 2, "name": "Mori Takumi", "tiers": ["general"] }
    ] }"#;
    assert_eq!(JsonRosterSource::parse(repeated).unwrap().len(), 2);

    let conflicting = r#"{ "persons": [
        { "id": 1, "name": "Sato Yui", "tiers": ["general"] },
        { "id": 1, "name": "Sato Yui", "tiers": ["committee"] }
    ] }"#;
    let err = JsonRosterSource::parse(conflicting).unwrap_err();
    assert!(matches!(err, RosterError::DuplicatePerson { person_id: 1 }));
}

const PERSONS_CSV: &str = "\
id,name,email,phone,tiers,last_committee
1,Sato Yui,yui@example.org,000-0000-0001,committee|leader,2024-04-10
2,Mori Takumi,,,general,
3,Abe Sakura,,, General ,
";

#[test]
fn csv_roster_splits_tiers_and_reads_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persons.csv");
    fs::write(&path, PERSONS_CSV).unwrap();

    let bank = CsvRosterSource::new(&path).load_persons().unwrap();
    assert_eq!(bank.len(), 3);
    let sato = bank.get(1).unwrap();
    assert_eq!(sato.tiers(), &[Tier::Committee, Tier::Leader]);
    assert_eq!(sato.phone, "000-0000-0001");
    assert_eq!(sato.last_assigned(Tier::Committee), Some(ymd(2024, 4, 10)));
    assert_eq!(bank.get(3).unwrap().tiers(), &[Tier::General]);
}

#[test]
fn csv_unknown_tier_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persons.csv");
    fs::write(&path, "id,name,email,phone,tiers\n1,Sato Yui,,,captain\n").unwrap();

    assert!(CsvRosterSource::new(&path).load_persons().is_err());
}

#[test]
fn roster_source_is_picked_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("persons.CSV");
    let json_path = dir.path().join("persons.json");
    fs::write(&csv_path, PERSONS_CSV).unwrap();
    fs::write(&json_path, PERSONS_JSON).unwrap();

    assert_eq!(roster_source_for(&csv_path).load_persons().unwrap().len(), 3);
    assert_eq!(roster_source_for(&json_path).load_persons().unwrap().len(), 3);
}

#[test]
fn missing_roster_file_names_the_path() {
    let err = JsonRosterSource::new("/nonexistent/persons.json").load_persons().unwrap_err();
    assert!(err.to_string().contains("/nonexistent/persons.json"), "got {err}");
}

const DATES_JSON: &str = r#"{
  "dates": [
    { "date": "2024-04-13" },
    { "date": "2024-04-20", "req_num_general": 3, "school_off": true, "exempt_tags": ["G1", "G2"] },
    { "date": "2024-04-27", "req_num_leader": 1, "req_num_committee": 1, "req_num_general": 1,
      "assignees_committee": [5] }
  ]
}"#;

#[test]
fn calendar_fills_missing_counts_from_requirements() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dates.json");
    fs::write(&path, DATES_JSON).unwrap();

    let reqs = Requirements::new(
        DutyType::Safety,
        IntervalDays::default(),
        TierCounts::new(1, 0, 2),
    )
    .unwrap();
    let dates = JsonCalendarSource::new(&path).load_dates(&reqs).unwrap();
    assert_eq!(dates.len(), 3);

    assert_eq!(dates[0].date, ymd(2024, 4, 13));
    assert_eq!(dates[0].required, TierCounts::new(1, 0, 2));
    assert!(!dates[0].school_off);

    assert_eq!(dates[1].required, TierCounts::new(1, 0, 3));
    assert!(dates[1].school_off);
    assert_eq!(dates[1].exempt_tags, vec!["G1", "G2"]);

    assert_eq!(dates[2].assignees(Tier::Committee), &[5]);
    assert!(dates[2].is_tier_full(Tier::Committee));
}

#[test]
fn calendar_rejects_malformed_dates() {
    let json = r#"{ "dates": [ { "date": "2024-13-01" } ] }"#;
    let reqs = Requirements::with_defaults(DutyType::Library);
    let err = JsonCalendarSource::parse(json, &reqs).unwrap_err();
    assert!(matches!(err, RosterError::InvalidDate { .. }), "got {err:?}");
}

#[test]
fn calendar_rejects_prefill_beyond_requirement() {
    let json = r#"{ "dates": [ { "date": "2024-04-13", "req_num_leader": 1, "assignees_leader": [1, 2] } ] }"#;
    let reqs = Requirements::with_defaults(DutyType::Library);
    assert!(JsonCalendarSource::parse(json, &reqs).is_err());
}
