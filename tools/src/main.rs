//! roster-runner: headless duty-roster solver.
//!
//! Usage:
//!   roster-runner --data-dir ./data --seed 12345
//!   roster-runner --roster persons.csv --dates dates.json --duty safety
//!   roster-runner --synthetic 40 --json out.json

use anyhow::Result;
use roster_core::{
    config::RosterConfig,
    engine::{Matcher, Solution},
    error::RosterError,
    person::PersonBank,
    report::{JsonReport, ReportSink, TextReport},
    rng::{RngBank, RngStream},
    roster_generator::SyntheticRoster,
    source::{roster_source_for, CalendarSource, JsonCalendarSource},
    tier::DutyType,
};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    // No --seed means fresh entropy; the seed is printed so the run can be replayed.
    let seed = parse_arg(&args, "--seed", rand::random::<u64>());
    let synthetic = parse_arg(&args, "--synthetic", 0usize);
    let roster_path = flag_value(&args, "--roster")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{data_dir}/persons.json"));
    let dates_path = flag_value(&args, "--dates")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{data_dir}/dates.json"));
    let json_out = flag_value(&args, "--json");

    let mut config = RosterConfig::load(data_dir)?;
    if let Some(duty) = flag_value(&args, "--duty") {
        let duty: DutyType = duty.parse().map_err(anyhow::Error::msg)?;
        config = config.with_duty(duty)?;
    }

    let run_id = format!("roster-{}", uuid::Uuid::new_v4());

    println!("roster-runner");
    println!("  run_id:    {run_id}");
    println!("  seed:      {seed}");
    println!("  duty:      {}", config.requirements.duty_type());
    println!("  data_dir:  {data_dir}");
    println!("  dates:     {dates_path}");
    if synthetic > 0 {
        println!("  roster:    {synthetic} synthetic persons");
    } else {
        println!("  roster:    {roster_path}");
    }
    println!();

    let dates = JsonCalendarSource::new(&dates_path).load_dates(&config.requirements)?;
    let bank = load_bank(seed, synthetic, &roster_path)?;

    let mut matcher = Matcher::from_config(run_id, seed, &config);
    let solution = match matcher.solve(dates, bank) {
        Ok(solution) => solution,
        Err(RosterError::AlreadyFullyAssigned { dates }) => {
            println!("All {dates} dates already have every slot filled; nothing to do.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    render(&solution, json_out)?;
    Ok(())
}

fn load_bank(seed: u64, synthetic: usize, roster_path: &str) -> Result<PersonBank> {
    if synthetic > 0 {
        let mut rng = RngBank::new(seed).for_stream(RngStream::Roster);
        return Ok(SyntheticRoster::new(synthetic).build(&mut rng)?);
    }
    Ok(roster_source_for(roster_path).load_persons()?)
}

fn render(solution: &Solution, json_out: Option<&str>) -> Result<()> {
    let stdout = io::stdout();
    TextReport::new(stdout.lock()).render(solution)?;

    if let Some(path) = json_out {
        let file = File::create(path)
            .map_err(|e| anyhow::anyhow!("Cannot create {path}: {e}"))?;
        JsonReport::new(BufWriter::new(file)).render(solution)?;
        log::info!("JSON report written to {path}");
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
