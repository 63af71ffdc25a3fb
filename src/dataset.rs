use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

pub const EXPECTED_HEADERS: [&str; 7] = [
    "Year",
    "Winner",
    "Runner-up",
    "Score",
    "Venue",
    "Location",
    "Attendance",
];

#[derive(Debug, Clone, Deserialize)]
pub struct FinalRecord {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Winner")]
    pub winner: String,
    #[serde(rename = "Runner-up")]
    pub runner_up: String,
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Attendance")]
    pub attendance: u32,
}

pub fn load_finals(path: &Path) -> Result<Vec<FinalRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read finals csv {}", path.display()))?;
    parse_finals_csv(&raw).with_context(|| format!("parse finals csv {}", path.display()))
}

pub fn parse_finals_csv(raw: &str) -> Result<Vec<FinalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    check_headers(reader.headers().context("read csv header row")?)?;

    let mut out = Vec::new();
    for (idx, row) in reader.deserialize::<FinalRecord>().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let mut record = row.with_context(|| format!("parse csv line {}", idx + 2))?;
        normalize_team_names(&mut record);
        out.push(record);
    }
    if out.is_empty() {
        return Err(anyhow!("csv has a header but no data rows"));
    }
    reject_duplicate_years(&out)?;
    Ok(out)
}

pub fn sorted_years(records: &[FinalRecord]) -> Vec<u16> {
    let mut years: Vec<u16> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years
}

fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let found: HashSet<&str> = headers.iter().collect();
    for expected in EXPECTED_HEADERS {
        if !found.contains(expected) {
            return Err(anyhow!("csv header is missing column {expected:?}"));
        }
    }
    for column in headers.iter() {
        if !EXPECTED_HEADERS.contains(&column) {
            return Err(anyhow!("csv header has unexpected column {column:?}"));
        }
    }
    Ok(())
}

// The dataset predates reunification for three titles; the dashboard reports
// all of them under the current country name.
fn normalize_team_names(record: &mut FinalRecord) {
    normalize_country(&mut record.winner);
    normalize_country(&mut record.runner_up);
}

fn normalize_country(name: &mut String) {
    if name == "West Germany" {
        *name = "Germany".to_string();
    }
}

fn reject_duplicate_years(records: &[FinalRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.year) {
            return Err(anyhow!("duplicate year {} in finals csv", record.year));
        }
    }
    Ok(())
}
