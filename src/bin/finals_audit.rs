use std::path::PathBuf;

use anyhow::{Context, Result};

use wc_history_terminal::context::DashboardContext;
use wc_history_terminal::export;

const DEFAULT_CSV_PATH: &str = "data/world_cup_finals.csv";

fn main() -> Result<()> {
    let csv_path = parse_csv_path_arg().unwrap_or_else(default_csv_path_from_env);

    let ctx = DashboardContext::load(&csv_path)
        .with_context(|| format!("load finals dataset from {}", csv_path.display()))?;

    println!("Finals audit complete");
    println!("CSV: {}", csv_path.display());
    println!("Records: {}", ctx.finals.len());
    if let (Some(first), Some(last)) = (ctx.years.first(), ctx.years.last()) {
        println!("Years: {first}..{last}");
    }
    println!("Winning countries: {}", ctx.wins.distinct_winners());

    for entry in ctx.wins.ordered_winners() {
        let years = entry
            .years
            .iter()
            .map(|year| year.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<16} wins={} years=[{years}]", entry.country, entry.wins);
    }

    if !ctx.map.missing.is_empty() {
        println!("Unmapped countries: {}", ctx.map.missing.len());
        for country in &ctx.map.missing {
            println!("  - {country}");
        }
    }

    if let Some(xlsx_path) = parse_xlsx_path_arg() {
        let report = export::export_dashboard(&xlsx_path, &ctx)?;
        println!(
            "Exported {} finals and {} countries to {}",
            report.finals,
            report.countries,
            xlsx_path.display()
        );
    }

    Ok(())
}

fn parse_csv_path_arg() -> Option<PathBuf> {
    parse_path_arg("--csv")
}

fn parse_xlsx_path_arg() -> Option<PathBuf> {
    parse_path_arg("--xlsx")
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let prefixed = format!("{flag}=");
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefixed) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

fn default_csv_path_from_env() -> PathBuf {
    match std::env::var("WC_FINALS_CSV") {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => PathBuf::from(DEFAULT_CSV_PATH),
    }
}
