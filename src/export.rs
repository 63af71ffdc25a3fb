use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::CountryWins;
use crate::context::DashboardContext;
use crate::dataset::FinalRecord;

#[derive(Debug)]
pub struct ExportReport {
    pub finals: usize,
    pub countries: usize,
}

/// Timestamped workbook name in the current directory, used when the caller
/// does not supply a path.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "wc_history_{}.xlsx",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Write the loaded finals and the aggregated win counts to an xlsx workbook
/// with one sheet per table.
pub fn export_dashboard(path: &Path, ctx: &DashboardContext) -> Result<ExportReport> {
    let mut finals_rows = vec![vec![
        "Year".to_string(),
        "Winner".to_string(),
        "Runner-up".to_string(),
        "Score".to_string(),
        "Venue".to_string(),
        "Location".to_string(),
        "Attendance".to_string(),
    ]];
    for record in &ctx.finals {
        finals_rows.push(final_row(record));
    }

    let mut wins_rows = vec![vec![
        "Country".to_string(),
        "Wins".to_string(),
        "Years won".to_string(),
    ]];
    for entry in ctx.wins.ordered_winners() {
        wins_rows.push(win_row(entry));
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Finals")?;
        write_rows(sheet, &finals_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("WinCounts")?;
        write_rows(sheet, &wins_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        finals: finals_rows.len().saturating_sub(1),
        countries: wins_rows.len().saturating_sub(1),
    })
}

fn final_row(record: &FinalRecord) -> Vec<String> {
    vec![
        record.year.to_string(),
        record.winner.clone(),
        record.runner_up.clone(),
        record.score.clone(),
        record.venue.clone(),
        record.location.clone(),
        record.attendance.to_string(),
    ]
}

fn win_row(entry: &CountryWins) -> Vec<String> {
    let years = entry
        .years
        .iter()
        .map(|year| year.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    vec![entry.country.clone(), entry.wins.to_string(), years]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
