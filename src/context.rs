use std::path::Path;

use anyhow::Result;

use crate::aggregate::WinCounts;
use crate::dataset::{self, FinalRecord};
use crate::map_figure::MapFigure;

/// Everything computed at startup, immutable for the life of the process.
/// Handlers and the layout only ever borrow this.
pub struct DashboardContext {
    pub finals: Vec<FinalRecord>,
    pub wins: WinCounts,
    pub map: MapFigure,
    pub years: Vec<u16>,
}

impl DashboardContext {
    pub fn load(path: &Path) -> Result<Self> {
        let finals = dataset::load_finals(path)?;
        Ok(Self::from_records(finals))
    }

    pub fn from_records(finals: Vec<FinalRecord>) -> Self {
        let wins = WinCounts::from_records(&finals);
        let map = MapFigure::build(&wins);
        let years = dataset::sorted_years(&finals);
        Self {
            finals,
            wins,
            map,
            years,
        }
    }

    pub fn final_for_year(&self, year: u16) -> Option<&FinalRecord> {
        self.finals.iter().find(|r| r.year == year)
    }
}
