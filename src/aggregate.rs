use std::collections::BTreeMap;

use crate::dataset::FinalRecord;

// England is the one winner whose historical name is not what world-map
// geocoding knows; the override applies to map coordinates only.
const PLOT_LOCATION_OVERRIDES: [(&str, &str); 1] = [("England", "United Kingdom")];

#[derive(Debug, Clone)]
pub struct CountryWins {
    pub country: String,
    pub wins: usize,
    pub years: Vec<u16>,
}

#[derive(Debug, Clone)]
pub struct WinCounts {
    by_country: BTreeMap<String, CountryWins>,
    ordered: Vec<String>,
}

impl WinCounts {
    pub fn from_records(records: &[FinalRecord]) -> Self {
        let mut by_country: BTreeMap<String, CountryWins> = BTreeMap::new();
        for record in records {
            let entry = by_country
                .entry(record.winner.clone())
                .or_insert_with(|| CountryWins {
                    country: record.winner.clone(),
                    wins: 0,
                    years: Vec::new(),
                });
            entry.wins += 1;
            entry.years.push(record.year);
        }
        for entry in by_country.values_mut() {
            entry.years.sort_unstable();
        }

        let mut ordered: Vec<String> = by_country.keys().cloned().collect();
        ordered.sort_by(|a, b| {
            let wins_a = by_country[a].wins;
            let wins_b = by_country[b].wins;
            wins_b.cmp(&wins_a).then_with(|| a.cmp(b))
        });

        Self { by_country, ordered }
    }

    pub fn wins_for(&self, country: &str) -> Option<&CountryWins> {
        self.by_country.get(country)
    }

    /// Winners in display order: most wins first, alphabetical within ties.
    pub fn ordered_winners(&self) -> Vec<&CountryWins> {
        self.ordered
            .iter()
            .filter_map(|name| self.by_country.get(name))
            .collect()
    }

    pub fn distinct_winners(&self) -> usize {
        self.by_country.len()
    }

    pub fn max_wins(&self) -> usize {
        self.by_country.values().map(|c| c.wins).max().unwrap_or(0)
    }
}

pub fn plot_location(country: &str) -> &str {
    for (from, to) in PLOT_LOCATION_OVERRIDES {
        if country == from {
            return to;
        }
    }
    country
}

#[cfg(test)]
mod tests {
    use super::{WinCounts, plot_location};
    use crate::dataset::FinalRecord;

    fn record(year: u16, winner: &str) -> FinalRecord {
        FinalRecord {
            year,
            winner: winner.to_string(),
            runner_up: "Other".to_string(),
            score: "1\u{2013}0".to_string(),
            venue: "Stadium".to_string(),
            location: "City".to_string(),
            attendance: 50_000,
        }
    }

    #[test]
    fn counts_and_years_per_country() {
        let records = vec![
            record(1970, "Brazil"),
            record(1958, "Brazil"),
            record(1966, "England"),
            record(1962, "Brazil"),
        ];
        let wins = WinCounts::from_records(&records);

        let brazil = wins.wins_for("Brazil").expect("brazil aggregated");
        assert_eq!(brazil.wins, 3);
        assert_eq!(brazil.years, vec![1958, 1962, 1970]);

        let england = wins.wins_for("England").expect("england aggregated");
        assert_eq!(england.wins, 1);
        assert_eq!(wins.distinct_winners(), 2);
        assert_eq!(wins.max_wins(), 3);
    }

    #[test]
    fn every_winner_has_an_entry() {
        let records = vec![
            record(2010, "Spain"),
            record(1998, "France"),
            record(2018, "France"),
        ];
        let wins = WinCounts::from_records(&records);
        for r in &records {
            assert!(wins.wins_for(&r.winner).is_some());
        }
    }

    #[test]
    fn ordering_breaks_ties_alphabetically() {
        let records = vec![
            record(1934, "Italy"),
            record(1954, "Germany"),
            record(1938, "Italy"),
            record(1974, "Germany"),
            record(1958, "Brazil"),
            record(1962, "Brazil"),
            record(1970, "Brazil"),
        ];
        let wins = WinCounts::from_records(&records);
        let order: Vec<&str> = wins
            .ordered_winners()
            .iter()
            .map(|c| c.country.as_str())
            .collect();
        assert_eq!(order, vec!["Brazil", "Germany", "Italy"]);
    }

    #[test]
    fn plot_location_overrides_england_only() {
        assert_eq!(plot_location("England"), "United Kingdom");
        assert_eq!(plot_location("Brazil"), "Brazil");
        assert_eq!(plot_location("Germany"), "Germany");
        assert_eq!(plot_location("United Kingdom"), "United Kingdom");
    }
}
