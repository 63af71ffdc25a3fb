use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::aggregate::{WinCounts, plot_location};

pub const MAP_TITLE: &str = "FIFA World Cup Wins by Country";

// Country centroids for every finalist nation plus host countries, keyed by
// the map-recognized name (so "United Kingdom", not "England").
const COUNTRY_CENTROIDS: [(&str, f64, f64); 22] = [
    ("Argentina", -38.4161, -63.6167),
    ("Brazil", -14.2350, -51.9253),
    ("Chile", -35.6751, -71.5430),
    ("Croatia", 45.1000, 15.2000),
    ("Czechoslovakia", 49.8175, 15.4730),
    ("France", 46.2276, 2.2137),
    ("Germany", 51.1657, 10.4515),
    ("Hungary", 47.1625, 19.5033),
    ("Italy", 41.8719, 12.5674),
    ("Japan", 36.2048, 138.2529),
    ("Mexico", 23.6345, -102.5528),
    ("Netherlands", 52.1326, 5.2913),
    ("Qatar", 25.3548, 51.1839),
    ("Russia", 61.5240, 105.3188),
    ("South Africa", -30.5595, 22.9375),
    ("South Korea", 35.9078, 127.7669),
    ("Spain", 40.4637, -3.7492),
    ("Sweden", 60.1282, 18.6435),
    ("Switzerland", 46.8182, 8.2275),
    ("United Kingdom", 55.3781, -3.4360),
    ("United States", 37.0902, -95.7129),
    ("Uruguay", -32.5228, -55.7658),
];

static CENTROID_INDEX: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    COUNTRY_CENTROIDS
        .iter()
        .map(|&(name, lat, lon)| (name, (lat, lon)))
        .collect()
});

// Plasma ramp anchors, low to high.
const PLASMA_ANCHORS: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

#[derive(Debug, Clone)]
pub struct MapPoint {
    pub country: String,
    pub plot_location: String,
    pub wins: usize,
    pub lat: f64,
    pub lon: f64,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone)]
pub struct MapFigure {
    pub title: String,
    pub points: Vec<MapPoint>,
    pub min_wins: usize,
    pub max_wins: usize,
    pub missing: Vec<String>,
}

impl MapFigure {
    pub fn build(wins: &WinCounts) -> Self {
        let winners = wins.ordered_winners();
        let min_wins = winners.iter().map(|c| c.wins).min().unwrap_or(0);
        let max_wins = wins.max_wins();

        let mut points = Vec::with_capacity(winners.len());
        let mut missing = Vec::new();
        for entry in winners {
            let location = plot_location(&entry.country).to_string();
            let Some((lat, lon)) = centroid(&location) else {
                missing.push(entry.country.clone());
                continue;
            };
            points.push(MapPoint {
                country: entry.country.clone(),
                plot_location: location,
                wins: entry.wins,
                lat,
                lon,
                color: scale_color(entry.wins, min_wins, max_wins),
            });
        }

        Self {
            title: MAP_TITLE.to_string(),
            points,
            min_wins,
            max_wins,
            missing,
        }
    }

    pub fn point_for(&self, country: &str) -> Option<&MapPoint> {
        self.points.iter().find(|p| p.country == country)
    }
}

pub fn centroid(location: &str) -> Option<(f64, f64)> {
    CENTROID_INDEX.get(location).copied()
}

pub fn scale_color(wins: usize, min_wins: usize, max_wins: usize) -> (u8, u8, u8) {
    // A flat field (all winners tied) takes the top of the ramp.
    if max_wins <= min_wins {
        return plasma_color(1.0);
    }
    let t = (wins - min_wins) as f64 / (max_wins - min_wins) as f64;
    plasma_color(t)
}

pub fn plasma_color(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let steps = PLASMA_ANCHORS.len() - 1;
    let scaled = t * steps as f64;
    let idx = (scaled.floor() as usize).min(steps - 1);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = PLASMA_ANCHORS[idx];
    let (r1, g1, b1) = PLASMA_ANCHORS[idx + 1];
    (
        lerp_channel(r0, r1, frac),
        lerp_channel(g0, g1, frac),
        lerp_channel(b0, b1, frac),
    )
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}
