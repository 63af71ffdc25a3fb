use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use wc_history_terminal::aggregate::WinCounts;
use wc_history_terminal::context::DashboardContext;
use wc_history_terminal::dataset::parse_finals_csv;
use wc_history_terminal::handlers::{country_wins, winner_list, year_details};
use wc_history_terminal::map_figure::MapFigure;

fn bench_finals_parse(c: &mut Criterion) {
    c.bench_function("finals_parse", |b| {
        b.iter(|| {
            let records = parse_finals_csv(black_box(FINALS_CSV)).unwrap();
            black_box(records.len());
        })
    });
}

fn bench_win_counts(c: &mut Criterion) {
    let records = parse_finals_csv(FINALS_CSV).unwrap();
    c.bench_function("win_counts", |b| {
        b.iter(|| {
            let wins = WinCounts::from_records(black_box(&records));
            black_box(wins.distinct_winners());
        })
    });
}

fn bench_map_build(c: &mut Criterion) {
    let records = parse_finals_csv(FINALS_CSV).unwrap();
    let wins = WinCounts::from_records(&records);
    c.bench_function("map_build", |b| {
        b.iter(|| {
            let figure = MapFigure::build(black_box(&wins));
            black_box(figure.points.len());
        })
    });
}

fn bench_country_handler(c: &mut Criterion) {
    let records = parse_finals_csv(FINALS_CSV).unwrap();
    let ctx = DashboardContext::from_records(records);
    c.bench_function("country_handler", |b| {
        b.iter(|| {
            let fragment = country_wins(black_box(&ctx), black_box(Some("Brazil")));
            black_box(fragment.lines.len());
        })
    });
}

fn bench_year_handler(c: &mut Criterion) {
    let records = parse_finals_csv(FINALS_CSV).unwrap();
    let ctx = DashboardContext::from_records(records);
    c.bench_function("year_handler", |b| {
        b.iter(|| {
            let fragment = year_details(black_box(&ctx), black_box(Some(1970)));
            black_box(fragment.lines.len());
        })
    });
}

fn bench_winner_list(c: &mut Criterion) {
    let records = parse_finals_csv(FINALS_CSV).unwrap();
    let ctx = DashboardContext::from_records(records);
    c.bench_function("winner_list", |b| {
        b.iter(|| {
            let fragment = winner_list(black_box(&ctx));
            black_box(fragment.lines.len());
        })
    });
}

criterion_group!(
    perf,
    bench_finals_parse,
    bench_win_counts,
    bench_map_build,
    bench_country_handler,
    bench_year_handler,
    bench_winner_list
);
criterion_main!(perf);

static FINALS_CSV: &str = include_str!("../data/world_cup_finals.csv");
