use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use wc_history_terminal::context::DashboardContext;
use wc_history_terminal::dataset::parse_finals_csv;
use wc_history_terminal::handlers::{COUNTRY_PROMPT, YEAR_PROMPT};
use wc_history_terminal::state::{AppState, CardFocus, ExportState};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_context() -> DashboardContext {
    let records = parse_finals_csv(&read_fixture("finals_sample.csv")).expect("fixture parses");
    DashboardContext::from_records(records)
}

#[test]
fn new_state_seeds_every_pane() {
    let ctx = fixture_context();
    let state = AppState::new(&ctx);

    assert_eq!(state.outputs.country_wins.lines[0].text, COUNTRY_PROMPT);
    assert_eq!(state.outputs.year_detail.lines[0].text, YEAR_PROMPT);
    assert_eq!(state.outputs.winner_list.lines.len(), 4);
    assert_eq!(state.outputs.winner_list.lines[0].text, "Brazil");

    assert_eq!(state.focus, CardFocus::Country);
    assert_eq!(
        state.logs.front().map(String::as_str),
        Some("[INFO] Loaded 8 finals (1930\u{2013}1970), 4 winning countries")
    );
    // Every fixture winner has map coordinates, so no warnings follow.
    assert_eq!(state.logs.len(), 1);
}

#[test]
fn cursor_wraps_in_both_directions() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);

    // Four winners on the country card.
    for _ in 0..4 {
        state.select_next(&ctx);
    }
    assert_eq!(state.country_cursor, 0);

    state.select_prev(&ctx);
    assert_eq!(state.country_cursor, 3);
    assert_eq!(state.year_cursor, 0);
}

#[test]
fn focus_toggle_switches_the_driven_card() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);
    assert_eq!(state.focused_len(&ctx), 4);

    state.toggle_focus();
    assert_eq!(state.focus, CardFocus::Year);
    assert_eq!(state.focused_len(&ctx), 8);

    state.select_next(&ctx);
    assert_eq!(state.year_cursor, 1);
    assert_eq!(state.country_cursor, 0);
}

#[test]
fn committing_a_country_updates_only_its_pane() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);

    state.commit_focused(&ctx);
    assert_eq!(state.country_choice.as_deref(), Some("Brazil"));
    assert_eq!(
        state.outputs.country_wins.lines[0].text,
        "Brazil has won the World Cup 3 times."
    );
    assert_eq!(state.outputs.year_detail.lines[0].text, YEAR_PROMPT);
    assert!(
        state
            .logs
            .iter()
            .any(|l| l == "[INFO] Country selected: Brazil")
    );
}

#[test]
fn committing_a_year_updates_only_its_pane() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);

    state.toggle_focus();
    state.commit_focused(&ctx);
    assert_eq!(state.year_choice, Some(1930));
    assert!(
        state.outputs.year_detail.lines[0]
            .text
            .starts_with("In 1930, Uruguay won the World Cup")
    );
    assert_eq!(state.outputs.country_wins.lines[0].text, COUNTRY_PROMPT);
}

#[test]
fn clearing_restores_the_prompt() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);

    state.commit_focused(&ctx);
    state.clear_focused(&ctx);
    assert_eq!(state.country_choice, None);
    assert_eq!(state.outputs.country_wins.lines[0].text, COUNTRY_PROMPT);
    assert!(
        state
            .logs
            .iter()
            .any(|l| l == "[INFO] Country selection cleared")
    );
}

#[test]
fn clearing_an_empty_selection_stays_quiet() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);

    let logs_before = state.logs.len();
    state.clear_focused(&ctx);
    assert_eq!(state.logs.len(), logs_before);
    assert_eq!(state.outputs.country_wins.lines[0].text, COUNTRY_PROMPT);
}

#[test]
fn hover_follows_the_country_cursor_only() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);

    state.select_next(&ctx);
    state.select_next(&ctx);
    assert_eq!(state.hovered_country(&ctx), Some("Uruguay"));

    state.toggle_focus();
    assert_eq!(state.hovered_country(&ctx), None);
}

#[test]
fn log_buffer_is_capped() {
    let ctx = fixture_context();
    let mut state = AppState::new(&ctx);
    for idx in 0..400 {
        state.push_log(format!("[INFO] line {idx}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 399"));
}

#[test]
fn export_banner_clears_after_its_hold_time() {
    let mut export = ExportState::new();
    let started = Instant::now();
    export.finish(Some("out.xlsx".to_string()), "Done: 8 finals".to_string(), false);
    assert!(export.active);
    assert!(export.done);
    assert!(!export.failed);

    export.clear_if_done_for(started, 8);
    assert!(export.active, "banner should survive inside the hold window");

    export.clear_if_done_for(started + Duration::from_secs(9), 8);
    assert!(!export.active);
    assert!(export.message.is_empty());
    assert_eq!(export.path, None);
}

#[test]
fn export_failure_keeps_the_failed_flag_until_cleared() {
    let mut export = ExportState::new();
    export.finish(None, "failed: disk full".to_string(), true);
    assert!(export.failed);
    assert_eq!(export.path, None);

    export.clear_if_done_for(Instant::now() + Duration::from_secs(9), 8);
    assert!(!export.failed);
}
