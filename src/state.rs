use std::collections::VecDeque;
use std::time::Instant;

use crate::context::DashboardContext;
use crate::handlers::{self, Fragment, InputEvent, OutputTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFocus {
    Country,
    Year,
}

/// One stored fragment per output pane. A pane only changes when the dispatch
/// table hands back a replacement for it.
#[derive(Debug, Clone, Default)]
pub struct PaneOutputs {
    pub winner_list: Fragment,
    pub country_wins: Fragment,
    pub year_detail: Fragment,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub focus: CardFocus,
    pub country_cursor: usize,
    pub year_cursor: usize,
    pub country_choice: Option<String>,
    pub year_choice: Option<u16>,
    pub outputs: PaneOutputs,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub export: ExportState,
}

impl AppState {
    pub fn new(ctx: &DashboardContext) -> Self {
        let mut state = Self {
            focus: CardFocus::Country,
            country_cursor: 0,
            year_cursor: 0,
            country_choice: None,
            year_choice: None,
            outputs: PaneOutputs::default(),
            logs: VecDeque::with_capacity(64),
            help_overlay: false,
            export: ExportState::new(),
        };

        let span = match (ctx.years.first(), ctx.years.last()) {
            (Some(first), Some(last)) => format!("{first}\u{2013}{last}"),
            _ => "no years".to_string(),
        };
        state.push_log(format!(
            "[INFO] Loaded {} finals ({span}), {} winning countries",
            ctx.finals.len(),
            ctx.wins.distinct_winners()
        ));
        for country in &ctx.map.missing {
            state.push_log(format!("[WARN] No map coordinates for {country}"));
        }

        // Seed every pane through the dispatch table: the rendered map fills
        // the winner list, the two empty selections produce their prompts.
        state.apply_event(ctx, InputEvent::MapRendered);
        state.apply_event(ctx, InputEvent::CountrySelected(None));
        state.apply_event(ctx, InputEvent::YearSelected(None));
        state
    }

    /// Route an input event through the dispatch table and replace exactly
    /// the pane the matched binding targets.
    pub fn apply_event(&mut self, ctx: &DashboardContext, event: InputEvent) {
        match &event {
            InputEvent::CountrySelected(value) => self.country_choice = value.clone(),
            InputEvent::YearSelected(value) => self.year_choice = *value,
            InputEvent::MapRendered => {}
        }
        if let Some((target, fragment)) = handlers::dispatch(ctx, &event) {
            match target {
                OutputTarget::CountryWins => self.outputs.country_wins = fragment,
                OutputTarget::YearDetail => self.outputs.year_detail = fragment,
                OutputTarget::WinnerList => self.outputs.winner_list = fragment,
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            CardFocus::Country => CardFocus::Year,
            CardFocus::Year => CardFocus::Country,
        };
    }

    pub fn select_next(&mut self, ctx: &DashboardContext) {
        let total = self.focused_len(ctx);
        if total == 0 {
            return;
        }
        match self.focus {
            CardFocus::Country => self.country_cursor = (self.country_cursor + 1) % total,
            CardFocus::Year => self.year_cursor = (self.year_cursor + 1) % total,
        }
    }

    pub fn select_prev(&mut self, ctx: &DashboardContext) {
        let total = self.focused_len(ctx);
        if total == 0 {
            return;
        }
        match self.focus {
            CardFocus::Country => {
                self.country_cursor = if self.country_cursor == 0 {
                    total - 1
                } else {
                    self.country_cursor - 1
                };
            }
            CardFocus::Year => {
                self.year_cursor = if self.year_cursor == 0 {
                    total - 1
                } else {
                    self.year_cursor - 1
                };
            }
        }
    }

    /// Commit the option under the cursor of the focused card, like picking
    /// an entry from a dropdown.
    pub fn commit_focused(&mut self, ctx: &DashboardContext) {
        match self.focus {
            CardFocus::Country => {
                let Some(country) = self.country_under_cursor(ctx) else {
                    return;
                };
                let country = country.to_string();
                self.push_log(format!("[INFO] Country selected: {country}"));
                self.apply_event(ctx, InputEvent::CountrySelected(Some(country)));
            }
            CardFocus::Year => {
                let Some(year) = ctx.years.get(self.year_cursor).copied() else {
                    return;
                };
                self.push_log(format!("[INFO] Year selected: {year}"));
                self.apply_event(ctx, InputEvent::YearSelected(Some(year)));
            }
        }
    }

    /// Drop the committed choice of the focused card, returning its pane to
    /// the selection prompt.
    pub fn clear_focused(&mut self, ctx: &DashboardContext) {
        match self.focus {
            CardFocus::Country => {
                if self.country_choice.is_some() {
                    self.push_log("[INFO] Country selection cleared");
                }
                self.apply_event(ctx, InputEvent::CountrySelected(None));
            }
            CardFocus::Year => {
                if self.year_choice.is_some() {
                    self.push_log("[INFO] Year selection cleared");
                }
                self.apply_event(ctx, InputEvent::YearSelected(None));
            }
        }
    }

    /// The country under the cursor while the country card has focus. The map
    /// emphasizes this marker, the closest a terminal gets to hovering.
    pub fn hovered_country<'a>(&self, ctx: &'a DashboardContext) -> Option<&'a str> {
        if self.focus != CardFocus::Country {
            return None;
        }
        self.country_under_cursor(ctx)
    }

    pub fn country_under_cursor<'a>(&self, ctx: &'a DashboardContext) -> Option<&'a str> {
        ctx.wins
            .ordered_winners()
            .get(self.country_cursor)
            .map(|entry| entry.country.as_str())
    }

    pub fn focused_len(&self, ctx: &DashboardContext) -> usize {
        match self.focus {
            CardFocus::Country => ctx.wins.distinct_winners(),
            CardFocus::Year => ctx.years.len(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn maybe_clear_export(&mut self, now: Instant) {
        self.export.clear_if_done_for(now, 8);
    }
}

#[derive(Debug, Clone)]
pub struct ExportState {
    pub active: bool,
    pub done: bool,
    pub failed: bool,
    pub path: Option<String>,
    pub message: String,
    pub last_updated: Option<Instant>,
}

impl Default for ExportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportState {
    pub fn new() -> Self {
        Self {
            active: false,
            done: false,
            failed: false,
            path: None,
            message: String::new(),
            last_updated: None,
        }
    }

    pub fn finish(&mut self, path: Option<String>, message: String, failed: bool) {
        self.active = true;
        self.done = true;
        self.failed = failed;
        self.path = path;
        self.message = message;
        self.last_updated = Some(Instant::now());
    }

    pub fn clear_if_done_for(&mut self, now: Instant, keep_secs: u64) {
        if !self.active || !self.done {
            return;
        }
        let Some(last) = self.last_updated else {
            return;
        };
        if now.duration_since(last).as_secs() >= keep_secs {
            *self = Self::new();
        }
    }
}
