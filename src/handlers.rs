use crate::context::DashboardContext;

pub const COUNTRY_PROMPT: &str = "Select a country to see its win count and winning years.";
pub const YEAR_PROMPT: &str = "Select a year to see the match details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Plain,
    Muted,
    Success,
    Secondary,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentLine {
    pub text: String,
    pub tone: TextTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub lines: Vec<FragmentLine>,
}

impl Fragment {
    pub fn line(text: impl Into<String>, tone: TextTone) -> Self {
        let mut fragment = Self::default();
        fragment.push(text, tone);
        fragment
    }

    pub fn push(&mut self, text: impl Into<String>, tone: TextTone) {
        self.lines.push(FragmentLine {
            text: text.into(),
            tone,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    CountrySelected(Option<String>),
    YearSelected(Option<u16>),
    MapRendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    CountryDropdown,
    YearDropdown,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    CountryWins,
    YearDetail,
    WinnerList,
}

impl InputEvent {
    pub fn source(&self) -> InputSource {
        match self {
            InputEvent::CountrySelected(_) => InputSource::CountryDropdown,
            InputEvent::YearSelected(_) => InputSource::YearDropdown,
            InputEvent::MapRendered => InputSource::Map,
        }
    }
}

pub struct Binding {
    pub source: InputSource,
    pub target: OutputTarget,
    pub handler: fn(&DashboardContext, &InputEvent) -> Fragment,
}

/// The callback wiring, spelled out: which input feeds which handler and
/// which pane receives the result.
pub const BINDINGS: [Binding; 3] = [
    Binding {
        source: InputSource::CountryDropdown,
        target: OutputTarget::CountryWins,
        handler: handle_country_event,
    },
    Binding {
        source: InputSource::YearDropdown,
        target: OutputTarget::YearDetail,
        handler: handle_year_event,
    },
    Binding {
        source: InputSource::Map,
        target: OutputTarget::WinnerList,
        handler: handle_map_event,
    },
];

pub fn dispatch(ctx: &DashboardContext, event: &InputEvent) -> Option<(OutputTarget, Fragment)> {
    let source = event.source();
    let binding = BINDINGS.iter().find(|b| b.source == source)?;
    Some((binding.target, (binding.handler)(ctx, event)))
}

fn handle_country_event(ctx: &DashboardContext, event: &InputEvent) -> Fragment {
    let selected = match event {
        InputEvent::CountrySelected(value) => value.as_deref(),
        _ => None,
    };
    country_wins(ctx, selected)
}

fn handle_year_event(ctx: &DashboardContext, event: &InputEvent) -> Fragment {
    let selected = match event {
        InputEvent::YearSelected(value) => *value,
        _ => None,
    };
    year_details(ctx, selected)
}

fn handle_map_event(ctx: &DashboardContext, _event: &InputEvent) -> Fragment {
    winner_list(ctx)
}

pub fn country_wins(ctx: &DashboardContext, selected: Option<&str>) -> Fragment {
    let Some(country) = selected else {
        return Fragment::line(COUNTRY_PROMPT, TextTone::Muted);
    };
    let Some(entry) = ctx.wins.wins_for(country) else {
        return Fragment::line(
            format!("No World Cup wins on record for {country}."),
            TextTone::Danger,
        );
    };
    let years = entry
        .years
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut fragment = Fragment::default();
    fragment.push(
        format!("{country} has won the World Cup {} times.", entry.wins),
        TextTone::Success,
    );
    fragment.push(format!("Years won: {years}."), TextTone::Secondary);
    fragment
}

pub fn year_details(ctx: &DashboardContext, selected: Option<u16>) -> Fragment {
    let Some(year) = selected else {
        return Fragment::line(YEAR_PROMPT, TextTone::Muted);
    };
    let Some(record) = ctx.final_for_year(year) else {
        return Fragment::line(
            format!("No World Cup final on record for {year}."),
            TextTone::Danger,
        );
    };
    Fragment::line(
        format!(
            "In {year}, {} won the World Cup with a score of {} against {}. \
             The match was held at {} in {} and was attended by {} people.",
            record.winner,
            record.score,
            record.runner_up,
            record.venue,
            record.location,
            format_thousands(record.attendance)
        ),
        TextTone::Info,
    )
}

pub fn winner_list(ctx: &DashboardContext) -> Fragment {
    let mut fragment = Fragment::default();
    for entry in ctx.wins.ordered_winners() {
        fragment.push(entry.country.clone(), TextTone::Plain);
    }
    fragment
}

pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{BINDINGS, InputEvent, InputSource, OutputTarget, format_thousands};

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(93_000), "93,000");
        assert_eq!(format_thousands(1_618_400), "1,618,400");
    }

    #[test]
    fn every_source_has_exactly_one_binding() {
        for source in [
            InputSource::CountryDropdown,
            InputSource::YearDropdown,
            InputSource::Map,
        ] {
            let count = BINDINGS.iter().filter(|b| b.source == source).count();
            assert_eq!(count, 1, "{source:?} should bind once");
        }
    }

    #[test]
    fn bindings_target_distinct_panes() {
        let targets: Vec<OutputTarget> = BINDINGS.iter().map(|b| b.target).collect();
        assert!(targets.contains(&OutputTarget::CountryWins));
        assert!(targets.contains(&OutputTarget::YearDetail));
        assert!(targets.contains(&OutputTarget::WinnerList));
    }

    #[test]
    fn events_report_their_source() {
        assert_eq!(
            InputEvent::CountrySelected(None).source(),
            InputSource::CountryDropdown
        );
        assert_eq!(
            InputEvent::YearSelected(Some(1966)).source(),
            InputSource::YearDropdown
        );
        assert_eq!(InputEvent::MapRendered.source(), InputSource::Map);
    }
}
