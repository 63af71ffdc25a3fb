use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Map as WorldMap, MapResolution};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use wc_history_terminal::context::DashboardContext;
use wc_history_terminal::export;
use wc_history_terminal::handlers::{Fragment, TextTone};
use wc_history_terminal::map_figure::{self, MapFigure};
use wc_history_terminal::state::{AppState, CardFocus};

const DEFAULT_CSV_PATH: &str = "data/world_cup_finals.csv";

struct App {
    ctx: DashboardContext,
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new(ctx: DashboardContext) -> Self {
        let tick_ms = std::env::var("WC_TICK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        let state = AppState::new(&ctx);
        Self {
            ctx,
            state,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_focus(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(&self.ctx),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(&self.ctx),
            KeyCode::Enter => self.state.commit_focused(&self.ctx),
            KeyCode::Char('x') => self.state.clear_focused(&self.ctx),
            KeyCode::Char('e') => self.run_export(),
            _ => {}
        }
    }

    fn run_export(&mut self) {
        let path = export::default_export_path();
        match export::export_dashboard(&path, &self.ctx) {
            Ok(report) => {
                let shown = path.display().to_string();
                self.state.push_log(format!(
                    "[INFO] Exported {} finals, {} countries to {shown}",
                    report.finals, report.countries
                ));
                self.state.export.finish(
                    Some(shown),
                    format!("Done: {} finals, {} countries", report.finals, report.countries),
                    false,
                );
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Export failed: {err:#}"));
                self.state
                    .export
                    .finish(None, format!("failed: {err:#}"), true);
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let csv_path =
        std::env::var("WC_FINALS_CSV").unwrap_or_else(|_| DEFAULT_CSV_PATH.to_string());
    // Load and aggregate before touching the terminal so a bad dataset fails
    // with a readable message instead of a garbled alternate screen.
    let ctx = match DashboardContext::load(Path::new(&csv_path)) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(ctx);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        app.state.maybe_clear_export(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);

    render_map(frame, body[0], app);

    let winners_height = (app.ctx.wins.distinct_winners() as u16 + 2).min(12);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(winners_height),
            Constraint::Min(8),
            Constraint::Min(9),
        ])
        .split(body[1]);

    render_winners(frame, right[0], app);
    render_country_card(frame, right[1], app);
    render_year_card(frame, right[2], app);

    render_console(frame, chunks[2], app);

    let footer = Paragraph::new(footer_text()).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let ctx = &app.ctx;
    let span = match (ctx.years.first(), ctx.years.last()) {
        (Some(first), Some(last)) => format!("{first}\u{2013}{last}"),
        _ => "no data".to_string(),
    };
    let title = format!(
        "WC HISTORY | {} finals {span} | {} winners | Focus: {}",
        ctx.finals.len(),
        ctx.wins.distinct_winners(),
        focus_label(app.state.focus)
    );
    let line1 = format!("  .-.  {title}");
    let line2 = " (___)".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text() -> String {
    "Tab Focus | j/k/↑/↓ Move | Enter Select | x Clear | e Export | ? Help | q Quit".to_string()
}

fn focus_label(focus: CardFocus) -> &'static str {
    match focus {
        CardFocus::Country => "COUNTRY",
        CardFocus::Year => "YEAR",
    }
}

fn render_map(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(app.ctx.map.title.as_str())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width < 10 {
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let map = &app.ctx.map;
    let hovered = app.state.hovered_country(&app.ctx);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&WorldMap {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            for point in &map.points {
                let (r, g, b) = point.color;
                ctx.print(
                    point.lon,
                    point.lat,
                    Line::styled("●", Style::default().fg(Color::Rgb(r, g, b))),
                );
            }
            if let Some(name) = hovered
                && let Some(point) = map.point_for(name)
            {
                ctx.print(
                    point.lon,
                    point.lat,
                    Line::styled(
                        "◉",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
                ctx.print(
                    point.lon + 4.0,
                    point.lat + 5.0,
                    Line::styled(
                        format!("{} ({})", point.country, point.wins),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, sections[0]);

    frame.render_widget(Paragraph::new(legend_line(map)), sections[1]);
}

fn legend_line(map: &MapFigure) -> Line<'static> {
    let mut counts: Vec<usize> = map.points.iter().map(|p| p.wins).collect();
    counts.sort_unstable();
    counts.dedup();

    let mut spans = vec![Span::styled("wins ", Style::default().fg(Color::DarkGray))];
    for wins in counts {
        let (r, g, b) = map_figure::scale_color(wins, map.min_wins, map.max_wins);
        spans.push(Span::styled(
            "●",
            Style::default().fg(Color::Rgb(r, g, b)),
        ));
        spans.push(Span::raw(format!(" {wins}  ")));
    }
    Line::from(spans)
}

fn render_winners(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title("Previous Winners")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }
    let winners = Paragraph::new(fragment_text(&app.state.outputs.winner_list));
    frame.render_widget(winners, inner);
}

fn render_country_card(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == CardFocus::Country;
    let block = Block::default()
        .title("Wins by Country")
        .borders(Borders::ALL)
        .border_style(card_border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 4 || inner.width == 0 {
        return;
    }
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    let winners = app.ctx.wins.ordered_winners();
    let visible = sections[0].height as usize;
    let (start, end) = visible_range(app.state.country_cursor, winners.len(), visible);

    let mut rows: Vec<Line> = Vec::with_capacity(end - start);
    for idx in start..end {
        let entry = winners[idx];
        let at_cursor = idx == app.state.country_cursor;
        let committed = app.state.country_choice.as_deref() == Some(entry.country.as_str());
        rows.push(option_row(&entry.country, at_cursor, focused, committed));
    }
    frame.render_widget(Paragraph::new(rows), sections[0]);

    let output = Paragraph::new(fragment_text(&app.state.outputs.country_wins))
        .wrap(Wrap { trim: true });
    frame.render_widget(output, sections[1]);
}

fn render_year_card(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == CardFocus::Year;
    let block = Block::default()
        .title("Final by Year")
        .borders(Borders::ALL)
        .border_style(card_border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 5 || inner.width == 0 {
        return;
    }
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(inner);

    let years = &app.ctx.years;
    let visible = sections[0].height as usize;
    let (start, end) = visible_range(app.state.year_cursor, years.len(), visible);

    let mut rows: Vec<Line> = Vec::with_capacity(end - start);
    for idx in start..end {
        let year = years[idx];
        let at_cursor = idx == app.state.year_cursor;
        let committed = app.state.year_choice == Some(year);
        rows.push(option_row(&year.to_string(), at_cursor, focused, committed));
    }
    frame.render_widget(Paragraph::new(rows), sections[0]);

    let output = Paragraph::new(fragment_text(&app.state.outputs.year_detail))
        .wrap(Wrap { trim: true });
    frame.render_widget(output, sections[1]);
}

fn card_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn option_row(label: &str, at_cursor: bool, focused: bool, committed: bool) -> Line<'static> {
    let prefix = if at_cursor { "> " } else { "  " };
    let mut style = Style::default();
    if at_cursor && focused {
        style = style.fg(Color::White).bg(Color::DarkGray);
    }
    if committed {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::styled(format!("{prefix}{label}"), style)
}

fn render_console(frame: &mut Frame, area: Rect, app: &App) {
    let console = Paragraph::new(console_lines(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, area);
}

fn console_lines(state: &AppState) -> Vec<Line<'static>> {
    let take = if state.export.active { 2 } else { 3 };
    let mut lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(take)
        .map(|msg| {
            let style = if msg.starts_with("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::styled(msg.clone(), style)
        })
        .collect();
    lines.reverse();

    if state.export.active {
        let style = if state.export.failed {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::styled(
            format!("[EXPORT] {}", state.export.message),
            style,
        ));
    }
    if lines.is_empty() {
        lines.push(Line::styled(
            "No activity yet",
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines
}

fn fragment_text(fragment: &Fragment) -> Text<'_> {
    let lines: Vec<Line> = fragment
        .lines
        .iter()
        .map(|line| Line::styled(line.text.as_str(), tone_style(line.tone)))
        .collect();
    Text::from(lines)
}

fn tone_style(tone: TextTone) -> Style {
    match tone {
        TextTone::Plain => Style::default(),
        TextTone::Muted => Style::default().fg(Color::DarkGray),
        TextTone::Success => Style::default().fg(Color::Green),
        TextTone::Secondary => Style::default().fg(Color::Gray),
        TextTone::Info => Style::default().fg(Color::Cyan),
        TextTone::Danger => Style::default().fg(Color::Red),
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "WC History Terminal - Help",
        "",
        "Cards:",
        "  Tab          Switch focused card",
        "  j/k or ↑/↓   Move cursor",
        "  Enter        Select highlighted entry",
        "  x            Clear selection",
        "",
        "Global:",
        "  e            Export xlsx workbook",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
