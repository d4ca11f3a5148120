//! Ratatui-based terminal UI.
//!
//! The TUI shows one daily-change chart at a time. Switching the kind re-derives
//! from the cached document; changing the window re-fetches (see `TrendState`).
//! A cursor plays the role of the hover tooltip.

use std::io;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{Refresh, TrendOutput, TrendState};
use crate::chart::Rgb;
use crate::data::HistoricalClient;
use crate::domain::{ChartPoint, TrendRequest};
use crate::error::AppError;
use crate::report::labels::{fmt_abbrev, fmt_axis_date, fmt_signed_thousands, tooltip_line};

mod plotters_chart;

use plotters_chart::TrendPlottersChart;

/// Fetch windows offered by `+`/`-`, in days.
const WINDOW_STEPS: [u32; 6] = [7, 30, 60, 120, 180, 365];

/// Start the TUI.
pub fn run(request: TrendRequest) -> Result<(), AppError> {
    // Anything chattier than warn would scribble over the alternate screen.
    log::set_max_level(log::LevelFilter::Warn);

    let mut app = App::new(request)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::data(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::data(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::data(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    request: TrendRequest,
    client: HistoricalClient,
    state: TrendState,
    /// Index into the current points (tooltip position).
    cursor: usize,
    status: String,
}

impl App {
    fn new(request: TrendRequest) -> Result<Self, AppError> {
        let client = HistoricalClient::from_env()?;
        let mut app = Self {
            request: request.clone(),
            client,
            state: TrendState::new(),
            cursor: 0,
            status: String::new(),
        };
        // The first fetch must succeed; later failures only show in the status line.
        app.state.update(&app.client, &request)?;
        app.cursor_to_latest();
        app.status = format!("Loaded {} days from {}.", request.last_days, app.client.base_url());
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::data(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::data(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::data(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right => {
                let next = TrendRequest { kind: self.request.kind.next(), ..self.request.clone() };
                self.apply(next);
            }
            KeyCode::Left => {
                let next = TrendRequest { kind: self.request.kind.prev(), ..self.request.clone() };
                self.apply(next);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let next = TrendRequest { last_days: wider_window(self.request.last_days), ..self.request.clone() };
                self.apply(next);
            }
            KeyCode::Char('-') => {
                let next = TrendRequest { last_days: narrower_window(self.request.last_days), ..self.request.clone() };
                self.apply(next);
            }
            KeyCode::Char('[') | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char(']') | KeyCode::Char('l') => {
                let last = self.points().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor_to_latest(),
            KeyCode::Char('r') => match self.state.refetch(&self.client, &self.request) {
                Ok(()) => {
                    self.cursor_to_latest();
                    self.status = "Refreshed.".to_string();
                }
                Err(err) => self.status = format!("Refresh failed: {err}"),
            },
            _ => {}
        }
        false
    }

    /// Move to `next`, recomputing only what the change requires.
    fn apply(&mut self, next: TrendRequest) {
        match self.state.update(&self.client, &next) {
            Ok(refresh) => {
                self.status = match refresh {
                    Refresh::Fetched => format!("Fetched last {} days.", next.last_days),
                    Refresh::Rederived => format!("kind: {}", next.kind.display_name()),
                    Refresh::Unchanged => self.status.clone(),
                };
                if refresh != Refresh::Unchanged {
                    self.cursor_to_latest();
                }
                self.request = next;
            }
            // Keep showing the previous request; `TrendState` kept its output too.
            Err(err) => self.status = format!("Update failed: {err}"),
        }
    }

    fn output(&self) -> Option<&TrendOutput> {
        self.state.output()
    }

    fn points(&self) -> &[ChartPoint] {
        self.output().map(|o| o.points.as_slice()).unwrap_or(&[])
    }

    fn cursor_to_latest(&mut self) {
        self.cursor = self.points().len().saturating_sub(1);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_tooltip(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        let accent = self.output().map(|o| to_color(o.palette.border)).unwrap_or(Color::Red);

        lines.push(Line::from(vec![
            Span::styled("trend", Style::default().fg(Color::Cyan)),
            Span::raw(" - daily changes from disease.sh  "),
            Span::styled(
                format!("■ {}", self.request.kind.display_name()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]));

        let (scope, n, total) = self
            .output()
            .map(|o| (o.scope_label(), o.stats.n_points, fmt_signed_thousands(o.stats.total)))
            .unwrap_or_else(|| (self.request.scope.to_string(), 0, "-".to_string()));

        lines.push(Line::from(Span::styled(
            format!(
                "scope: {scope} | window: {}d | n={n} | net: {total}",
                self.request.last_days
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("New {} per day", self.request.kind.field_name());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(output) = self.output().filter(|o| !o.points.is_empty()) else {
            let msg = Paragraph::new("No data (need at least two days).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (series, x_bounds, y_bounds) = chart_series(&output.points);
        let cursor = series.get(self.cursor).copied();

        let widget = TrendPlottersChart {
            series: &series,
            cursor,
            line_color: to_rgb(output.palette.border),
            cursor_color: to_rgb(output.palette.fill),
            x_bounds,
            y_bounds,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_abbrev,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_tooltip(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = match self.points().get(self.cursor) {
            Some(p) => tooltip_line(p),
            None => "-".to_string(),
        };
        let accent = self.output().map(|o| to_color(o.palette.fill)).unwrap_or(Color::Gray);
        let p = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(accent))))
            .block(Block::default().title("Tooltip").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ kind  [/] cursor  +/- window  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build the Plotters series and padded bounds.
fn chart_series(points: &[ChartPoint]) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let series: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.x.num_days_from_ce() as f64, p.y as f64))
        .collect();

    let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &series {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    // A single day still needs a non-empty x range.
    if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    (series, [x0, x1], [y_min - pad, y_max + pad])
}

fn wider_window(days: u32) -> u32 {
    WINDOW_STEPS.iter().copied().find(|&s| s > days).unwrap_or(days)
}

fn narrower_window(days: u32) -> u32 {
    WINDOW_STEPS.iter().rev().copied().find(|&s| s < days).unwrap_or(days)
}

fn fmt_axis_x(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(fmt_axis_date)
        .unwrap_or_default()
}

fn to_rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}
