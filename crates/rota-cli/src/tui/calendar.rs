//! TUI calendar view for rota.
//!
//! Provides a full-screen month grid with:
//! - Arrow/hjkl cursor movement, space/enter to toggle a duty day
//! - u/y undo/redo, p/n month navigation, s save, t theme toggle
//! - `a` AI workload analysis in a modal overlay, ? help, q quit
//!
//! The analysis call is the only asynchronous operation: it runs on a
//! background thread and reports back over a channel, with the trigger
//! disabled while a call is outstanding. Everything else stays interactive.

use crate::analyst::GeminiAnalyst;
use anyhow::Result;
use chrono::{Datelike, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell as TableCell, Clear, Paragraph, Row, Table, Wrap};
use rota_core::analysis::Analyst;
use rota_core::calendar::{Cell, GRID_COLS, MonthGrid, YearMonth, is_today};
use rota_core::config::{AnalysisConfig, Config};
use rota_core::datekey::DateKey;
use rota_core::locale::Locale;
use rota_core::schedule::Schedule;
use rota_core::store::{StateStore, Theme};
use std::io::{Stdout, stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// How long transient status messages stay visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Run the calendar TUI until the user quits.
pub fn run(store: StateStore, config: Config) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut view = CalendarView::new(store, &config);
    let result = event_loop(&mut terminal, &mut view);
    teardown_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(out))?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    view: &mut CalendarView,
) -> Result<()> {
    loop {
        terminal.draw(|frame| view.render(frame, frame.area()))?;
        if event::poll(Duration::from_millis(150))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    view.handle_key(key);
                }
            }
        }
        view.tick();
        if view.should_quit() {
            break;
        }
    }
    Ok(())
}

/// Color set derived from the persisted theme.
struct Palette {
    header: Color,
    muted: Color,
    selected_bg: Color,
    selected_fg: Color,
    today: Color,
}

const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            header: Color::Blue,
            muted: Color::DarkGray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Red,
        },
        Theme::Dark => Palette {
            header: Color::Cyan,
            muted: Color::Gray,
            selected_bg: Color::Cyan,
            selected_fg: Color::Black,
            today: Color::LightRed,
        },
    }
}

/// The interactive month-grid view.
pub struct CalendarView {
    /// Persistence for the selection and theme.
    store: StateStore,
    /// Display locale for labels and fixed messages.
    locale: Locale,
    /// Analysis collaborator settings.
    analysis: AnalysisConfig,
    /// Current theme; persisted on toggle.
    theme: Theme,
    /// Selection model with undo history and saved baseline.
    schedule: Schedule,
    /// Month currently shown.
    month: YearMonth,
    /// Fixed 42-cell layout for `month`.
    grid: MonthGrid,
    /// Day of `month` the keyboard cursor is on (1-based).
    cursor_day: u32,
    /// Channel for the in-flight analysis call, if any.
    analysis_rx: Option<Receiver<String>>,
    /// Analysis result shown in the modal overlay, if open.
    analysis_text: Option<String>,
    /// Whether the help overlay is open.
    show_help: bool,
    /// Transient status message with its creation time.
    status: Option<(String, Instant)>,
    /// Whether to quit.
    should_quit: bool,
}

impl CalendarView {
    /// Load persisted state and open on the current month.
    #[must_use]
    pub fn new(store: StateStore, config: &Config) -> Self {
        let theme = store.load_theme();
        let schedule = Schedule::from_saved(store.load_selection());
        let month = YearMonth::current();
        let today = Local::now().date_naive();
        let cursor_day = if today.year() == month.year && today.month() == month.month {
            today.day()
        } else {
            1
        };
        Self {
            store,
            locale: config.locale,
            analysis: config.analysis.clone(),
            theme,
            schedule,
            month,
            grid: MonthGrid::build(month),
            cursor_day,
            analysis_rx: None,
            analysis_text: None,
            show_help: false,
            status: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether an analysis call is outstanding (the trigger is disabled).
    #[must_use]
    pub const fn analysis_busy(&self) -> bool {
        self.analysis_rx.is_some()
    }

    /// The analysis modal text, if the modal is open.
    #[must_use]
    pub fn analysis_text(&self) -> Option<&str> {
        self.analysis_text.as_deref()
    }

    /// The selection model (read access for rendering and tests).
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The month currently shown.
    #[must_use]
    pub const fn month(&self) -> YearMonth {
        self.month
    }

    /// The date key under the keyboard cursor.
    #[must_use]
    pub fn cursor_key(&self) -> DateKey {
        self.month.date_key(self.cursor_day)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }

    fn set_month(&mut self, ym: YearMonth) {
        self.month = ym;
        self.grid = MonthGrid::build(ym);
        self.cursor_day = self.cursor_day.min(ym.day_count()).max(1);
    }

    /// Handle one key press. Modal and help overlays swallow input first.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.analysis_text.is_some() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('a')
            ) {
                self.analysis_text = None;
            }
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor_day = self.cursor_day.saturating_sub(1).max(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor_day = (self.cursor_day + 1).min(self.month.day_count());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor_day > GRID_COLS as u32 {
                    self.cursor_day -= GRID_COLS as u32;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor_day + GRID_COLS as u32 <= self.month.day_count() {
                    self.cursor_day += GRID_COLS as u32;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.schedule.toggle(self.cursor_key());
            }
            KeyCode::Char('u') => {
                if !self.schedule.undo() {
                    self.set_status("nothing to undo");
                }
            }
            KeyCode::Char('z') if ctrl => {
                if !self.schedule.undo() {
                    self.set_status("nothing to undo");
                }
            }
            KeyCode::Char('y') | KeyCode::Char('r') => {
                if !self.schedule.redo() {
                    self.set_status("nothing to redo");
                }
            }
            KeyCode::Char('p') | KeyCode::Char('[') => self.set_month(self.month.prev()),
            KeyCode::Char('n') | KeyCode::Char(']') => self.set_month(self.month.next()),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('a') => self.start_analysis(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn save(&mut self) {
        if !self.schedule.is_dirty() {
            self.set_status("no unsaved changes");
            return;
        }
        match self.store.save_selection(self.schedule.current()) {
            Ok(()) => {
                self.schedule.mark_saved();
                self.set_status(format!("saved {} duty days", self.schedule.current().len()));
            }
            Err(err) => {
                tracing::warn!("save from TUI failed: {err:#}");
                self.set_status(format!("save failed: {err}"));
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.store.save_theme(self.theme) {
            tracing::warn!("theme save failed: {err:#}");
            self.set_status(format!("theme not persisted: {err}"));
        }
    }

    /// Kick off the analysis call, or answer locally when the month is empty.
    fn start_analysis(&mut self) {
        if self.analysis_busy() {
            self.set_status("analysis already running");
            return;
        }
        let dates = self.schedule.month_keys(self.month);
        if dates.is_empty() {
            // Zero-selection path never touches the collaborator.
            self.analysis_text = Some(self.locale.no_duty_message().to_string());
            return;
        }
        let label = self.locale.month_label(self.month);
        let analyst = GeminiAnalyst::new(self.analysis.clone(), self.locale);
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let text = analyst.analyze(&label, &dates);
            let _ = tx.send(text);
        });
        self.analysis_rx = Some(rx);
    }

    /// Drain the analysis channel and expire stale status messages.
    pub fn tick(&mut self) {
        if let Some(rx) = &self.analysis_rx {
            match rx.try_recv() {
                Ok(text) => {
                    self.analysis_text = Some(text);
                    self.analysis_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    // Worker died without sending; the boundary contract
                    // still owes the user text.
                    self.analysis_text = Some(self.locale.analysis_fallback().to_string());
                    self.analysis_rx = None;
                }
            }
        }
        if let Some((_, since)) = &self.status {
            if since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Render the whole view.
    pub fn render(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let pal = palette(self.theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0], &pal);
        self.render_grid(frame, chunks[1], &pal);
        self.render_footer(frame, chunks[2], &pal);

        if self.analysis_text.is_some() {
            self.render_analysis_modal(frame, area, &pal);
        } else if self.show_help {
            self.render_help_overlay(frame, area, &pal);
        }
    }

    fn render_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect, pal: &Palette) {
        let mut spans = vec![
            Span::styled(
                self.locale.month_label(self.month),
                Style::default()
                    .fg(pal.header)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "   {} duty days, {} free",
                self.schedule.month_count(self.month),
                self.month.day_count() as usize - self.schedule.month_count(self.month),
            )),
        ];
        if self.schedule.is_dirty() {
            spans.push(Span::styled(
                "   * unsaved",
                Style::default().fg(pal.today),
            ));
        }
        if self.analysis_busy() {
            spans.push(Span::styled(
                "   analyzing…",
                Style::default().fg(pal.muted),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_grid(&self, frame: &mut ratatui::Frame<'_>, area: Rect, pal: &Palette) {
        let header = Row::new(
            self.locale
                .weekdays_short()
                .into_iter()
                .map(|d| {
                    TableCell::from(d).style(
                        Style::default()
                            .fg(pal.muted)
                            .add_modifier(Modifier::BOLD),
                    )
                })
                .collect::<Vec<_>>(),
        );

        let rows: Vec<Row<'_>> = self
            .grid
            .rows()
            .map(|week| {
                Row::new(
                    week.iter()
                        .map(|cell| self.day_cell(*cell, pal))
                        .collect::<Vec<_>>(),
                )
                .height(2)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(6); GRID_COLS])
            .header(header)
            .column_spacing(1)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn day_cell(&self, cell: Cell, pal: &Palette) -> TableCell<'static> {
        let Cell::Day(day) = cell else {
            return TableCell::from("");
        };
        let key = self.month.date_key(day);
        let selected = self.schedule.is_selected(&key);
        let text = if selected {
            format!("{day:>3} ●")
        } else {
            format!("{day:>3}")
        };

        let mut style = Style::default();
        if selected {
            style = style.fg(pal.selected_fg).bg(pal.selected_bg);
        }
        if is_today(&key) {
            style = style.fg(pal.today).add_modifier(Modifier::UNDERLINED);
        }
        if day == self.cursor_day {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        TableCell::from(text).style(style)
    }

    fn render_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect, pal: &Palette) {
        let text = self.status.as_ref().map_or_else(
            || "space toggle  u/y undo/redo  p/n month  s save  a analyze  t theme  ? help  q quit"
                .to_string(),
            |(msg, _)| msg.clone(),
        );
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(pal.muted)),
            area,
        );
    }

    fn render_analysis_modal(&self, frame: &mut ratatui::Frame<'_>, area: Rect, pal: &Palette) {
        let Some(text) = &self.analysis_text else {
            return;
        };
        let title = match self.locale {
            Locale::En => " Workload analysis ",
            Locale::Tr => " Program analizi ",
        };
        let popup = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text.as_str())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .title_alignment(Alignment::Center)
                        .style(Style::default().fg(pal.header)),
                ),
            popup,
        );
    }

    fn render_help_overlay(&self, frame: &mut ratatui::Frame<'_>, area: Rect, pal: &Palette) {
        let lines: Vec<Line<'_>> = [
            ("arrows / hjkl", "move the day cursor"),
            ("space / enter", "toggle duty on the selected day"),
            ("u", "undo last toggle"),
            ("y", "redo"),
            ("p / n", "previous / next month"),
            ("s", "save the selection"),
            ("a", "AI workload analysis for this month"),
            ("t", "switch light/dark theme"),
            ("q", "quit"),
        ]
        .into_iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:>14}  "), Style::default().fg(pal.header)),
                Span::raw(what),
            ])
        })
        .collect();

        let popup = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keys ")
                    .title_alignment(Alignment::Center),
            ),
            popup,
        );
    }
}

/// Centered sub-rectangle used for modal overlays.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
