use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use rideshare_core::{
    models::{DriverStatus, Passenger, Rider, Trip},
    DriverSummary, Fleet, FleetEvent, FleetLoader,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TripView {
    Driven,
    Taken,
}

impl TripView {
    fn toggle(self) -> Self {
        match self {
            TripView::Driven => TripView::Taken,
            TripView::Taken => TripView::Driven,
        }
    }

    fn title(self) -> &'static str {
        match self {
            TripView::Driven => "Driven Trips",
            TripView::Taken => "Trips Taken",
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Dashboard over a single fleet document.
pub struct RideShareApp {
    loader: FleetLoader,
    fleet: Fleet,
    state: UiState,
    theme: Theme,
    fleet_rx: Option<mpsc::Receiver<FleetEvent>>,
}

impl RideShareApp {
    pub fn new(loader: FleetLoader) -> Self {
        Self {
            loader,
            fleet: Fleet::default(),
            state: UiState::default(),
            theme: Theme::default(),
            fleet_rx: None,
        }
    }

    pub fn attach_watcher(&mut self, receiver: mpsc::Receiver<FleetEvent>) {
        self.fleet_rx = Some(receiver);
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Err(err) = self.reload_fleet() {
            error!(?err, "Initial fleet load failed");
            self.state.set_status(format!("Failed to load fleet: {err:#}"));
        }

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let mut fleet_rx = self.fleet_rx.take();

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            if let Some(rx) = fleet_rx.as_mut() {
                let mut watcher_closed = false;
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        if !self.process_app_event(maybe_event) {
                            break;
                        }
                    }
                    maybe_fleet = rx.recv() => {
                        match maybe_fleet {
                            Some(event) => self.handle_fleet_event(event),
                            None => watcher_closed = true,
                        }
                    }
                }
                if watcher_closed {
                    warn!("Fleet watcher stopped");
                    fleet_rx = None;
                }
            } else {
                let maybe_event = event_rx.recv().await;
                if !self.process_app_event(maybe_event) {
                    break;
                }
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn reload_fleet(&mut self) -> Result<()> {
        match self.loader.load()? {
            Some(fleet) => {
                self.set_fleet(fleet);
                self.state.set_status(format!(
                    "Loaded {} drivers from {}",
                    self.state.all_drivers.len(),
                    self.loader.path().display()
                ));
            }
            None => {
                self.set_fleet(Fleet::default());
                self.state.set_status(format!(
                    "No fleet document at {}",
                    self.loader.path().display()
                ));
            }
        }
        Ok(())
    }

    fn set_fleet(&mut self, fleet: Fleet) {
        let selected = self.state.current_driver().map(|driver| driver.id);
        self.state.set_drivers(fleet.summaries());
        self.fleet = fleet;
        if let Some(id) = selected {
            self.state.select_driver(id);
        }
        info!(drivers = self.state.all_drivers.len(), "Fleet applied");
    }

    fn handle_fleet_event(&mut self, event: FleetEvent) {
        match event {
            FleetEvent::Reloaded(fleet) => {
                self.set_fleet(fleet);
                self.state.set_status("Fleet reloaded from disk".to_string());
            }
            FleetEvent::Missing => {
                warn!(path = %self.loader.path().display(), "Fleet document removed");
                self.state
                    .set_status("Fleet document removed; keeping last loaded data".to_string());
            }
            FleetEvent::Error(err) => {
                error!(?err, "Fleet reload failed");
                self.state.set_status(format!("Reload failed: {err:#}"));
            }
        }
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err:#}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                if self.state.mode == Mode::Filter {
                    self.state
                        .set_status(format!("Filter: {}", self.state.filter));
                }
                true
            }
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            match self.state.mode {
                Mode::Filter => self.handle_filter_key(key),
                Mode::Browse => self.handle_browse_key(key)?,
            }
        }
        Ok(())
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                self.state.filter.clear();
                self.state.apply_filter();
                self.state.set_status("Filter cleared".to_string());
            }
            KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state
                    .set_status(format!("Filter applied: {}", self.state.filter));
            }
            KeyCode::Backspace => {
                self.state.filter.pop();
                self.state.apply_filter();
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.state.filter.push(c);
                self.state.apply_filter();
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::Char('g') | KeyCode::Home => self.state.move_to(0),
            KeyCode::Char('G') | KeyCode::End => self.state.move_to_end(),
            KeyCode::PageDown => self.state.page_down(),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::Tab => {
                self.state.trip_view = self.state.trip_view.toggle();
                self.state
                    .set_status(format!("Showing {}", self.state.trip_view.title()));
            }
            KeyCode::Char('/') => {
                self.state.mode = Mode::Filter;
                self.state.set_status("Enter filter text".to_string());
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reload_fleet()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(size);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[0]);

        let detail = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(5)])
            .split(body[1]);

        self.render_driver_list(frame, body[0]);
        self.render_driver_details(frame, detail[0]);
        self.render_trips(frame, detail[1]);
        self.render_status(frame, chunks[1]);
    }

    fn render_driver_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor();
        self.state.ensure_cursor_visible();

        let mut list_state = ListState::default();
        let drivers = self.state.visible_drivers(self.state.list_height);
        if !drivers.is_empty() {
            let selected = self
                .state
                .cursor
                .saturating_sub(self.state.offset)
                .min(drivers.len().saturating_sub(1));
            list_state.select(Some(selected));
        }

        let items: Vec<ListItem> = drivers
            .iter()
            .enumerate()
            .map(|(idx, driver)| {
                let is_selected = self.state.cursor == self.state.offset + idx;
                let marker = if is_selected {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let name = Span::styled(
                    driver.name.clone(),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                );
                let id = Span::styled(
                    format!(" #{}", driver.id),
                    Style::default().fg(self.theme.muted),
                );
                let status = Span::styled(" ●", self.status_style(driver.status));
                ListItem::new(Line::from(vec![marker, name, id, status]))
            })
            .collect();

        let title = if self.state.filter.is_empty() {
            format!("Drivers ({})", self.state.all_drivers.len())
        } else {
            format!(
                "Drivers ({}/{})",
                self.state.filtered.len(),
                self.state.all_drivers.len()
            )
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_driver_details(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Driver Details");
        let Some(summary) = self.state.current_driver() else {
            let paragraph = Paragraph::new("No drivers available").block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                summary.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(summary.status.to_string(), self.status_style(summary.status)),
            ]),
            Line::from(format!("VIN: {}", summary.vehicle_id)),
        ];
        if let Some(driver) = self.fleet.driver(summary.id) {
            if let Some(phone) = driver.phone() {
                lines.push(Line::from(format!("Phone: {phone}")));
            }
        }
        lines.push(Line::from(format!(
            "Trips: {} completed, {} in progress",
            summary.completed_trips, summary.in_progress_trips
        )));
        lines.push(Line::from(format!(
            "Average rating: {}",
            format_rating(summary.average_rating)
        )));
        lines.push(Line::from(format!(
            "Total revenue: {}",
            format_currency(summary.total_revenue)
        )));
        lines.push(Line::from(vec![
            Span::raw("Net expenditures: "),
            Span::styled(
                format_currency(summary.net_expenditures),
                self.balance_style(summary.net_expenditures),
            ),
        ]));
        if let Some(driver) = self.fleet.driver(summary.id) {
            lines.push(Line::from(Span::styled(
                format!(
                    "Spent riding: {} over {}",
                    format_currency(driver.total_spent()),
                    format_duration(driver.total_time_spent())
                ),
                Style::default().fg(self.theme.muted),
            )));
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_trips(&self, frame: &mut Frame, area: Rect) {
        let view = self.state.trip_view;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} (Tab to switch)", view.title()));
        let Some(driver) = self
            .state
            .current_driver()
            .and_then(|summary| self.fleet.driver(summary.id))
        else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let trips = match view {
            TripView::Driven => driver.driven_trips(),
            TripView::Taken => driver.trips(),
        };
        if trips.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                "No trips recorded",
                Style::default().fg(self.theme.muted),
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let counterpart = match view {
            TripView::Driven => "Passenger",
            TripView::Taken => "Driver",
        };
        let header = Row::new(vec!["Trip", counterpart, "Start", "End", "Cost", "Rating"])
            .style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let rows: Vec<Row> = trips
            .iter()
            .map(|trip| {
                let other = match view {
                    TripView::Driven => format_passenger(trip.passenger()),
                    TripView::Taken => format!("driver {}", trip.driver_id()),
                };
                let style = if trip.is_completed() {
                    Style::default().fg(self.theme.primary_fg)
                } else {
                    Style::default().fg(self.theme.warning)
                };
                Row::new(vec![
                    format!("#{}", trip.id()),
                    other,
                    format_time(trip.start_time()),
                    trip.end_time()
                        .map(format_time)
                        .unwrap_or_else(|| "in progress".to_string()),
                    trip.cost().map(format_currency).unwrap_or_default(),
                    format_trip_rating(trip),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(7),
            Constraint::Length(12),
            Constraint::Length(17),
            Constraint::Length(17),
            Constraint::Length(10),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.state.mode == Mode::Filter {
            format!("Filter: {}", self.state.filter)
        } else {
            self.state.status.clone()
        };
        let secondary = Span::styled(
            format!(
                "{} trips ({} in progress) · / filter · Tab trips · Ctrl-r reload · q quit",
                self.fleet.trip_count(),
                self.fleet.in_progress_count()
            ),
            Style::default().fg(self.theme.muted),
        );
        let paragraph = Paragraph::new(vec![Line::from(primary), Line::from(secondary)])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn status_style(&self, status: DriverStatus) -> Style {
        match status {
            DriverStatus::Available => Style::default().fg(self.theme.success),
            DriverStatus::Unavailable => Style::default().fg(self.theme.danger),
        }
    }

    fn balance_style(&self, net: f64) -> Style {
        if net > 0.0 {
            Style::default().fg(self.theme.danger)
        } else {
            Style::default().fg(self.theme.success)
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    all_drivers: Vec<DriverSummary>,
    filtered: Vec<DriverSummary>,
    cursor: usize,
    offset: usize,
    list_height: usize,
    filter: String,
    status: String,
    mode: Mode,
    trip_view: TripView,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            all_drivers: Vec::new(),
            filtered: Vec::new(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            filter: String::new(),
            status: "Ready".to_string(),
            mode: Mode::Browse,
            trip_view: TripView::Driven,
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_drivers(&mut self, drivers: Vec<DriverSummary>) {
        self.all_drivers = drivers;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let needle = self.filter.trim().to_lowercase();
        self.filtered = if needle.is_empty() {
            self.all_drivers.clone()
        } else {
            self.all_drivers
                .iter()
                .filter(|driver| driver_matches(driver, &needle))
                .cloned()
                .collect()
        };
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
        self.ensure_cursor_visible();
    }

    fn move_to(&mut self, index: usize) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = index.min(self.filtered.len() - 1);
        self.ensure_cursor_visible();
    }

    fn move_to_end(&mut self) {
        self.move_to(usize::MAX);
    }

    fn page_down(&mut self) {
        self.move_cursor(self.list_height.max(1) as isize);
    }

    fn page_up(&mut self) {
        self.move_cursor(-(self.list_height.max(1) as isize));
    }

    fn visible_drivers(&self, height: usize) -> &[DriverSummary] {
        if self.filtered.is_empty() {
            return &[];
        }
        let end = (self.offset + height).min(self.filtered.len());
        &self.filtered[self.offset..end]
    }

    fn current_driver(&self) -> Option<&DriverSummary> {
        self.filtered.get(self.cursor)
    }

    /// Move the cursor onto `id`, clearing the filter if it hides that driver.
    fn select_driver(&mut self, id: i64) -> bool {
        if !self.filtered.iter().any(|driver| driver.id == id) {
            if !self.all_drivers.iter().any(|driver| driver.id == id) {
                return false;
            }
            self.filter.clear();
            self.apply_filter();
        }
        match self.filtered.iter().position(|driver| driver.id == id) {
            Some(pos) => {
                self.cursor = pos;
                self.ensure_cursor_visible();
                true
            }
            None => false,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn clamp_cursor(&mut self) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        self.offset = self.offset.min(self.filtered.len().saturating_sub(height));
    }
}

fn driver_matches(driver: &DriverSummary, needle: &str) -> bool {
    driver.name.to_lowercase().contains(needle)
        || driver.vehicle_id.to_lowercase().contains(needle)
        || driver.id.to_string() == needle
        || driver.status.as_str().eq_ignore_ascii_case(needle)
}

fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round();
    if cents < 0.0 {
        format!("-${:.2}", -cents / 100.0)
    } else {
        // abs() folds -0.0 into 0.0
        format!("${:.2}", cents.abs() / 100.0)
    }
}

fn format_rating(value: f64) -> String {
    if value == 0.0 {
        "unrated".to_string()
    } else {
        format!("{value:.2} / 5")
    }
}

fn format_trip_rating(trip: &Trip) -> String {
    trip.rating()
        .map(|stars| "★".repeat(usize::from(stars)))
        .unwrap_or_default()
}

fn format_passenger(passenger: Option<Passenger>) -> String {
    passenger
        .map(|passenger| passenger.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_time(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn format_duration(value: chrono::Duration) -> String {
    let minutes = value.num_minutes();
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, name: &str, status: DriverStatus) -> DriverSummary {
        DriverSummary {
            id,
            name: name.to_string(),
            vehicle_id: format!("1C9EVBRM0YBC564{id:02}"),
            status,
            completed_trips: 0,
            in_progress_trips: 0,
            average_rating: 0.0,
            total_revenue: 0.0,
            net_expenditures: 0.0,
        }
    }

    fn state_with(count: i64) -> UiState {
        let mut state = UiState::default();
        state.list_height = 3;
        state.set_drivers(
            (1..=count)
                .map(|id| summary(id, &format!("Driver {id}"), DriverStatus::Available))
                .collect(),
        );
        state
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = state_with(5);
        state.move_cursor(-1);
        assert_eq!(state.cursor, 0);
        state.move_cursor(10);
        assert_eq!(state.cursor, 4);
        assert_eq!(state.offset, 2);
        state.move_to(0);
        assert_eq!(state.offset, 0);
        state.page_down();
        assert_eq!(state.cursor, 3);
        state.move_to_end();
        assert_eq!(state.current_driver().map(|driver| driver.id), Some(5));
    }

    #[test]
    fn filter_matches_name_vin_id_and_status() {
        let mut state = UiState::default();
        state.set_drivers(vec![
            summary(54, "Rogers Bartell IV", DriverStatus::Available),
            summary(5, "Roger", DriverStatus::Unavailable),
            summary(3, "Lovelace", DriverStatus::Available),
        ]);

        state.filter = "roger".to_string();
        state.apply_filter();
        assert_eq!(state.filtered.len(), 2);

        state.filter = "unavailable".to_string();
        state.apply_filter();
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.filtered[0].id, 5);

        state.filter = "3".to_string();
        state.apply_filter();
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.filtered[0].name, "Lovelace");
    }

    #[test]
    fn select_driver_clears_hiding_filter() {
        let mut state = state_with(4);
        state.filter = "driver 1".to_string();
        state.apply_filter();
        assert_eq!(state.filtered.len(), 1);

        assert!(state.select_driver(3));
        assert!(state.filter.is_empty());
        assert_eq!(state.current_driver().map(|driver| driver.id), Some(3));
        assert!(!state.select_driver(99));
    }

    #[test]
    fn empty_state_has_no_selection() {
        let mut state = UiState::default();
        state.move_cursor(1);
        state.move_to_end();
        assert!(state.current_driver().is_none());
        assert!(state.visible_drivers(5).is_empty());
    }

    #[test]
    fn formats_money_and_ratings() {
        assert_eq!(format_currency(20.04), "$20.04");
        assert_eq!(format_currency(-4.04), "-$4.04");
        assert_eq!(format_currency(16.0 - 20.04), "-$4.04");
        assert_eq!(format_currency(-0.0), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_rating(0.0), "unrated");
        assert_eq!(format_rating(3.0), "3.00 / 5");
        assert_eq!(format_duration(chrono::Duration::minutes(125)), "2h 05m");
        assert_eq!(format_passenger(None), "-");
        assert_eq!(format_passenger(Some(Passenger::User(1))), "user 1");
    }
}
