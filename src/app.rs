use crate::calendar::{LoadState, MiniCalendar, MonthView, CALENDAR_HEIGHT};
use crate::chart::{done_count, WeeklyChart, WeeklyEntry};
use crate::help::Help;
use crate::practice::PracticedDateSet;
use crate::source::{FetchError, Loader};
use crate::theme::{chart::TITLE_STYLE, BASE_STYLE, STATS_STYLE};
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};
use std::time::Duration;

/// How long to wait for a key press before checking for finished fetches
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Maximum width of the chart's box, enough for seven six-column bars
const CHART_WIDTH: u16 = 44;

const CHART_HEIGHT: u16 = 10;

/// Lines between the calendar and the chart used for the practice totals
const STATS_HEIGHT: u16 = 1;

/// Where the weekly chart gets its entries from
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum WeekSource {
    /// The last seven days ending today, looked up in the fetched dates
    Derived,
    /// A fixed list supplied at startup
    Listed(Vec<WeeklyEntry>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    view: MonthView,
    dates: LoadState,
    week: WeekSource,
    state: AppState,
    reload_requested: bool,
}

impl App {
    pub(crate) fn new(view: MonthView, week: WeekSource) -> App {
        App {
            view,
            dates: LoadState::Loading,
            week,
            state: AppState::Calendar,
            reload_requested: false,
        }
    }

    pub(crate) fn run(
        mut self,
        mut terminal: DefaultTerminal,
        loader: &mut Loader,
    ) -> io::Result<()> {
        while !self.quitting() {
            while let Some(r) = loader.try_recv() {
                self.apply(r);
            }
            if std::mem::take(&mut self.reload_requested) {
                self.dates = LoadState::Loading;
                loader.spawn();
            }
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            if poll(POLL_INTERVAL)? {
                self.handle_input()?;
            }
        }
        Ok(())
    }

    /// Replace the calendar's contents with the outcome of a fetch
    pub(crate) fn apply(&mut self, r: Result<PracticedDateSet, FetchError>) {
        self.dates = match r {
            Ok(practiced) => LoadState::Loaded(practiced),
            Err(e) => {
                log::error!("Unable to load calendar: {:#}", anyhow::Error::new(e));
                LoadState::Failed
            }
        };
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h' | 'p') | KeyCode::Left => self.view.previous_month().is_ok(),
                KeyCode::Char('l' | 'n') | KeyCode::Right => self.view.next_month().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.view.jump_to_today();
                    true
                }
                KeyCode::Char('r') => {
                    self.reload_requested = true;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn week_entries(&self) -> Vec<WeeklyEntry> {
        match &self.week {
            WeekSource::Listed(entries) => entries.clone(),
            WeekSource::Derived => {
                let nothing = PracticedDateSet::default();
                self.dates
                    .practiced()
                    .unwrap_or(&nothing)
                    .last_seven(self.view.today())
                    .into_iter()
                    .map(WeeklyEntry::from_record)
                    .collect()
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, stats_area, chart_area] = Layout::vertical([
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(STATS_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(area);
        MiniCalendar::new(&self.view, &self.dates)
            .style(BASE_STYLE)
            .render(cal_area, buf);
        if let Some(practiced) = self.dates.practiced() {
            Line::from(format!(
                "Total days: {}   Longest streak: {}",
                practiced.total_days(),
                practiced.longest_streak()
            ))
            .style(STATS_STYLE)
            .centered()
            .render(stats_area, buf);
        }
        let entries = self.week_entries();
        let [chart_area] = Layout::horizontal([Constraint::Max(CHART_WIDTH)])
            .flex(Flex::Center)
            .areas(chart_area);
        let [chart_area] = Layout::vertical([Constraint::Max(CHART_HEIGHT)]).areas(chart_area);
        let block = Block::bordered()
            .title(format!(
                " Last 7 days: {}/{} ",
                done_count(&entries),
                entries.len()
            ))
            .title_alignment(Alignment::Center)
            .title_style(TITLE_STYLE);
        let inner = block.inner(chart_area);
        block.render(chart_area, buf);
        WeeklyChart::new(&entries).render(inner, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
