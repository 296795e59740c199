use super::month::{DayCell, MonthGrid};
use super::view::MonthView;
use super::LoadState;
use crate::theme::{FUTURE_STYLE, MONTH_STYLE, PRACTICED_STYLE, WEEKDAY_STYLE};
use ratatui::prelude::*;
use ratatui::widgets::Clear;
use std::iter::zip;
use time::{Date, Month};

static HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

pub(crate) static LOADING_MESSAGE: &str = "Loading calendar…";

pub(crate) static FAILURE_MESSAGE: &str = "Unable to load calendar.";

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 28;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Number of lines taken up by the title, the weekday names, and the rule
/// beneath them
const HEADER_LINES: u16 = 3;

/// No month spans more than six Sunday-to-Saturday weeks
const MAX_WEEKS: u16 = 6;

/// Number of lines needed to show any month
pub(crate) const CALENDAR_HEIGHT: u16 = HEADER_LINES + MAX_WEEKS;

const ACS_HLINE: char = '─';

/// A single month with the practiced days highlighted.  While the dates are
/// loading, or if they failed to load, a message is shown in place of the
/// grid.  Whatever was in the area before is erased.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MiniCalendar<'a> {
    view: &'a MonthView,
    dates: &'a LoadState,
    style: Style,
}

impl<'a> MiniCalendar<'a> {
    pub(crate) fn new(view: &'a MonthView, dates: &'a LoadState) -> Self {
        MiniCalendar {
            view,
            dates,
            style: Style::new(),
        }
    }

    /// Style applied to the whole area after it is erased
    pub(crate) fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for MiniCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        Clear.render(area, buf);
        buf.set_style(area, self.style);
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: area.width.min(MAIN_WIDTH),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        match self.dates {
            LoadState::Loading => canvas.draw_message(LOADING_MESSAGE),
            LoadState::Failed => canvas.draw_message(FAILURE_MESSAGE),
            LoadState::Loaded(practiced) => {
                let grid = MonthGrid::new(self.view.shown(), practiced);
                let today = self.view.today();
                canvas.draw_title(grid.year(), grid.month());
                canvas.draw_header();
                for (week_no, row) in zip(0u16.., grid.rows()) {
                    for (col, cell) in zip(0u16.., row) {
                        if let DayCell::Day { date, practiced } = *cell {
                            canvas.draw_day(week_no, col, date, practiced, today);
                        }
                    }
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_message(&mut self, msg: &str) {
        let x = self.centered(msg);
        self.mvprint(0, x, msg, Style::new());
    }

    fn draw_title(&mut self, year: i32, month: Month) {
        let title = format!("{month} {year}");
        let x = self.centered(&title);
        self.mvprint(0, x, title, MONTH_STYLE);
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, WEEKDAY_STYLE);
        self.mvprint(
            2,
            0,
            String::from(ACS_HLINE).repeat(MAIN_WIDTH.into()),
            Style::new(),
        );
    }

    fn draw_day(&mut self, week_no: u16, col: u16, date: Date, practiced: bool, today: Date) {
        let s = if date == today {
            format!("[{:2}]", date.day())
        } else {
            format!(" {:2} ", date.day())
        };
        let style = if practiced {
            PRACTICED_STYLE
        } else if date > today {
            FUTURE_STYLE
        } else {
            Style::new()
        };
        self.mvprint(week_no + HEADER_LINES, DAY_WIDTH * col, s, style);
    }

    // Column at which `s` must start in order to be centered
    fn centered(&self, s: &str) -> u16 {
        let width = u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX);
        self.area.width.saturating_sub(width) / 2
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::PracticedDateSet;
    use time::macros::date;

    fn october() -> MonthView {
        MonthView::new(date!(2026 - 10 - 18))
    }

    #[test]
    fn test_loaded() {
        let view = october();
        let dates = LoadState::Loaded(PracticedDateSet::from_iter([
            date!(2026 - 09 - 30),
            date!(2026 - 10 - 01),
            date!(2026 - 10 - 18),
            date!(2026 - 10 - 25),
        ]));
        let area = Rect::new(0, 0, 28, 8);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &dates).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "        October 2026        ",
            " Su  Mo  Tu  We  Th  Fr  Sa ",
            "────────────────────────────",
            "                  1   2   3 ",
            "  4   5   6   7   8   9  10 ",
            " 11  12  13  14  15  16  17 ",
            "[18] 19  20  21  22  23  24 ",
            " 25  26  27  28  29  30  31 ",
        ]);
        expected.set_style(Rect::new(8, 0, 12, 1), MONTH_STYLE);
        expected.set_style(Rect::new(0, 1, 28, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(16, 3, 4, 1), PRACTICED_STYLE);
        expected.set_style(Rect::new(0, 6, 4, 1), PRACTICED_STYLE);
        expected.set_style(Rect::new(4, 6, 24, 1), FUTURE_STYLE);
        expected.set_style(Rect::new(0, 7, 4, 1), PRACTICED_STYLE);
        expected.set_style(Rect::new(4, 7, 24, 1), FUTURE_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_other_month_is_not_future_styled() {
        let view = october().start_date(date!(2026 - 08 - 01));
        let dates = LoadState::Loaded(PracticedDateSet::from_iter([date!(2026 - 08 - 01)]));
        let area = Rect::new(0, 0, 28, 9);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &dates).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "        August 2026         ",
            " Su  Mo  Tu  We  Th  Fr  Sa ",
            "────────────────────────────",
            "                          1 ",
            "  2   3   4   5   6   7   8 ",
            "  9  10  11  12  13  14  15 ",
            " 16  17  18  19  20  21  22 ",
            " 23  24  25  26  27  28  29 ",
            " 30  31                     ",
        ]);
        expected.set_style(Rect::new(8, 0, 11, 1), MONTH_STYLE);
        expected.set_style(Rect::new(0, 1, 28, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(24, 3, 4, 1), PRACTICED_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_failed_is_centered() {
        let view = october();
        let area = Rect::new(0, 0, 40, 3);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &LoadState::Failed).render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "        Unable to load calendar.        ",
            "                                        ",
            "                                        ",
        ]);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_loading() {
        let view = october();
        let area = Rect::new(0, 0, 40, 1);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &LoadState::Loading).render(area, &mut buffer);
        let expected = Buffer::with_lines(["           Loading calendar…            "]);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_empty_area() {
        let view = october();
        let dates = LoadState::Loaded(PracticedDateSet::default());
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 3));
        MiniCalendar::new(&view, &dates).render(Rect::new(0, 0, 0, 0), &mut buffer);
        assert_eq!(buffer, Buffer::empty(Rect::new(0, 0, 10, 3)));
    }

    #[test]
    fn test_failed_erases_grid() {
        let view = october();
        let loaded = LoadState::Loaded(PracticedDateSet::from_iter([date!(2026 - 10 - 18)]));
        let area = Rect::new(0, 0, 28, 8);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &loaded).render(area, &mut buffer);
        MiniCalendar::new(&view, &LoadState::Failed).render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "  Unable to load calendar.  ",
            "                            ",
            "                            ",
            "                            ",
            "                            ",
            "                            ",
            "                            ",
            "                            ",
        ]);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_loading_erases_grid_and_keeps_style() {
        let view = october();
        let loaded = LoadState::Loaded(PracticedDateSet::default());
        let style = Style::new().fg(Color::White).bg(Color::Black);
        let area = Rect::new(0, 0, 28, 4);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &loaded)
            .style(style)
            .render(area, &mut buffer);
        MiniCalendar::new(&view, &LoadState::Loading)
            .style(style)
            .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "     Loading calendar…      ",
            "                            ",
            "                            ",
            "                            ",
        ]);
        expected.set_style(area, style);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_truncated() {
        let view = october();
        let dates = LoadState::Loaded(PracticedDateSet::default());
        let area = Rect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        MiniCalendar::new(&view, &dates).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "October 20",
            " Su  Mo  T",
            "──────────",
            "          ",
        ]);
        expected.set_style(Rect::new(0, 0, 10, 1), MONTH_STYLE);
        expected.set_style(Rect::new(0, 1, 10, 1), WEEKDAY_STYLE);
        assert_eq!(buffer, expected);
    }
}
