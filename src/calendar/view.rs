use super::month::first_of_month;
use thiserror::Error;
use time::{Date, Month};

/// Which month is on screen, relative to a fixed "today"
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    today: Date,
    // Invariant: always the first day of a month
    shown: Date,
}

impl MonthView {
    pub(crate) fn new(today: Date) -> Self {
        MonthView {
            today,
            shown: first_of_month(today),
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.shown = first_of_month(date);
        self
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn shown(&self) -> Date {
        self.shown
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.shown = first_of_month(self.today);
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let (year, month) = match self.shown.month() {
            Month::December => (
                self.shown.year().checked_add(1).ok_or(OutOfTimeError)?,
                Month::January,
            ),
            m => (self.shown.year(), m.next()),
        };
        self.shown = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        Ok(())
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let (year, month) = match self.shown.month() {
            Month::January => (
                self.shown.year().checked_sub(1).ok_or(OutOfTimeError)?,
                Month::December,
            ),
            m => (self.shown.year(), m.previous()),
        };
        self.shown = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_new() {
        let view = MonthView::new(date!(2026 - 10 - 18));
        assert_eq!(view.today(), date!(2026 - 10 - 18));
        assert_eq!(view.shown(), date!(2026 - 10 - 01));
    }

    #[test]
    fn test_start_date() {
        let view = MonthView::new(date!(2026 - 10 - 18)).start_date(date!(2025 - 03 - 14));
        assert_eq!(view.today(), date!(2026 - 10 - 18));
        assert_eq!(view.shown(), date!(2025 - 03 - 01));
    }

    #[test]
    fn test_next_month_across_year() {
        let mut view = MonthView::new(date!(2026 - 11 - 30));
        view.next_month().unwrap();
        assert_eq!(view.shown(), date!(2026 - 12 - 01));
        view.next_month().unwrap();
        assert_eq!(view.shown(), date!(2027 - 01 - 01));
    }

    #[test]
    fn test_previous_month_across_year() {
        let mut view = MonthView::new(date!(2026 - 02 - 10));
        view.previous_month().unwrap();
        assert_eq!(view.shown(), date!(2026 - 01 - 01));
        view.previous_month().unwrap();
        assert_eq!(view.shown(), date!(2025 - 12 - 01));
    }

    #[test]
    fn test_jump_to_today() {
        let mut view = MonthView::new(date!(2026 - 10 - 18));
        view.previous_month().unwrap();
        view.previous_month().unwrap();
        assert_eq!(view.shown(), date!(2026 - 08 - 01));
        view.jump_to_today();
        assert_eq!(view.shown(), date!(2026 - 10 - 01));
    }

    #[test]
    fn test_end_of_time() {
        let mut view = MonthView::new(Date::MAX);
        assert_eq!(view.next_month(), Err(OutOfTimeError));
        assert_eq!(view.shown(), date!(9999 - 12 - 01));
        view.previous_month().unwrap();
        assert_eq!(view.shown(), date!(9999 - 11 - 01));
    }

    #[test]
    fn test_start_of_time() {
        let mut view = MonthView::new(Date::MIN);
        assert_eq!(view.previous_month(), Err(OutOfTimeError));
        assert_eq!(view.shown(), Date::MIN);
    }
}
