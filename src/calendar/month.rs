use crate::practice::PracticedDateSet;
use std::iter::{repeat_n, successors};
use time::{Date, Month, Weekday};

const DAYS_IN_WEEK: usize = 7;

trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayCell {
    /// Padding before the first day of the month
    Blank,
    Day { date: Date, practiced: bool },
}

/// The cells of one month laid out Sunday through Saturday
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    first: Date,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `date`
    pub(crate) fn new(date: Date, practiced: &PracticedDateSet) -> MonthGrid {
        let first = first_of_month(date);
        let blanks = usize::from(first.weekday().index0());
        let cells = repeat_n(DayCell::Blank, blanks)
            .chain(
                successors(Some(first), |d| d.next_day())
                    .take_while(|d| d.month() == first.month())
                    .map(|date| DayCell::Day {
                        date,
                        practiced: practiced.contains(date),
                    }),
            )
            .collect();
        MonthGrid { first, cells }
    }

    pub(crate) fn year(&self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first.month()
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[DayCell]> + '_ {
        self.cells.chunks(DAYS_IN_WEEK)
    }
}

pub(super) fn first_of_month(date: Date) -> Date {
    successors(Some(date), |d| d.previous_day())
        .take(usize::from(date.day()))
        .last()
        .unwrap_or(date)
}
