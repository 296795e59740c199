use crate::practice::PracticeRecord;
use crate::theme::chart::{ACTIVE_STYLE, NEUTRAL_STYLE};
use ratatui::prelude::*;
use std::iter::zip;

/// Text that marks a list item as a day on which a practice was done
pub(crate) static DONE_MARKER: &str = "Done";

/// Number of leading characters of a `data-date` (the `YYYY-` part of an ISO
/// date) left out of its label
const LABEL_SKIP: usize = 5;

/// Number of blank columns on each side of a bar
const BAR_PADDING: u16 = 1;

/// Number of lines at the bottom of the chart reserved for the labels
const LABEL_LINES: u16 = 1;

const BAR_CHAR: &str = "█";

/// One day's bar in the chart
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeeklyEntry {
    pub(crate) label: String,
    pub(crate) done: bool,
}

impl WeeklyEntry {
    /// Build an entry from a list item of the stats page, given its
    /// `data-date` attribute (if any) and its text.  An item without a
    /// `data-date` gets an empty label.
    pub(crate) fn from_list_item(data_date: Option<&str>, text: &str) -> WeeklyEntry {
        WeeklyEntry {
            label: data_date.map_or_else(String::new, short_label),
            done: text.contains(DONE_MARKER),
        }
    }

    pub(crate) fn from_record(record: PracticeRecord) -> WeeklyEntry {
        WeeklyEntry {
            label: short_label(&record.date.to_string()),
            done: record.practiced,
        }
    }
}

fn short_label(data_date: &str) -> String {
    data_date.chars().skip(LABEL_SKIP).collect()
}

/// Parse list items saved one per line as `DATA-DATE|TEXT`.  A line without a
/// `|` is an item without a `data-date`.  Blank lines are ignored.
pub(crate) fn parse_week_list(s: &str) -> Vec<WeeklyEntry> {
    s.lines()
        .filter(|ln| !ln.trim().is_empty())
        .map(|ln| match ln.split_once('|') {
            Some((data_date, text)) => WeeklyEntry::from_list_item(Some(data_date.trim()), text),
            None => WeeklyEntry::from_list_item(None, ln),
        })
        .collect()
}

pub(crate) fn done_count(entries: &[WeeklyEntry]) -> usize {
    entries.iter().filter(|e| e.done).count()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BarGeometry {
    /// The slice of the chart's width given to the entry
    pub(crate) column: Rect,
    /// The filled part of the column; has zero height for days not done
    pub(crate) bar: Rect,
    pub(crate) style: Style,
}

/// Splits `area` evenly into one column per entry.  Returns nothing if there
/// are no entries or the area is too narrow to give each entry a column.
pub(crate) fn layout(area: Rect, entries: &[WeeklyEntry]) -> Vec<BarGeometry> {
    let Ok(count) = u16::try_from(entries.len()) else {
        return Vec::new();
    };
    if count == 0 || area.width < count {
        return Vec::new();
    }
    let column_width = area.width / count;
    let padding = if column_width > BAR_PADDING * 2 {
        BAR_PADDING
    } else {
        0
    };
    let plot_height = area.height.saturating_sub(LABEL_LINES);
    zip(0u16.., entries)
        .map(|(i, entry)| {
            let x = area.x + i * column_width;
            let height = if entry.done { plot_height } else { 0 };
            BarGeometry {
                column: Rect::new(x, area.y, column_width, area.height),
                bar: Rect::new(
                    x + padding,
                    area.y + plot_height - height,
                    column_width - padding * 2,
                    height,
                ),
                style: if entry.done {
                    ACTIVE_STYLE
                } else {
                    NEUTRAL_STYLE
                },
            }
        })
        .collect()
}

/// Bar chart with one full-height bar per practiced day and one empty column
/// per skipped day, each labelled beneath
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeeklyChart<'a> {
    entries: &'a [WeeklyEntry],
}

impl<'a> WeeklyChart<'a> {
    pub(crate) fn new(entries: &'a [WeeklyEntry]) -> Self {
        WeeklyChart { entries }
    }
}

impl Widget for WeeklyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for pos in area.positions() {
            buf[pos].set_symbol(" ");
        }
        if area.is_empty() {
            return;
        }
        let label_y = area.bottom() - LABEL_LINES;
        for (geom, entry) in zip(layout(area, self.entries), self.entries) {
            let bar = geom.bar;
            for y in bar.top()..bar.bottom() {
                buf.set_string(bar.x, y, BAR_CHAR.repeat(bar.width.into()), geom.style);
            }
            let width = u16::try_from(Span::raw(&entry.label).width()).unwrap_or(u16::MAX);
            let x = geom.column.x + geom.column.width.saturating_sub(width) / 2;
            buf.set_stringn(
                x,
                label_y,
                &entry.label,
                usize::from(geom.column.width),
                geom.style,
            );
        }
    }
}
