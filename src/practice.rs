use serde::Deserialize;
use std::collections::HashSet;
use std::iter::successors;
use time::{format_description::FormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Length of a `YYYY-MM-DD` date string
const ISO_DATE_LEN: usize = 10;

const DAYS_IN_WEEK: usize = 7;

/// Body of the practice-dates endpoint
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct Payload {
    dates: Option<Vec<String>>,
}

/// The set of days on which a practice was recorded
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PracticedDateSet(HashSet<Date>);

impl PracticedDateSet {
    /// Parse a `{"dates": [...]}` document.  A missing or null `dates` field
    /// yields an empty set; entries that are not dates are skipped.
    pub(crate) fn from_json(body: &[u8]) -> Result<PracticedDateSet, serde_json::Error> {
        let payload = serde_json::from_slice::<Payload>(body)?;
        Ok(payload
            .dates
            .unwrap_or_default()
            .iter()
            .filter_map(|s| {
                let date = normalize(s);
                if date.is_none() {
                    log::warn!("Skipping unparseable practice date {s:?}");
                }
                date
            })
            .collect())
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.0.contains(&date)
    }

    /// Number of distinct days on which a practice was recorded
    pub(crate) fn total_days(&self) -> usize {
        self.0.len()
    }

    /// Length of the longest run of consecutive practiced days
    pub(crate) fn longest_streak(&self) -> usize {
        let mut dates = self.0.iter().copied().collect::<Vec<_>>();
        dates.sort_unstable();
        let mut longest = 0;
        let mut current = 0;
        let mut prev: Option<Date> = None;
        for date in dates {
            current = if prev.and_then(Date::next_day) == Some(date) {
                current + 1
            } else {
                1
            };
            longest = longest.max(current);
            prev = Some(date);
        }
        longest
    }

    /// Returns one record per day for the week ending on `today`, oldest
    /// first
    pub(crate) fn last_seven(&self, today: Date) -> Vec<PracticeRecord> {
        let mut days = successors(Some(today), |d| d.previous_day())
            .take(DAYS_IN_WEEK)
            .collect::<Vec<_>>();
        days.reverse();
        days.into_iter()
            .map(|date| PracticeRecord {
                date,
                practiced: self.contains(date),
            })
            .collect()
    }
}

impl FromIterator<Date> for PracticedDateSet {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        PracticedDateSet(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PracticeRecord {
    pub(crate) date: Date,
    pub(crate) practiced: bool,
}

// Accepts a bare date or anything that starts with one, such as a full
// timestamp
fn normalize(s: &str) -> Option<Date> {
    let s = s.trim();
    let prefix = s.get(..ISO_DATE_LEN)?;
    Date::parse(prefix, &YMD_FMT).ok()
}
