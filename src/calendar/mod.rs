mod month;
mod view;
mod widget;
pub(crate) use self::view::MonthView;
pub(crate) use self::widget::{MiniCalendar, CALENDAR_HEIGHT};
use crate::practice::PracticedDateSet;

/// Where the practiced dates are in their journey from the server
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum LoadState {
    #[default]
    Loading,
    Loaded(PracticedDateSet),
    Failed,
}

impl LoadState {
    pub(crate) fn practiced(&self) -> Option<&PracticedDateSet> {
        match self {
            LoadState::Loaded(practiced) => Some(practiced),
            _ => None,
        }
    }
}
