use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const MONTH_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const PRACTICED_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

pub(crate) const FUTURE_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const STATS_STYLE: Style = Style::new().fg(Color::LightGreen);

pub(crate) const HELP_KEY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) mod chart {
    use super::*;

    pub(crate) const ACTIVE_STYLE: Style = Style::new().fg(Color::Green);

    pub(crate) const NEUTRAL_STYLE: Style = Style::new().fg(Color::Gray);

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}
