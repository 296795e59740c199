use crate::theme::HELP_KEY_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Key bindings and what they do, in the order shown
static BINDINGS: &[(&str, &str)] = &[
    ("h, p, ←", "Previous month"),
    ("l, n, →", "Next month"),
    ("0, Home", "Back to this month"),
    ("r", "Reload practice dates"),
    ("?", "Show this help"),
    ("q, Esc", "Quit"),
];

static DISMISS: &str = "Press any key to dismiss.";

/// Blank columns between a key and its description
const KEY_GAP: usize = 2;

/// Border plus padding on each side
const FRAME_WIDTH: u16 = 4;

const FRAME_HEIGHT: u16 = 2;

/// Key-binding overlay, centered over whatever is beneath it
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = BINDINGS
            .iter()
            .map(|&(keys, _)| Span::raw(keys).width())
            .max()
            .unwrap_or_default();
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{keys:<key_width$}"), HELP_KEY_STYLE),
                    Span::raw(" ".repeat(KEY_GAP)),
                    Span::raw(what),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(DISMISS).centered());
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Self::text();
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(FRAME_WIDTH);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(FRAME_HEIGHT);
        let [help_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [help_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}
