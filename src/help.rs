use crate::popup::Popup;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::Widget,
};

static TEXT: &[&str] = &[
    "h, l, LEFT, RIGHT   Previous/next day",
    "k, j, UP, DOWN      Previous/next week",
    "p, <, PAGE UP       Previous month",
    "n, >, PAGE DOWN     Next month",
    "ENTER, SPACE        Pick day as range start/end",
    "c, BACKSPACE        Clear selection",
    "t, HOME             Jump to today",
    "r                   Reload bookings",
    "?                   Show this help",
    "q, ESC              Quit",
    "",
    "Click a day to pick it, or an arrow to change month.",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s)));
        Popup::new(String::from(" Commands "), text, self.0).render(area, buf);
    }
}
