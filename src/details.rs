use crate::booking::Booking;
use crate::popup::Popup;
use crate::theme::details::{APPROVED_STYLE, FIELD_STYLE, PENDING_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// Popup describing the booking behind a clicked day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BookingDetails<'a> {
    booking: &'a Booking,
    style: Style,
}

impl<'a> BookingDetails<'a> {
    pub(crate) fn new(booking: &'a Booking, style: Style) -> Self {
        BookingDetails { booking, style }
    }

    fn to_text(self) -> Text<'a> {
        let b = self.booking;
        let approval = match b.approved {
            Some(true) => Span::styled("approved", APPROVED_STYLE),
            Some(false) => Span::styled("not approved", PENDING_STYLE),
            None => Span::styled("unknown", self.style),
        };
        let mut lines = vec![
            field("Title", b.title.as_deref().unwrap_or("(untitled)")),
            field("Owner", b.owner.as_deref().unwrap_or("(nobody)")),
            field("From", &b.start_date.to_string()),
            field("Until", &b.end_date.to_string()),
            Line::from_iter([Span::styled(format!("{:<8}", "Status"), FIELD_STYLE), approval]),
        ];
        if let Some(desc) = b.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(Line::raw(""));
            lines.extend(desc.lines().map(|ln| Line::raw(ln.to_owned())));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

fn field(name: &str, value: &str) -> Line<'static> {
    Line::from_iter([
        Span::styled(format!("{name:<8}"), FIELD_STYLE),
        Span::raw(value.to_owned()),
    ])
}

impl Widget for BookingDetails<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Booking #{} ", self.booking.id);
        Popup::new(title, self.to_text(), self.style).render(area, buf);
    }
}
