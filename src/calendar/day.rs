use super::grid::DayCell;
use crate::theme::{BASE_STYLE, OUTSIDE_MONTH_STYLE, SELECTED_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Widget,
};

/// Columns taken up by a day's label, including its brackets or padding
pub(super) const LABEL_WIDTH: u16 = 4;

static BOOKED_MARKER: &str = "▀▀▀▀";

/// A single day of the calendar: the day-of-month label, with a marker bar
/// beneath it if the day is booked
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Day<'a> {
    cell: &'a DayCell,
    booked_style: Style,
    is_cursor: bool,
    is_today: bool,
}

impl<'a> Day<'a> {
    pub(super) fn new(cell: &'a DayCell, booked_style: Style) -> Self {
        Day {
            cell,
            booked_style,
            is_cursor: false,
            is_today: false,
        }
    }

    pub(super) fn cursor(mut self, yes: bool) -> Self {
        self.is_cursor = yes;
        self
    }

    pub(super) fn today(mut self, yes: bool) -> Self {
        self.is_today = yes;
        self
    }

    fn label(&self) -> String {
        if self.is_cursor {
            format!("[{}]", self.cell.label())
        } else {
            format!(" {} ", self.cell.label())
        }
    }

    fn label_style(&self) -> Style {
        let mut style = if self.cell.in_month {
            BASE_STYLE
        } else {
            OUTSIDE_MONTH_STYLE
        };
        if self.cell.booked {
            style = style.patch(self.booked_style);
        }
        if self.cell.selected {
            style = style.patch(SELECTED_STYLE);
        }
        if self.is_today {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

impl Widget for Day<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        Line::styled(self.label(), self.label_style()).render(Rect { height: 1, ..area }, buf);
        if self.cell.booked && area.height > 1 {
            Line::styled(BOOKED_MARKER, self.booked_style).render(
                Rect {
                    y: area.y + 1,
                    height: 1,
                    ..area
                },
                buf,
            );
        }
    }
}
