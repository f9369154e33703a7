use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const ARROW_STYLE: Style = BASE_STYLE.fg(Color::LightCyan).add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const OUTSIDE_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightCyan);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const DEFAULT_BOOKED_COLOR: Color = Color::LightRed;

pub(crate) mod details {
    use super::*;

    pub(crate) const FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const APPROVED_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

    pub(crate) const PENDING_STYLE: Style = BASE_STYLE.fg(Color::Yellow);
}
