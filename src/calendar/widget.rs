use super::day::{Day, LABEL_WIDTH};
use super::grid::{YearMonth, DAYS_IN_WEEK};
use super::month::MonthWindow;
use super::selection::RangeSelection;
use super::BookingLookup;
use crate::theme::{ARROW_STYLE, STATUS_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, StatefulWidget, Widget},
};
use std::iter::zip;
use std::marker::PhantomData;

static HEADER: &str = " MON   TUE   WED   THU   FRI   SAT   SUN  ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 42;

const TITLE_LINE: u16 = 0;

const RULE_LINE: u16 = 1;

const WEEKDAY_LINE: u16 = 2;

/// Line on which the first week is drawn
const GRID_TOP: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Most weeks a month can span
const MAX_WEEKS: u16 = 6;

/// The status line sits below the tallest possible grid so that it doesn't
/// move around when paging
const STATUS_LINE: u16 = GRID_TOP + MAX_WEEKS * WEEK_LINES;

const PREV_ARROW_COL: u16 = MAIN_WIDTH - 6;

const NEXT_ARROW_COL: u16 = MAIN_WIDTH - 3;

/// Mouse clicks this many columns to either side of an arrow still count
const ARROW_SLACK: u16 = 1;

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<B> {
    booked_style: Style,
    _data: PhantomData<B>,
}

impl<B> Calendar<B> {
    pub(crate) fn new(booked_style: Style) -> Calendar<B> {
        Calendar {
            booked_style,
            _data: PhantomData,
        }
    }
}

impl<B: BookingLookup> StatefulWidget for Calendar<B> {
    type State = MonthWindow<B>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: area.width.min(MAIN_WIDTH),
            ..area
        };
        state.origin = Some(Position::new(area.x, area.y));
        let today = state.today;
        let cursor = state.cursor();
        let grid = state.grid();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(grid.month());
        canvas.draw_weekdays();
        for (i, week) in zip(0u16.., grid.weeks()) {
            for (j, cell) in zip(0u16.., week) {
                let day = Day::new(cell, self.booked_style)
                    .cursor(cell.date == cursor)
                    .today(cell.date == today);
                canvas.draw_day(i, j, day);
            }
        }
        canvas.draw_status(&status(state.selection()));
    }
}

fn status(selection: RangeSelection) -> String {
    match selection {
        RangeSelection::Empty => String::from("Pick a start date"),
        RangeSelection::Started(start) => format!("From {start}, pick an end date"),
        RangeSelection::Complete { start, end } => {
            let days = selection.days().unwrap_or_default();
            let unit = if days == 1 { "day" } else { "days" };
            format!("{start} to {end} ({days} {unit})")
        }
    }
}

/// Something drawn at a position relative to the calendar's top-left corner
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Spot {
    Previous,
    Next,
    /// Index into the grid's days; may be past the end for short months
    Cell(usize),
}

pub(super) fn locate(x: u16, y: u16) -> Option<Spot> {
    if y == TITLE_LINE {
        if x.abs_diff(PREV_ARROW_COL) <= ARROW_SLACK {
            Some(Spot::Previous)
        } else if x.abs_diff(NEXT_ARROW_COL) <= ARROW_SLACK {
            Some(Spot::Next)
        } else {
            None
        }
    } else if (GRID_TOP..STATUS_LINE).contains(&y) && x < MAIN_WIDTH {
        let week = usize::from((y - GRID_TOP) / WEEK_LINES);
        let wd = usize::from(x / DAY_WIDTH);
        Some(Spot::Cell(week * DAYS_IN_WEEK + wd))
    } else {
        None
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, month: YearMonth) {
        self.mvprint(TITLE_LINE, 1, month.to_string(), TITLE_STYLE);
        self.mvprint(TITLE_LINE, PREV_ARROW_COL, "←", ARROW_STYLE);
        self.mvprint(TITLE_LINE, NEXT_ARROW_COL, "→", ARROW_STYLE);
        self.hline(RULE_LINE, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_weekdays(&mut self) {
        self.mvprint(WEEKDAY_LINE, 0, HEADER, WEEKDAY_STYLE);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, day: Day<'_>) {
        let y = GRID_TOP + week_no * WEEK_LINES;
        let x = col * DAY_WIDTH;
        if y < self.area.height && x < self.area.width {
            let area = Rect {
                x: x + self.area.x,
                y: y + self.area.y,
                width: LABEL_WIDTH,
                height: WEEK_LINES,
            }
            .intersection(self.area);
            day.render(area, self.buf);
        }
    }

    fn draw_status(&mut self, s: &str) {
        self.mvprint(STATUS_LINE, 1, s, STATUS_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text that extends beyond the calendar's
            // area, but the Rect passed to it still has to lie entirely
            // within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(
            y,
            x,
            String::from(ch).repeat(length.into()),
            Style::default(),
        );
    }
}
