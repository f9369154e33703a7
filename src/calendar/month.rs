use super::grid::{MonthGrid, OutOfTimeError, YearMonth};
use super::selection::{RangeSelection, SelectionEvent};
use super::widget::{locate, Spot};
use super::BookingLookup;
use crate::booking::Booking;
use ratatui::layout::Position;
use time::{Date, Duration};

/// State of the calendar: which month is shown, where the keyboard cursor
/// is, and what has been selected so far
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthWindow<B> {
    pub(super) today: Date,
    cursor: Date,
    grid: MonthGrid,
    selection: RangeSelection,
    bookings: B,
    /// Top-left corner of the calendar as of the last render, used to map
    /// mouse clicks back to days
    pub(super) origin: Option<Position>,
}

impl<B: BookingLookup> MonthWindow<B> {
    pub(crate) fn new(today: Date, bookings: B) -> Result<Self, OutOfTimeError> {
        let selection = RangeSelection::default();
        let grid = MonthGrid::build(YearMonth::of(today), &bookings, &selection)?;
        Ok(MonthWindow {
            today,
            cursor: today,
            grid,
            selection,
            bookings,
            origin: None,
        })
    }

    pub(crate) fn start_date(mut self, date: Date) -> Result<Self, OutOfTimeError> {
        self.show(YearMonth::of(date))?;
        self.cursor = date;
        Ok(self)
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub(crate) fn selection(&self) -> RangeSelection {
        self.selection
    }

    pub(crate) fn booking_at(&self, date: Date) -> Option<&Booking> {
        self.bookings.booking_on(date)
    }

    fn show(&mut self, month: YearMonth) -> Result<(), OutOfTimeError> {
        self.grid = MonthGrid::build(month, &self.bookings, &self.selection)?;
        Ok(())
    }

    /// Replace the bookings.  On error, the old bookings and grid are kept.
    pub(crate) fn set_bookings(&mut self, bookings: B) -> Result<(), OutOfTimeError> {
        self.grid = MonthGrid::build(self.grid.month(), &bookings, &self.selection)?;
        self.bookings = bookings;
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = self.grid.month().succ().ok_or(OutOfTimeError)?;
        self.page_to(month)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = self.grid.month().pred().ok_or(OutOfTimeError)?;
        self.page_to(month)
    }

    fn page_to(&mut self, month: YearMonth) -> Result<(), OutOfTimeError> {
        self.show(month)?;
        if let Some(first) = self.grid.first_of_month() {
            self.cursor = first;
        }
        tracing::debug!(%month, "paged to month");
        Ok(())
    }

    /// Move the cursor by `days` days, switching to the cursor's month if it
    /// leaves the grid
    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let date = self
            .cursor
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        if !self.grid.contains(date) {
            self.show(YearMonth::of(date))?;
        }
        self.cursor = date;
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) -> Result<(), OutOfTimeError> {
        self.show(YearMonth::of(self.today))?;
        self.cursor = self.today;
        Ok(())
    }

    /// Click on a visible day.  Returns `None` if `date` is not on the grid.
    pub(crate) fn click(&mut self, date: Date) -> Option<SelectionEvent> {
        let cell = self.grid.get(date)?;
        tracing::debug!(date = %cell.key(), booked = cell.booked, "clicked day");
        let event = self.selection.click(cell);
        self.grid.mark(&self.selection);
        self.cursor = date;
        Some(event)
    }

    pub(crate) fn click_cursor(&mut self) -> Option<SelectionEvent> {
        self.click(self.cursor)
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.grid.mark(&self.selection);
    }

    /// Map a terminal position to whatever was drawn there on the last
    /// render
    pub(crate) fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        let origin = self.origin?;
        let x = column.checked_sub(origin.x)?;
        let y = row.checked_sub(origin.y)?;
        match locate(x, y)? {
            Spot::Previous => Some(HitTarget::Previous),
            Spot::Next => Some(HitTarget::Next),
            Spot::Cell(i) => self.grid.days().get(i).map(|c| HitTarget::Day(c.date)),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HitTarget {
    Previous,
    Next,
    Day(Date),
}
