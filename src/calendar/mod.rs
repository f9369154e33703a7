mod day;
mod grid;
mod month;
mod selection;
mod widget;
pub(crate) use self::month::{HitTarget, MonthWindow};
pub(crate) use self::selection::{RangeSelection, SelectionEvent};
pub(crate) use self::widget::Calendar;
use crate::booking::Booking;
use time::Date;

/// Source of the reservations shown on the calendar
pub(crate) trait BookingLookup {
    /// Returns the booking covering `date`, if any
    fn booking_on(&self, date: Date) -> Option<&Booking>;
}
