use super::selection::RangeSelection;
use super::BookingLookup;
use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month};

pub(super) const DAYS_IN_WEEK: usize = 7;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn of(date: Date) -> YearMonth {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn first_day(self) -> Result<Date, OutOfTimeError> {
        Date::from_calendar_date(self.year, self.month, 1).map_err(|_| OutOfTimeError)
    }

    pub(crate) fn succ(self) -> Option<YearMonth> {
        let year = if self.month == Month::December {
            self.year.checked_add(1)?
        } else {
            self.year
        };
        Some(YearMonth {
            year,
            month: self.month.next(),
        })
    }

    pub(crate) fn pred(self) -> Option<YearMonth> {
        let year = if self.month == Month::January {
            self.year.checked_sub(1)?
        } else {
            self.year
        };
        Some(YearMonth {
            year,
            month: self.month.previous(),
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.month.to_string();
        write!(f, "{} {}", name.get(..3).unwrap_or(name.as_str()), self.year)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) booked: bool,
    /// Owner of the booking covering this day, if it names one
    pub(crate) booked_by: Option<String>,
    pub(crate) selected: bool,
    /// `false` for the leading & trailing days borrowed from adjacent months
    pub(crate) in_month: bool,
}

impl DayCell {
    pub(crate) fn label(&self) -> String {
        format!("{:02}", self.date.day())
    }

    pub(crate) fn key(&self) -> String {
        self.date.to_string()
    }
}

/// The days displayed for a single month: whole Monday-to-Sunday weeks
/// running from the week containing the 1st through the week containing the
/// last day of the month
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month: YearMonth,
    // Invariant: nonempty, and the length is a multiple of DAYS_IN_WEEK
    days: Vec<DayCell>,
}

impl MonthGrid {
    pub(crate) fn build<B: BookingLookup>(
        month: YearMonth,
        bookings: &B,
        selection: &RangeSelection,
    ) -> Result<MonthGrid, OutOfTimeError> {
        let first = month.first_day()?;
        let last = iter_days_from(first)
            .take_while(|d| d.month() == first.month())
            .last()
            .unwrap_or(first);
        let start = iter_days_before(first)
            .nth(usize::from(first.weekday().number_days_from_monday()))
            .ok_or(OutOfTimeError)?;
        let end = iter_days_from(last)
            .nth(usize::from(6 - last.weekday().number_days_from_monday()))
            .ok_or(OutOfTimeError)?;
        let days = iter_days_from(start)
            .take_while(|&d| d <= end)
            .map(|date| {
                let booking = bookings.booking_on(date);
                DayCell {
                    date,
                    booked: booking.is_some(),
                    booked_by: booking.and_then(|b| b.owner.clone()),
                    selected: selection.contains(date),
                    in_month: date.month() == first.month(),
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(%month, cells = days.len(), "built month grid");
        Ok(MonthGrid { month, days })
    }

    pub(crate) fn mark(&mut self, selection: &RangeSelection) {
        for cell in &mut self.days {
            cell.selected = selection.contains(cell.date);
        }
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn days(&self) -> &[DayCell] {
        &self.days
    }

    pub(crate) fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.days.chunks(DAYS_IN_WEEK)
    }

    pub(crate) fn get(&self, date: Date) -> Option<&DayCell> {
        // Cells are consecutive days, so the index is the offset from the
        // first one.
        let offset = (date - self.days.first()?.date).whole_days();
        self.days.get(usize::try_from(offset).ok()?)
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.get(date).is_some()
    }

    pub(crate) fn first_of_month(&self) -> Option<Date> {
        self.days.iter().find(|c| c.in_month).map(|c| c.date)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

// Yields `date` itself first
fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

// Yields `date` itself first
fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Booking;
    use time::macros::date;
    use time::Weekday;

    struct NoBookings;

    impl BookingLookup for NoBookings {
        fn booking_on(&self, _date: Date) -> Option<&Booking> {
            None
        }
    }

    struct OneBooking(Booking);

    impl BookingLookup for OneBooking {
        fn booking_on(&self, date: Date) -> Option<&Booking> {
            self.0.contains(date).then_some(&self.0)
        }
    }

    fn build(year: i32, month: Month) -> MonthGrid {
        MonthGrid::build(
            YearMonth { year, month },
            &NoBookings,
            &RangeSelection::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_leading_and_trailing_days() {
        let grid = build(2026, Month::October);
        assert_eq!(grid.days().len(), 35);
        assert_eq!(grid.days()[0].date, date!(2026 - 09 - 28));
        assert_eq!(grid.days()[34].date, date!(2026 - 11 - 01));
        assert!(!grid.days()[2].in_month);
        assert!(grid.days()[3].in_month);
        assert_eq!(grid.days()[3].date, date!(2026 - 10 - 01));
        assert!(!grid.days()[34].in_month);
        assert_eq!(grid.first_of_month(), Some(date!(2026 - 10 - 01)));
    }

    #[test]
    fn test_month_starting_on_monday() {
        let grid = build(2026, Month::June);
        assert_eq!(grid.days()[0].date, date!(2026 - 06 - 01));
        assert_eq!(grid.days().last().map(|c| c.date), Some(date!(2026 - 07 - 05)));
    }

    #[test]
    fn test_month_ending_on_sunday() {
        let grid = build(2026, Month::May);
        assert_eq!(grid.days()[0].date, date!(2026 - 04 - 27));
        assert_eq!(grid.days().last().map(|c| c.date), Some(date!(2026 - 05 - 31)));
        assert_eq!(grid.weeks().count(), 5);
    }

    #[test]
    fn test_four_week_february() {
        let grid = build(2027, Month::February);
        assert_eq!(grid.days().len(), 28);
        assert!(grid.days().iter().all(|c| c.in_month));
    }

    #[test]
    fn test_six_week_month() {
        let grid = build(2026, Month::August);
        assert_eq!(grid.weeks().count(), 6);
        assert_eq!(grid.days()[0].date, date!(2026 - 07 - 27));
        assert_eq!(grid.days().last().map(|c| c.date), Some(date!(2026 - 09 - 06)));
        assert!(grid.weeks().all(|w| w.len() == DAYS_IN_WEEK));
    }

    #[test]
    fn test_weeks_start_on_monday() {
        let grid = build(2026, Month::October);
        for week in grid.weeks() {
            assert_eq!(week[0].date.weekday(), Weekday::Monday);
            assert_eq!(week[6].date.weekday(), Weekday::Sunday);
        }
    }

    #[test]
    fn test_booked_days() {
        let bookings = OneBooking(Booking {
            id: 1,
            owner: Some(String::from("alice")),
            title: None,
            description: None,
            start_date: date!(2026 - 09 - 29),
            end_date: date!(2026 - 10 - 02),
            approved: Some(true),
        });
        let grid = MonthGrid::build(
            YearMonth::of(date!(2026 - 10 - 19)),
            &bookings,
            &RangeSelection::default(),
        )
        .unwrap();
        let booked = grid
            .days()
            .iter()
            .filter(|c| c.booked)
            .map(|c| c.date)
            .collect::<Vec<_>>();
        assert_eq!(
            booked,
            [
                date!(2026 - 09 - 29),
                date!(2026 - 09 - 30),
                date!(2026 - 10 - 01),
                date!(2026 - 10 - 02),
            ]
        );
        let cell = grid.get(date!(2026 - 09 - 30)).unwrap();
        assert_eq!(cell.booked_by.as_deref(), Some("alice"));
        let cell = grid.get(date!(2026 - 10 - 03)).unwrap();
        assert!(!cell.booked);
        assert_eq!(cell.booked_by, None);
    }

    #[test]
    fn test_get() {
        let grid = build(2026, Month::October);
        assert_eq!(
            grid.get(date!(2026 - 10 - 19)).map(|c| c.date),
            Some(date!(2026 - 10 - 19))
        );
        assert!(grid.contains(date!(2026 - 11 - 01)));
        assert!(!grid.contains(date!(2026 - 11 - 02)));
        assert!(!grid.contains(date!(2026 - 09 - 27)));
    }

    #[test]
    fn test_mark() {
        let mut grid = build(2026, Month::October);
        let mut selection = RangeSelection::default();
        selection.click(grid.get(date!(2026 - 10 - 09)).unwrap());
        selection.click(grid.get(date!(2026 - 10 - 12)).unwrap());
        grid.mark(&selection);
        let selected = grid
            .days()
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.date.day())
            .collect::<Vec<_>>();
        assert_eq!(selected, [9, 10, 11, 12]);
    }

    #[test]
    fn test_label_and_key() {
        let grid = build(2026, Month::October);
        let cell = grid.get(date!(2026 - 10 - 05)).unwrap();
        assert_eq!(cell.label(), "05");
        assert_eq!(cell.key(), "2026-10-05");
    }

    #[test]
    fn test_end_of_time() {
        let r = MonthGrid::build(
            YearMonth::of(Date::MAX),
            &NoBookings,
            &RangeSelection::default(),
        );
        assert_eq!(r, Err(OutOfTimeError));
        let r = MonthGrid::build(
            YearMonth::of(Date::MIN),
            &NoBookings,
            &RangeSelection::default(),
        );
        assert!(r.is_ok());
    }

    #[test]
    fn test_year_month() {
        let dec = YearMonth::of(date!(2026 - 12 - 25));
        assert_eq!(dec.to_string(), "Dec 2026");
        assert_eq!(dec.succ().map(|ym| ym.to_string()).as_deref(), Some("Jan 2027"));
        let jan = YearMonth::of(date!(2027 - 01 - 02));
        assert_eq!(jan.pred(), Some(dec));
        assert_eq!(
            YearMonth::of(date!(2026 - 10 - 19)).first_day(),
            Ok(date!(2026 - 10 - 01))
        );
    }
}
