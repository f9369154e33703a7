use super::grid::DayCell;
use time::Date;

/// Two-click range selection: the first click on a free day picks the start,
/// the second picks the end, and the next one starts over.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum RangeSelection {
    #[default]
    Empty,
    Started(Date),
    // Invariant: start <= end
    Complete {
        start: Date,
        end: Date,
    },
}

/// What a click on a day did
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SelectionEvent {
    /// The clicked day became the start of a new range
    Start(Date),
    /// The clicked day completed the range
    End(Date),
    /// The clicked day is booked; the selection was left alone
    Booked(Date),
}

impl RangeSelection {
    pub(crate) fn click(&mut self, cell: &DayCell) -> SelectionEvent {
        let date = cell.date;
        if cell.booked {
            return SelectionEvent::Booked(date);
        }
        match *self {
            RangeSelection::Started(start) => {
                *self = RangeSelection::Complete {
                    start: start.min(date),
                    end: start.max(date),
                };
                SelectionEvent::End(date)
            }
            RangeSelection::Empty | RangeSelection::Complete { .. } => {
                *self = RangeSelection::Started(date);
                SelectionEvent::Start(date)
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = RangeSelection::Empty;
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        match *self {
            RangeSelection::Empty => false,
            RangeSelection::Started(start) => start == date,
            RangeSelection::Complete { start, end } => start <= date && date <= end,
        }
    }

    pub(crate) fn range(&self) -> Option<(Date, Date)> {
        match *self {
            RangeSelection::Complete { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// Number of days in a completed range, counting both ends
    pub(crate) fn days(&self) -> Option<i64> {
        self.range()
            .map(|(start, end)| (end - start).whole_days() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn free(date: Date) -> DayCell {
        DayCell {
            date,
            booked: false,
            booked_by: None,
            selected: false,
            in_month: true,
        }
    }

    fn booked(date: Date) -> DayCell {
        DayCell {
            date,
            booked: true,
            booked_by: Some(String::from("alice")),
            selected: false,
            in_month: true,
        }
    }

    #[test]
    fn test_two_clicks() {
        let mut sel = RangeSelection::default();
        assert_eq!(
            sel.click(&free(date!(2026 - 10 - 09))),
            SelectionEvent::Start(date!(2026 - 10 - 09))
        );
        assert_eq!(sel, RangeSelection::Started(date!(2026 - 10 - 09)));
        assert!(sel.contains(date!(2026 - 10 - 09)));
        assert!(!sel.contains(date!(2026 - 10 - 10)));
        assert_eq!(sel.range(), None);
        assert_eq!(
            sel.click(&free(date!(2026 - 10 - 12))),
            SelectionEvent::End(date!(2026 - 10 - 12))
        );
        assert_eq!(
            sel.range(),
            Some((date!(2026 - 10 - 09), date!(2026 - 10 - 12)))
        );
        assert_eq!(sel.days(), Some(4));
        assert!(sel.contains(date!(2026 - 10 - 09)));
        assert!(sel.contains(date!(2026 - 10 - 11)));
        assert!(sel.contains(date!(2026 - 10 - 12)));
        assert!(!sel.contains(date!(2026 - 10 - 13)));
    }

    #[test]
    fn test_third_click_starts_over() {
        let mut sel = RangeSelection::default();
        sel.click(&free(date!(2026 - 10 - 09)));
        sel.click(&free(date!(2026 - 10 - 12)));
        assert_eq!(
            sel.click(&free(date!(2026 - 11 - 02))),
            SelectionEvent::Start(date!(2026 - 11 - 02))
        );
        assert_eq!(sel, RangeSelection::Started(date!(2026 - 11 - 02)));
        assert!(!sel.contains(date!(2026 - 10 - 10)));
    }

    #[test]
    fn test_end_before_start() {
        let mut sel = RangeSelection::default();
        sel.click(&free(date!(2026 - 10 - 12)));
        assert_eq!(
            sel.click(&free(date!(2026 - 10 - 09))),
            SelectionEvent::End(date!(2026 - 10 - 09))
        );
        assert_eq!(
            sel,
            RangeSelection::Complete {
                start: date!(2026 - 10 - 09),
                end: date!(2026 - 10 - 12),
            }
        );
    }

    #[test]
    fn test_single_day_range() {
        let mut sel = RangeSelection::default();
        sel.click(&free(date!(2026 - 10 - 12)));
        sel.click(&free(date!(2026 - 10 - 12)));
        assert_eq!(sel.days(), Some(1));
    }

    #[test]
    fn test_booked_click_leaves_selection() {
        let mut sel = RangeSelection::default();
        assert_eq!(
            sel.click(&booked(date!(2026 - 10 - 06))),
            SelectionEvent::Booked(date!(2026 - 10 - 06))
        );
        assert_eq!(sel, RangeSelection::Empty);
        sel.click(&free(date!(2026 - 10 - 01)));
        sel.click(&booked(date!(2026 - 10 - 06)));
        assert_eq!(sel, RangeSelection::Started(date!(2026 - 10 - 01)));
        sel.click(&free(date!(2026 - 10 - 09)));
        // A completed range may span booked days
        assert!(sel.contains(date!(2026 - 10 - 06)));
    }

    #[test]
    fn test_clear() {
        let mut sel = RangeSelection::default();
        sel.click(&free(date!(2026 - 10 - 12)));
        sel.clear();
        assert_eq!(sel, RangeSelection::Empty);
        assert!(!sel.contains(date!(2026 - 10 - 12)));
    }
}
