use crate::calendar::BookingLookup;
use crate::YMD_FMT;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Time, UtcOffset,
};

/// A reservation covering every day from `start_date` through `end_date`,
/// inclusive
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct Booking {
    pub(crate) id: u64,
    pub(crate) owner: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) start_date: Date,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) end_date: Date,
    pub(crate) approved: Option<bool>,
}

impl Booking {
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Bookings(Vec<Booking>);

impl Bookings {
    pub(crate) fn new(bookings: Vec<Booking>) -> Bookings {
        Bookings(
            bookings
                .into_iter()
                .filter(|b| {
                    if b.end_date < b.start_date {
                        tracing::warn!(
                            id = b.id,
                            start = %b.start_date,
                            end = %b.end_date,
                            "skipping booking that ends before it starts"
                        );
                        false
                    } else {
                        true
                    }
                })
                .collect(),
        )
    }

    pub(crate) fn from_json(s: &str) -> Result<Bookings, BookingsError> {
        let bookings = serde_json::from_str::<Vec<Booking>>(s)?;
        Ok(Bookings::new(bookings))
    }

    pub(crate) fn load(path: &Path) -> Result<Bookings, BookingsError> {
        let src = fs::read_to_string(path).map_err(|source| BookingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        Bookings::from_json(&src)
    }

    // Overlapping bookings resolve to whichever was listed first
    pub(crate) fn find(&self, date: Date) -> Option<&Booking> {
        self.0.iter().find(|b| b.contains(date))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl BookingLookup for Bookings {
    fn booking_on(&self, date: Date) -> Option<&Booking> {
        self.find(date)
    }
}

#[derive(Debug, Error)]
pub(crate) enum BookingsError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid bookings data")]
    Parse(#[from] serde_json::Error),
}

static TIME_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]");

static OFFSET_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

#[derive(Debug, Error)]
enum DateFieldError {
    #[error(transparent)]
    Parse(#[from] time::error::Parse),
    #[error("unexpected {0:?} after date; expected a time introduced by 'T' or a space")]
    Trailing(String),
}

/// Parse a booking date: `YYYY-MM-DD`, optionally followed by a time of day
/// (and UTC offset) after a `T` or a space.  The time is validated and then
/// discarded.
fn parse_booking_date(s: &str) -> Result<Date, DateFieldError> {
    let (ymd, rest) = match (s.get(..10), s.get(10..)) {
        (Some(ymd), Some(rest)) => (ymd, rest),
        _ => (s, ""),
    };
    let date = Date::parse(ymd, &YMD_FMT)?;
    if rest.is_empty() {
        return Ok(date);
    }
    let Some(hms) = rest.strip_prefix(['T', ' ']) else {
        return Err(DateFieldError::Trailing(rest.to_owned()));
    };
    let hms = hms.strip_suffix(['Z', 'z']).unwrap_or(hms);
    let split = hms
        .len()
        .checked_sub(6)
        .and_then(|i| Some((hms.get(..i)?, hms.get(i..)?)));
    let hms = match split {
        Some((hms, offset)) if offset.starts_with(['+', '-']) => {
            UtcOffset::parse(offset, &OFFSET_FMT)?;
            hms
        }
        _ => hms,
    };
    Time::parse(hms, &TIME_FMT)?;
    Ok(date)
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let s = <String as Deserialize<'de>>::deserialize(deserializer)?;
    parse_booking_date(&s).map_err(serde::de::Error::custom)
}
