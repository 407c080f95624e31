//! Calendar dates.
//!
//! Acquisition instants are [Epoch]s, but pairs, anniversaries and seasons
//! are keyed by calendar day. [DateLike] is the one place where loosely typed
//! date descriptions are turned into a [NaiveDate].
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::prelude::{Epoch, Error};

/// Calendar (UTC) day of this [Epoch]
pub fn epoch_date(epoch: Epoch) -> NaiveDate {
    let (y, m, d, _, _, _, _) = epoch.to_gregorian_utc();
    NaiveDate::from_ymd_opt(y, m as u32, d as u32).unwrap_or_default()
}

/// Anything that may describe an acquisition day.
#[derive(Debug, Clone, PartialEq)]
pub enum DateLike {
    /// ISO-8601 date or datetime, possibly with offset or "UTC" suffix
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Utc(DateTime<Utc>),
    Epoch(Epoch),
    /// Unix timestamp, in seconds
    Timestamp(f64),
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

fn parse_text(text: &str) -> Result<NaiveDate, Error> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix("UTC").unwrap_or(trimmed).trim_end();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| Error::InvalidDate(text.to_string()))
}

impl DateLike {
    /// Normalizes into a calendar (UTC) day.
    pub fn to_date(&self) -> Result<NaiveDate, Error> {
        match self {
            Self::Text(text) => parse_text(text),
            Self::Date(date) => Ok(*date),
            Self::DateTime(dt) => Ok(dt.date()),
            Self::Utc(dt) => Ok(dt.date_naive()),
            Self::Epoch(epoch) => Ok(epoch_date(*epoch)),
            Self::Timestamp(secs) => {
                if !secs.is_finite() {
                    return Err(Error::InvalidDate(secs.to_string()));
                }
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1.0E9) as u32;
                DateTime::from_timestamp(whole as i64, nanos)
                    .map(|dt| dt.date_naive())
                    .ok_or_else(|| Error::InvalidDate(secs.to_string()))
            },
        }
    }
}

impl From<&str> for DateLike {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateLike {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for DateLike {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for DateLike {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }
}

impl From<Epoch> for DateLike {
    fn from(epoch: Epoch) -> Self {
        Self::Epoch(epoch)
    }
}

impl From<i64> for DateLike {
    fn from(secs: i64) -> Self {
        Self::Timestamp(secs as f64)
    }
}

impl From<f64> for DateLike {
    fn from(secs: f64) -> Self {
        Self::Timestamp(secs)
    }
}

/// Normalizes a pair of date like values into a (earliest, latest) day tuple.
pub fn normalize_date_pair<A, B>(lhs: A, rhs: B) -> Result<(NaiveDate, NaiveDate), Error>
where
    A: Into<DateLike>,
    B: Into<DateLike>,
{
    let (lhs, rhs) = (lhs.into().to_date()?, rhs.into().to_date()?);
    if lhs <= rhs {
        Ok((lhs, rhs))
    } else {
        Ok((rhs, lhs))
    }
}

/// Recurring day of the year, like "03-01".
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Builds a new [MonthDay]. February 29th is accepted.
    pub fn new(month: u32, day: u32) -> Result<Self, Error> {
        // 2000 is a leap year
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(Error::InvalidMonthDay(format!("{:02}-{:02}", month, day)));
        }
        Ok(Self { month, day })
    }

    /// [MonthDay] of this calendar day
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Occurrence in given year. February 29th falls back to
    /// February 28th on regular years.
    pub fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month, self.day - 1))
            .unwrap_or_default()
    }

    /// Number of days between `date` and the closest occurrence of
    /// this [MonthDay], whichever the year.
    pub fn days_to_nearest(&self, date: NaiveDate) -> i64 {
        let year = date.year();
        (year - 1..=year + 1)
            .map(|y| (date - self.in_year(y)).num_days().abs())
            .min()
            .unwrap_or_default()
    }

    /// True if `date` falls within the [start, end] window.
    /// The window may wrap over the end of the year (for example 11-01 to 03-31).
    pub fn window_contains(start: &Self, end: &Self, date: NaiveDate) -> bool {
        let md = Self::of(date);
        if start <= end {
            *start <= md && md <= *end
        } else {
            md >= *start || md <= *end
        }
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl std::str::FromStr for MonthDay {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonthDay(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthDay {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod test {
    use super::{normalize_date_pair, DateLike, MonthDay};
    use crate::prelude::Epoch;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_like_normalization() {
        let expected = ymd(2020, 6, 25);
        for input in [
            DateLike::from("2020-06-25"),
            DateLike::from("2020-06-25T12:34:56Z"),
            DateLike::from("2020-06-25T12:34:56.123456"),
            DateLike::from("2020-06-25T12:34:56+00:00"),
            DateLike::from("2020-06-25T12:34:56 UTC"),
            DateLike::from("2020-06-25 01:00:00"),
            DateLike::from(expected),
            DateLike::from(
                NaiveDateTime::parse_from_str("2020-06-25T23:59:59", "%Y-%m-%dT%H:%M:%S").unwrap(),
            ),
            DateLike::from(Utc.with_ymd_and_hms(2020, 6, 25, 3, 0, 0).unwrap()),
            DateLike::from(Epoch::from_str("2020-06-25T18:00:00 UTC").unwrap()),
            DateLike::from(1593043200_i64),
            DateLike::from(1593043200.5_f64),
        ] {
            assert_eq!(input.to_date().unwrap(), expected, "failed for {:?}", input);
        }
    }

    #[test]
    fn date_like_rejections() {
        for input in [
            DateLike::from("not a date"),
            DateLike::from("2020-13-01"),
            DateLike::from(""),
            DateLike::from(f64::NAN),
        ] {
            assert!(input.to_date().is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn date_pairs_are_ordered() {
        let (a, b) = normalize_date_pair("2021-01-10", "2020-12-29").unwrap();
        assert_eq!(a, ymd(2020, 12, 29));
        assert_eq!(b, ymd(2021, 1, 10));
    }

    #[test]
    fn month_day_parsing() {
        let md = MonthDay::from_str("03-01").unwrap();
        assert_eq!((md.month(), md.day()), (3, 1));
        assert_eq!(md.to_string(), "03-01");
        assert!(MonthDay::from_str("02-29").is_ok());
        assert!(MonthDay::from_str("02-30").is_err());
        assert!(MonthDay::from_str("13-01").is_err());
        assert!(MonthDay::from_str("0301").is_err());
    }

    #[test]
    fn month_day_nearest_occurrence() {
        let md = MonthDay::from_str("03-01").unwrap();
        assert_eq!(md.days_to_nearest(ymd(2021, 3, 2)), 1);
        assert_eq!(md.days_to_nearest(ymd(2021, 2, 20)), 9);
        let new_year = MonthDay::from_str("01-01").unwrap();
        assert_eq!(new_year.days_to_nearest(ymd(2020, 12, 30)), 2);
        let leap = MonthDay::from_str("02-29").unwrap();
        assert_eq!(leap.in_year(2021), ymd(2021, 2, 28));
        assert_eq!(leap.in_year(2020), ymd(2020, 2, 29));
    }

    #[test]
    fn month_day_windows() {
        let (start, end) = (MonthDay::new(4, 1).unwrap(), MonthDay::new(10, 31).unwrap());
        assert!(MonthDay::window_contains(&start, &end, ymd(2020, 7, 14)));
        assert!(!MonthDay::window_contains(&start, &end, ymd(2020, 12, 1)));

        let (start, end) = (MonthDay::new(11, 1).unwrap(), MonthDay::new(3, 31).unwrap());
        assert!(MonthDay::window_contains(&start, &end, ymd(2020, 12, 1)));
        assert!(MonthDay::window_contains(&start, &end, ymd(2021, 2, 1)));
        assert!(!MonthDay::window_contains(&start, &end, ymd(2021, 7, 1)));
    }
}
