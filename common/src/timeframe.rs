//! Timeframe ladder and calendar-aware bin boundaries
//!
//! Every timeframe bins timestamps into right-closed intervals labeled by
//! their end time. Intraday and daily bins count from the Unix epoch and
//! `3D` bins count from the series origin.
//!
//! Calendar bins are labeled with the instant they close, not with their
//! last calendar day: a week (Monday to Sunday) ends on the following
//! Monday 00:00 UTC and a month ends on the first of the next month at
//! 00:00 UTC. pandas' `W` and `M` anchors label the same bins with the
//! Sunday and the month-end date instead, so bar counts agree while labels
//! sit one day later.

use chrono::{DateTime, Datelike, Days, DurationRound, Months, NaiveDate, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SECONDS_IN_1MIN: i64 = 60;
const SECONDS_IN_1HOUR: i64 = 60 * SECONDS_IN_1MIN;
const SECONDS_IN_1DAY: i64 = 24 * SECONDS_IN_1HOUR;
const MINUTES_IN_1DAY: u64 = 1440;

/// Candle resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// 1 minute bars (base resolution)
    #[serde(rename = "1min")]
    M1,
    /// 5 minute bars
    #[serde(rename = "5min")]
    M5,
    /// 15 minute bars
    #[serde(rename = "15min")]
    M15,
    /// 30 minute bars
    #[serde(rename = "30min")]
    M30,
    /// 1 hour bars
    #[serde(rename = "1H")]
    H1,
    /// 2 hour bars
    #[serde(rename = "2H")]
    H2,
    /// 4 hour bars
    #[serde(rename = "4H")]
    H4,
    /// Daily bars
    #[serde(rename = "1D")]
    D1,
    /// 3 day bars
    #[serde(rename = "3D")]
    D3,
    /// Weekly bars, Monday to Sunday
    #[serde(rename = "1W")]
    W1,
    /// Calendar month bars
    #[serde(rename = "1M")]
    MN1,
}

/// The resampling ladder, finest first
pub const LADDER: [Timeframe; 11] = [
    Timeframe::M1,
    Timeframe::M5,
    Timeframe::M15,
    Timeframe::M30,
    Timeframe::H1,
    Timeframe::H2,
    Timeframe::H4,
    Timeframe::D1,
    Timeframe::D3,
    Timeframe::W1,
    Timeframe::MN1,
];

/// Unknown timeframe label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown timeframe: {0}")]
pub struct ParseTimeframeError(pub String);

impl Timeframe {
    /// The base resolution every series family is derived from
    pub const BASE: Self = Self::M1;

    /// Short label used as the family key
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::M1 => "1min",
            Self::M5 => "5min",
            Self::M15 => "15min",
            Self::M30 => "30min",
            Self::H1 => "1H",
            Self::H2 => "2H",
            Self::H4 => "4H",
            Self::D1 => "1D",
            Self::D3 => "3D",
            Self::W1 => "1W",
            Self::MN1 => "1M",
        }
    }

    /// Bin width in seconds, `None` for calendar timeframes
    #[must_use]
    pub const fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::M1 => Some(SECONDS_IN_1MIN),
            Self::M5 => Some(5 * SECONDS_IN_1MIN),
            Self::M15 => Some(15 * SECONDS_IN_1MIN),
            Self::M30 => Some(30 * SECONDS_IN_1MIN),
            Self::H1 => Some(SECONDS_IN_1HOUR),
            Self::H2 => Some(2 * SECONDS_IN_1HOUR),
            Self::H4 => Some(4 * SECONDS_IN_1HOUR),
            Self::D1 => Some(SECONDS_IN_1DAY),
            Self::D3 => Some(3 * SECONDS_IN_1DAY),
            Self::W1 | Self::MN1 => None,
        }
    }

    /// Whether bin boundaries follow the calendar instead of a fixed width
    #[must_use]
    pub const fn is_calendar(self) -> bool {
        self.fixed_seconds().is_none()
    }

    /// Position on the ladder
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Immediate finer level on the ladder, the source this level is resampled from
    #[must_use]
    pub const fn finer(self) -> Option<Self> {
        match self.rank() {
            0 => None,
            rank => Some(LADDER[rank - 1]),
        }
    }

    /// Nominal bar count for a series of `total_days` days.
    ///
    /// Exact for fixed-width levels on a midnight origin. Weeks and months
    /// use 7 and 30 days, so calendar levels can differ by one bar depending
    /// on where the origin falls.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn nominal_bars(self, total_days: u64) -> u64 {
        match self {
            Self::D3 => total_days / 3,
            Self::W1 => total_days / 7,
            Self::MN1 => total_days / 30,
            _ => match self.fixed_seconds() {
                Some(seconds) => total_days * MINUTES_IN_1DAY / (seconds / SECONDS_IN_1MIN) as u64,
                None => 0,
            },
        }
    }

    /// Right edge of the bin containing `timestamp`.
    ///
    /// Bins are right-closed, so a timestamp sitting exactly on a boundary
    /// returns itself. `origin` anchors the `3D` bins and is ignored by the
    /// other levels. Returns `None` outside the range chrono can round in
    /// (roughly years 1677 to 2262).
    #[must_use]
    pub fn bin_end(self, timestamp: DateTime<Utc>, origin: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::W1 => week_end(timestamp),
            Self::MN1 => month_end(timestamp),
            Self::D3 => {
                let shift = origin - DateTime::UNIX_EPOCH;
                let shifted = timestamp.checked_sub_signed(shift)?;
                shifted.duration_round_up(TimeDelta::days(3)).ok()?.checked_add_signed(shift)
            }
            _ => timestamp.duration_round_up(TimeDelta::seconds(self.fixed_seconds()?)).ok(),
        }
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn week_end(timestamp: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let day = timestamp.date_naive();
    if day.weekday() == Weekday::Mon && midnight(day)? == timestamp {
        return Some(timestamp);
    }
    let to_monday = 7 - u64::from(day.weekday().num_days_from_monday());
    midnight(day.checked_add_days(Days::new(to_monday))?)
}

fn month_end(timestamp: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let first = timestamp.date_naive().with_day(1)?;
    if midnight(first)? == timestamp {
        return Some(timestamp);
    }
    midnight(first.checked_add_months(Months::new(1))?)
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LADDER
            .iter()
            .copied()
            .find(|tf| tf.label().eq_ignore_ascii_case(s) && (tf.label() == s || !is_ambiguous(s)))
            .ok_or_else(|| ParseTimeframeError(s.to_string()))
    }
}

/// `1m` and `1M` differ only by case, so month must be spelled exactly
fn is_ambiguous(s: &str) -> bool {
    s.eq_ignore_ascii_case("1m")
}
