//! # Time-Range Filter
//!
//! Turns a range token into a window and keeps the sales inside it.
//!
//! ## Windows
//! ```text
//! token        start                          end
//! ─────────    ─────────────────────────────  ─────────────────────────────
//! 7days        now - 7 days                   open
//! 30days       now - 30 days                  open
//! 90days       now - 90 days                  open
//! thisMonth    00:00 on the 1st of this month open
//! lastMonth    00:00 on the 1st of last month 00:00 on the 1st of this month
//! (other)      same as 30days
//! ```
//!
//! Open windows include sales dated after "now". Undated sales never match.

use chrono::{Datelike, DateTime, Days, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Sale;

/// A caller-selected analytics window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimeRange {
    #[serde(rename = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
    #[serde(rename = "thisMonth")]
    ThisMonth,
    #[serde(rename = "lastMonth")]
    LastMonth,
}

impl TimeRange {
    /// Every range, in the order a selector lists them.
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Last7Days,
        TimeRange::Last30Days,
        TimeRange::Last90Days,
        TimeRange::ThisMonth,
        TimeRange::LastMonth,
    ];

    /// Parses a token exactly; `None` for anything unrecognized.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "7days" => Some(TimeRange::Last7Days),
            "30days" => Some(TimeRange::Last30Days),
            "90days" => Some(TimeRange::Last90Days),
            "thisMonth" => Some(TimeRange::ThisMonth),
            "lastMonth" => Some(TimeRange::LastMonth),
            _ => None,
        }
    }

    /// Parses a token, falling back to the 30-day window.
    ///
    /// ## Example
    /// ```rust
    /// use salestrack_core::analytics::TimeRange;
    ///
    /// assert_eq!(TimeRange::from_token("7days"), TimeRange::Last7Days);
    /// assert_eq!(TimeRange::from_token("fortnight"), TimeRange::Last30Days);
    /// ```
    pub fn from_token(token: &str) -> Self {
        TimeRange::parse(token).unwrap_or_default()
    }

    pub const fn token(&self) -> &'static str {
        match self {
            TimeRange::Last7Days => "7days",
            TimeRange::Last30Days => "30days",
            TimeRange::Last90Days => "90days",
            TimeRange::ThisMonth => "thisMonth",
            TimeRange::LastMonth => "lastMonth",
        }
    }

    /// The window this range covers relative to `now`.
    pub fn window(&self, now: DateTime<FixedOffset>) -> RangeWindow {
        let trailing = |days: i64| RangeWindow {
            start: (now - Duration::days(days)).with_timezone(&Utc),
            end: None,
        };

        match self {
            TimeRange::Last7Days => trailing(7),
            TimeRange::Last30Days => trailing(30),
            TimeRange::Last90Days => trailing(90),
            TimeRange::ThisMonth => RangeWindow {
                start: local_midnight(first_of_month(now.date_naive()), *now.offset()),
                end: None,
            },
            TimeRange::LastMonth => {
                let this_month = first_of_month(now.date_naive());
                let last_month = first_of_month(this_month - Days::new(1));
                RangeWindow {
                    start: local_midnight(last_month, *now.offset()),
                    end: Some(local_midnight(this_month, *now.offset())),
                }
            }
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// `[start, end)` in UTC; `end: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl RangeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && self.end.map_or(true, |end| instant < end)
    }
}

/// Keeps the sales whose timestamp falls inside `range`, in input order.
///
/// ## Example
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use salestrack_core::analytics::{filter_sales, TimeRange};
///
/// let now = FixedOffset::east_opt(3600).unwrap()
///     .with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
/// assert!(filter_sales(&[], TimeRange::Last7Days, now).is_empty());
/// ```
pub fn filter_sales(sales: &[Sale], range: TimeRange, now: DateTime<FixedOffset>) -> Vec<&Sale> {
    let window = range.window(now);
    sales
        .iter()
        .filter(|sale| sale.date.map_or(false, |date| window.contains(date)))
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// 00:00 local time on `date`, expressed in UTC.
pub(crate) fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, Utc)
}
