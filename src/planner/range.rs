//! Symbolic period resolution.
//!
//! Converts a daily/weekly/monthly period plus a reference instant into a
//! concrete inclusive `[from, to]` pair of UTC instants. Weeks start Monday.
//! Unrecognized period strings are rejected at the API boundary by serde
//! rather than silently falling back to daily.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryRange {
  Daily,
  Weekly,
  Monthly,
}

impl SummaryRange {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "daily" => Some(Self::Daily),
      "weekly" => Some(Self::Weekly),
      "monthly" => Some(Self::Monthly),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Daily => "daily",
      Self::Weekly => "weekly",
      Self::Monthly => "monthly",
    }
  }

  /// Resolve this period to concrete bounds relative to `now`.
  pub fn resolve(&self, now: DateTime<Utc>) -> RangeBounds {
    let today = now.date_naive();
    match self {
      Self::Daily => RangeBounds {
        from: start_of_day(today),
        to: end_of_day(today),
      },
      Self::Weekly => {
        let monday = today - Days::new(today.weekday().num_days_from_monday() as u64);
        let sunday = monday + Days::new(6);
        RangeBounds {
          from: start_of_day(monday),
          to: end_of_day(sunday),
        }
      }
      Self::Monthly => {
        let first = today.with_day(1).unwrap_or(today);
        let last = last_day_of_month(first);
        RangeBounds {
          from: start_of_day(first),
          to: end_of_day(last),
        }
      }
    }
  }
}

/// Concrete inclusive date interval, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
  pub from: DateTime<Utc>,
  pub to: DateTime<Utc>,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_hms_milli_opt(0, 0, 0, 0).unwrap().and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
  let next_month = if first.month() == 12 {
    NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
  } else {
    NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
  };
  next_month
    .and_then(|d| d.pred_opt())
    .unwrap_or(first)
}
