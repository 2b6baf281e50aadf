//! # Date Range Resolver
//!
//! The report window and its named presets.
//!
//! ## Presets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  today = Mon 2026-10-19                                                 │
//! │                                                                         │
//! │  Preset               Start          End                               │
//! │  ───────────────────  ─────────────  ─────────────                     │
//! │  Today                2026-10-19     2026-10-19                        │
//! │  Yesterday            2026-10-18     2026-10-18                        │
//! │  DayBeforeYesterday   2026-10-17     2026-10-17                        │
//! │  LastWeek             2026-10-12     2026-10-18   (Mon – Sun)          │
//! │  ThisMonth            2026-10-01     2026-10-31                        │
//! │  LastMonth            2026-09-01     2026-09-30                        │
//! │  ThisYear             2026-01-01     2026-10-19   (to date)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolving a label tries the presets in that order and takes the first one
//! whose range equals the window exactly. Anything else gets a literal label
//! such as `01/10/2026 - 15/10/2026`.
//!
//! On a Sunday "last week" is the Monday–Sunday week ending today, the way
//! the dashboard's date picker has always computed it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Order;

/// Format of dates on the wire and in config.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of dates in a literal range label.
pub const LABEL_DATE_FORMAT: &str = "%d/%m/%Y";

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive window of calendar days, `start ≤ end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "String")]
    start: NaiveDate,
    #[ts(as = "String")]
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// A one-day range.
    pub fn single_day(day: NaiveDate) -> Self {
        DateRange { start: day, end: day }
    }

    /// Parses a `YYYY-MM-DD` pair.
    ///
    /// ## Example
    /// ```rust
    /// use titan_core::date_range::DateRange;
    ///
    /// let range = DateRange::parse("2026-10-01", "2026-10-31").unwrap();
    /// assert_eq!(range.day_count(), 31);
    ///
    /// assert!(DateRange::parse("2026-10-31", "2026-10-01").is_err());
    /// assert!(DateRange::parse("31/10/2026", "2026-10-31").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> CoreResult<Self> {
        let start = parse_date("start", start)?;
        let end = parse_date("end", end)?;
        DateRange::new(start, end)
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, at least 1.
    pub fn day_count(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// Whether a calendar day falls inside the window.
    #[inline]
    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Whether a timestamp's (UTC) calendar day falls inside the window.
    #[inline]
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.contains_date(ts.date_naive())
    }

    /// The orders placed inside the window. Orders without a timestamp are
    /// left out.
    pub fn filter_orders(&self, orders: &[Order]) -> Vec<Order> {
        orders
            .iter()
            .filter(|o| o.ordered_at.as_ref().is_some_and(|ts| self.contains(ts)))
            .cloned()
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(LABEL_DATE_FORMAT),
            self.end.format(LABEL_DATE_FORMAT)
        )
    }
}

fn parse_date(field: &str, value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// =============================================================================
// Presets
// =============================================================================

/// A named window anchored on "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    Today,
    Yesterday,
    DayBeforeYesterday,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
}

impl DatePreset {
    /// Every preset, in matching priority order.
    pub const ALL: [DatePreset; 7] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::DayBeforeYesterday,
        DatePreset::LastWeek,
        DatePreset::ThisMonth,
        DatePreset::LastMonth,
        DatePreset::ThisYear,
    ];

    /// The window this preset covers when today is `today`.
    pub fn range(&self, today: NaiveDate) -> DateRange {
        let (start, end) = match self {
            DatePreset::Today => (today, today),
            DatePreset::Yesterday => {
                let day = today - Duration::days(1);
                (day, day)
            }
            DatePreset::DayBeforeYesterday => {
                let day = today - Duration::days(2);
                (day, day)
            }
            DatePreset::LastWeek => {
                let dow = i64::from(today.weekday().num_days_from_sunday());
                let to_monday = if dow == 0 { 6 } else { dow + 6 };
                let to_sunday = if dow == 0 { 0 } else { dow };
                (today - Duration::days(to_monday), today - Duration::days(to_sunday))
            }
            DatePreset::ThisMonth => (month_start(today), month_end(today)),
            DatePreset::LastMonth => {
                let end = month_start(today) - Duration::days(1);
                (month_start(end), end)
            }
            DatePreset::ThisYear => {
                let start = today - Duration::days(i64::from(today.ordinal0()));
                (start, today)
            }
        };

        DateRange { start, end }
    }

    /// Config / CLI key (`last_week`).
    pub const fn key(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::DayBeforeYesterday => "day_before_yesterday",
            DatePreset::LastWeek => "last_week",
            DatePreset::ThisMonth => "this_month",
            DatePreset::LastMonth => "last_month",
            DatePreset::ThisYear => "this_year",
        }
    }

    /// Display label (`Last week`).
    pub const fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::DayBeforeYesterday => "Day before yesterday",
            DatePreset::LastWeek => "Last week",
            DatePreset::ThisMonth => "This month",
            DatePreset::LastMonth => "Last month",
            DatePreset::ThisYear => "This year",
        }
    }
}

impl FromStr for DatePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        DatePreset::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| {
                CoreError::Validation(ValidationError::NotAllowed {
                    field: "preset".to_string(),
                    allowed: DatePreset::ALL.iter().map(|p| p.key().to_string()).collect(),
                })
            })
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn month_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.day0()))
}

fn month_end(day: NaiveDate) -> NaiveDate {
    // Day 1 + 31 days always lands in the following month.
    let next = month_start(day) + Duration::days(31);
    month_start(next) - Duration::days(1)
}

// =============================================================================
// Label Resolution
// =============================================================================

/// What to call a window in the report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeLabel {
    Preset(DatePreset),
    /// `dd/mm/yyyy - dd/mm/yyyy`
    Custom(String),
}

impl RangeLabel {
    pub fn preset(&self) -> Option<DatePreset> {
        match self {
            RangeLabel::Preset(preset) => Some(*preset),
            RangeLabel::Custom(_) => None,
        }
    }
}

impl fmt::Display for RangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeLabel::Preset(preset) => f.write_str(preset.label()),
            RangeLabel::Custom(label) => f.write_str(label),
        }
    }
}

/// Names `range` after the first preset it matches, else formats it.
pub fn resolve_label(range: &DateRange, today: NaiveDate) -> RangeLabel {
    DatePreset::ALL
        .into_iter()
        .find(|preset| preset.range(today) == *range)
        .map(RangeLabel::Preset)
        .unwrap_or_else(|| RangeLabel::Custom(range.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
