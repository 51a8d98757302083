//! Calendar months and the bounded month cursor used by every windowing
//! operation.
//!
//! [`BoundedMonth`] is a `Copy` value: every operation that moves it returns a
//! new value and runs [`BoundedMonth::clamp`] on the way out. Bounds attached
//! with [`BoundedMonth::attach_bounds`] are not checked until the next clamp, so
//! a freshly bounded value may sit outside its range until it is moved.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::error::{MoneygraphError, Result};
use crate::timescale::Timescale;

// ---------------------------------------------------------------------------
// YearMonth
// ---------------------------------------------------------------------------

const MIN_TOTAL_MONTHS: i64 = i32::MIN as i64 * 12;
const MAX_TOTAL_MONTHS: i64 = i32::MAX as i64 * 12 + 11;

/// A plain calendar month, ordered by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(MoneygraphError::Parse(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's date on the local clock.
    pub fn current() -> Self {
        Self::from_date(&Local::now().date_naive())
    }

    pub fn from_date(date: &impl Datelike) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn total_months(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Saturates at the first month of `i32::MIN` and the last of `i32::MAX`.
    fn from_total_months(total: i64) -> Self {
        let total = total.clamp(MIN_TOTAL_MONTHS, MAX_TOTAL_MONTHS);
        let year = i32::try_from(total.div_euclid(12))
            .unwrap_or(if total < 0 { i32::MIN } else { i32::MAX });
        Self {
            year,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shift by `n` months (negative moves backwards). Saturates at the ends
    /// of the representable year range instead of overflowing.
    pub fn add_months(self, n: i64) -> Self {
        Self::from_total_months(self.total_months().saturating_add(n))
    }

    /// Signed number of months from `self` to `other`: 2024-01 to 2024-02 is 1.
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        other.total_months() - self.total_months()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = MoneygraphError;

    fn from_str(s: &str) -> Result<Self> {
        // rsplit keeps a leading minus with the year
        let Some((year, month)) = s.trim().rsplit_once('-') else {
            return Err(MoneygraphError::Parse(format!(
                "expected YYYY-MM, got {s:?}"
            )));
        };
        let year: i32 = year
            .parse()
            .map_err(|_| MoneygraphError::Parse(format!("invalid year in {s:?}")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MoneygraphError::Parse(format!("invalid month in {s:?}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = MoneygraphError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// MonthRange
// ---------------------------------------------------------------------------

/// Ascending, inclusive run of months. `Copy`, so a range can be walked again
/// from the start by iterating a saved copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    front: YearMonth,
    back: YearMonth,
    exhausted: bool,
}

impl MonthRange {
    /// Months from `start` through `end`. Empty when `start` is after `end`.
    pub fn new(start: YearMonth, end: YearMonth) -> Self {
        Self {
            front: start,
            back: end,
            exhausted: start > end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exhausted
    }
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<YearMonth> {
        if self.exhausted {
            return None;
        }
        let current = self.front;
        if current == self.back {
            self.exhausted = true;
        } else {
            self.front = current.add_months(1);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.exhausted {
            0
        } else {
            (self.front.months_until(&self.back) + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthRange {}

// ---------------------------------------------------------------------------
// BoundedMonth
// ---------------------------------------------------------------------------

/// Navigation requested by a month picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthChangeAction {
    First,
    Last,
    Next,
    Prev,
}

/// A calendar month optionally clamped to `[min, max]`.
///
/// Equality and ordering look at the month only, never at the bounds.
#[derive(Debug, Clone, Copy)]
pub struct BoundedMonth {
    value: YearMonth,
    min: Option<YearMonth>,
    max: Option<YearMonth>,
}

impl BoundedMonth {
    pub fn new(value: YearMonth) -> Self {
        Self {
            value,
            min: None,
            max: None,
        }
    }

    pub fn current() -> Self {
        Self::new(YearMonth::current())
    }

    pub fn value(&self) -> YearMonth {
        self.value
    }

    pub fn min(&self) -> Option<YearMonth> {
        self.min
    }

    pub fn max(&self) -> Option<YearMonth> {
        self.max
    }

    /// Attach bounds without touching the current value. Fails when `min`
    /// is later than `max`.
    pub fn attach_bounds(self, min: Option<YearMonth>, max: Option<YearMonth>) -> Result<Self> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(MoneygraphError::Precondition(format!(
                    "minimum bound {lo} is later than maximum bound {hi}"
                )));
            }
        }
        Ok(Self { min, max, ..self })
    }

    /// Parse and attach both bounds, then clamp.
    pub fn with_bounds(self, min: &str, max: &str) -> Result<Self> {
        let min: YearMonth = min.parse()?;
        let max: YearMonth = max.parse()?;
        Ok(self.attach_bounds(Some(min), Some(max))?.clamp())
    }

    /// Pull the value back inside whichever bounds are set. Idempotent.
    pub fn clamp(self) -> Self {
        let mut value = self.value;
        if let Some(min) = self.min {
            if value < min {
                value = min;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                value = max;
            }
        }
        Self { value, ..self }
    }

    pub fn is_within_bounds(&self) -> bool {
        self.min.map_or(true, |min| self.value >= min)
            && self.max.map_or(true, |max| self.value <= max)
    }

    pub fn add(self, n: i64) -> Self {
        Self {
            value: self.value.add_months(n),
            ..self
        }
        .clamp()
    }

    pub fn subtract(self, n: i64) -> Self {
        self.add(n.checked_neg().unwrap_or(i64::MAX))
    }

    pub fn compare(&self, other: &BoundedMonth) -> Ordering {
        self.value.cmp(&other.value)
    }

    pub fn to_start(self) -> Result<Self> {
        let min = self.min.ok_or_else(|| {
            MoneygraphError::Precondition("cannot move to start: no minimum bound set".to_string())
        })?;
        Ok(Self { value: min, ..self }.clamp())
    }

    pub fn to_end(self) -> Result<Self> {
        let max = self.max.ok_or_else(|| {
            MoneygraphError::Precondition("cannot move to end: no maximum bound set".to_string())
        })?;
        Ok(Self { value: max, ..self }.clamp())
    }

    pub fn at_start(&self) -> bool {
        self.min == Some(self.value)
    }

    pub fn at_end(&self) -> bool {
        self.max == Some(self.value)
    }

    pub fn apply(self, action: MonthChangeAction) -> Result<Self> {
        match action {
            MonthChangeAction::First => self.to_start(),
            MonthChangeAction::Last => self.to_end(),
            MonthChangeAction::Next => Ok(self.add(1)),
            MonthChangeAction::Prev => Ok(self.subtract(1)),
        }
    }

    /// Months covered by `timescale`, ending at this month.
    ///
    /// A counted timescale starts `count - 1` months back (clamped to `min`);
    /// `All` starts at `min` and fails when no minimum is set.
    pub fn months_for_timescale(&self, timescale: Timescale) -> Result<MonthRange> {
        let start = match timescale.months() {
            Some(count) => self.subtract(count as i64 - 1).value,
            None => self.min.ok_or_else(|| {
                MoneygraphError::Precondition(
                    "the All timescale needs a minimum bound to start from".to_string(),
                )
            })?,
        };
        Ok(MonthRange::new(start, self.value))
    }
}

impl PartialEq for BoundedMonth {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BoundedMonth {}

impl PartialOrd for BoundedMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoundedMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<YearMonth> for BoundedMonth {
    fn from(value: YearMonth) -> Self {
        Self::new(value)
    }
}

impl FromStr for BoundedMonth {
    type Err = MoneygraphError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::new(s.parse()?))
    }
}

impl fmt::Display for BoundedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
