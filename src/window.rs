//! Month windows over balance history.

use tracing::debug;

use crate::error::Result;
use crate::month::{BoundedMonth, MonthRange, YearMonth};
use crate::timescale::Timescale;

/// Inclusive month span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl MonthWindow {
    pub fn months(&self) -> MonthRange {
        MonthRange::new(self.start, self.end)
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        month >= self.start && month <= self.end
    }

    pub fn len(&self) -> usize {
        self.months().len()
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Month keys for `timescale` ending at `reference`, honouring its bounds.
pub fn months_in_window(reference: &BoundedMonth, timescale: Timescale) -> Result<MonthRange> {
    reference.months_for_timescale(timescale)
}

/// First month of the nominal window ending at `reference`; `None` for `All`.
pub fn nominal_start(timescale: Timescale, reference: YearMonth) -> Option<YearMonth> {
    timescale
        .months()
        .map(|count| reference.add_months(-(count as i64 - 1)))
}

/// The nominal window ending at the last month of data, narrowed to the
/// months that actually have data.
pub fn window_bounds(
    timescale: Timescale,
    data_start: YearMonth,
    data_end: YearMonth,
) -> Option<MonthWindow> {
    window_bounds_at(timescale, data_end, data_start, data_end)
}

/// Intersect the nominal window ending at `reference` with `[data_start, data_end]`.
/// `None` when the two do not overlap.
pub fn window_bounds_at(
    timescale: Timescale,
    reference: YearMonth,
    data_start: YearMonth,
    data_end: YearMonth,
) -> Option<MonthWindow> {
    let start = match nominal_start(timescale, reference) {
        Some(nominal) => nominal.max(data_start),
        None => data_start,
    };
    let end = reference.min(data_end);
    if start > end {
        debug!(%timescale, %reference, %data_start, %data_end, "window does not overlap available data");
        return None;
    }
    Some(MonthWindow { start, end })
}
