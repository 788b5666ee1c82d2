use chrono::{Datelike, Duration, Months, NaiveDate};

/// Zoom granularity of the roadmap grid: one cell is a day or a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Year,
}

/// Trailing neighbor cells appended to the anchored window so bars can run
/// past the month/year boundary without falling off the grid.
pub const MONTH_TRAIL_CELLS: u32 = 7;
pub const YEAR_TRAIL_CELLS: u32 = 2;

/// The reference year/month the visible window of cells is built around.
///
/// Cell 0 is the first day of the anchored month (month view) or January of
/// the anchored year (year view). The window pads at the tail only: leading
/// neighbor cells would need negative indices, which item positions cannot
/// hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAnchor {
    pub year: i32,
    /// 1-based calendar month. Only meaningful in month view.
    pub month: u32,
}

impl GridAnchor {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// Anchor on today's month.
    pub fn today() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    /// The date of cell 0 under the given view mode.
    pub fn origin(&self, mode: ViewMode) -> NaiveDate {
        let month = match mode {
            ViewMode::Month => self.month,
            ViewMode::Year => 1,
        };
        NaiveDate::from_ymd_opt(self.year, month, 1).unwrap_or_default()
    }

    /// Step the window one unit back (a month or a year).
    pub fn prev(&self, mode: ViewMode) -> Self {
        match mode {
            ViewMode::Month => {
                if self.month == 1 {
                    Self::new(self.year - 1, 12)
                } else {
                    Self::new(self.year, self.month - 1)
                }
            }
            ViewMode::Year => Self::new(self.year - 1, self.month),
        }
    }

    /// Step the window one unit forward.
    pub fn next(&self, mode: ViewMode) -> Self {
        match mode {
            ViewMode::Month => {
                if self.month == 12 {
                    Self::new(self.year + 1, 1)
                } else {
                    Self::new(self.year, self.month + 1)
                }
            }
            ViewMode::Year => Self::new(self.year + 1, self.month),
        }
    }

    /// Human label for the toolbar, e.g. "March 2026" or "2026".
    pub fn label(&self, mode: ViewMode) -> String {
        match mode {
            ViewMode::Month => self.origin(mode).format("%B %Y").to_string(),
            ViewMode::Year => format!("{}", self.year),
        }
    }
}

/// Number of cells in the padded window.
pub fn cell_count(mode: ViewMode, anchor: GridAnchor) -> u32 {
    match mode {
        ViewMode::Month => days_in_month(anchor.year, anchor.month) + MONTH_TRAIL_CELLS,
        ViewMode::Year => 12 + YEAR_TRAIL_CELLS,
    }
}

/// Length of a calendar month in days.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 30,
    }
}

/// Cell index of a date inside the anchored window.
///
/// Month view: day offset from the first of the anchored month, so in-month
/// dates land on day-of-month − 1. Year view: month offset from January of
/// the anchored year, so in-year dates land on 0–11. `None` means the window
/// cannot address the date (before cell 0 or past the trailing pad) and the
/// caller needs a different anchor; nothing is resolved here.
pub fn position_of(date: NaiveDate, mode: ViewMode, anchor: GridAnchor) -> Option<u32> {
    let origin = anchor.origin(mode);
    let offset = match mode {
        ViewMode::Month => (date - origin).num_days(),
        ViewMode::Year => month_offset(origin, date),
    };
    if offset >= 0 && (offset as u32) < cell_count(mode, anchor) {
        Some(offset as u32)
    } else {
        None
    }
}

/// Number of cells a date range spans, inclusive on both ends. Minimum 1.
pub fn duration_of(start_date: NaiveDate, end_date: NaiveDate, mode: ViewMode) -> u32 {
    let span = match mode {
        ViewMode::Month => (end_date - start_date).num_days() + 1,
        ViewMode::Year => month_offset(start_date, end_date) + 1,
    };
    span.max(1) as u32
}

/// Inverse of `position_of`/`duration_of`: concrete dates for a grid span.
///
/// The start date is the window origin advanced `start` units; the end date
/// adds `duration − 1` more. Month arithmetic is calendar-correct: the
/// day-of-month is preserved where the target month has it and clamped to the
/// month's last day otherwise.
pub fn date_range_of(
    start: u32,
    duration: u32,
    mode: ViewMode,
    anchor: GridAnchor,
) -> (NaiveDate, NaiveDate) {
    let origin = anchor.origin(mode);
    let start_date = match mode {
        ViewMode::Month => origin + Duration::days(start as i64),
        ViewMode::Year => origin
            .checked_add_months(Months::new(start))
            .unwrap_or(origin),
    };
    (start_date, end_date_for(start_date, duration, mode))
}

/// End date for a span that begins on `start_date` and covers `duration`
/// cells. Holding the start fixed is what a resize commit needs.
pub fn end_date_for(start_date: NaiveDate, duration: u32, mode: ViewMode) -> NaiveDate {
    let units = duration.max(1) - 1;
    match mode {
        ViewMode::Month => start_date + Duration::days(units as i64),
        ViewMode::Year => start_date
            .checked_add_months(Months::new(units))
            .unwrap_or(start_date),
    }
}

/// Whole months from `from` to `to`, ignoring days-of-month.
fn month_offset(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() - from.year()) as i64 * 12 + to.month0() as i64 - from.month0() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn position_is_day_of_month_minus_one_in_month_view() {
        let anchor = GridAnchor::new(2024, 3);
        assert_eq!(position_of(date(2024, 3, 1), ViewMode::Month, anchor), Some(0));
        assert_eq!(position_of(date(2024, 3, 15), ViewMode::Month, anchor), Some(14));
        assert_eq!(position_of(date(2024, 3, 31), ViewMode::Month, anchor), Some(30));
    }

    #[test]
    fn position_is_month_of_year_in_year_view() {
        let anchor = GridAnchor::new(2024, 6);
        assert_eq!(position_of(date(2024, 1, 10), ViewMode::Year, anchor), Some(0));
        assert_eq!(position_of(date(2024, 12, 31), ViewMode::Year, anchor), Some(11));
    }

    #[test]
    fn dates_outside_the_window_have_no_position() {
        let anchor = GridAnchor::new(2024, 3);
        // Before cell 0.
        assert_eq!(position_of(date(2024, 2, 29), ViewMode::Month, anchor), None);
        // Inside the trailing pad is still addressable...
        assert_eq!(
            position_of(date(2024, 4, 3), ViewMode::Month, anchor),
            Some(33)
        );
        // ...but past it is not.
        assert_eq!(position_of(date(2024, 4, 8), ViewMode::Month, anchor), None);
        assert_eq!(position_of(date(2023, 11, 1), ViewMode::Year, anchor), None);
        assert_eq!(position_of(date(2025, 3, 1), ViewMode::Year, anchor), None);
    }

    #[test]
    fn duration_is_inclusive_and_at_least_one() {
        assert_eq!(duration_of(date(2024, 3, 1), date(2024, 3, 3), ViewMode::Month), 3);
        assert_eq!(duration_of(date(2024, 3, 5), date(2024, 3, 5), ViewMode::Month), 1);
        assert_eq!(duration_of(date(2024, 3, 5), date(2024, 3, 1), ViewMode::Month), 1);
        assert_eq!(duration_of(date(2024, 1, 20), date(2024, 4, 2), ViewMode::Year), 4);
        assert_eq!(duration_of(date(2024, 7, 1), date(2024, 7, 30), ViewMode::Year), 1);
    }

    #[test]
    fn round_trip_holds_across_the_padded_window() {
        for &(mode, anchor) in &[
            (ViewMode::Month, GridAnchor::new(2024, 2)), // leap February
            (ViewMode::Month, GridAnchor::new(2023, 12)),
            (ViewMode::Year, GridAnchor::new(2024, 1)),
            (ViewMode::Year, GridAnchor::new(2025, 7)),
        ] {
            for start in 0..cell_count(mode, anchor) {
                for duration in [1, 2, 5, 13] {
                    let (start_date, end_date) = date_range_of(start, duration, mode, anchor);
                    assert_eq!(
                        position_of(start_date, mode, anchor),
                        Some(start),
                        "start round trip, mode {mode:?} start {start}"
                    );
                    assert_eq!(
                        duration_of(start_date, end_date, mode),
                        duration,
                        "duration round trip, mode {mode:?} start {start} duration {duration}"
                    );
                }
            }
        }
    }

    #[test]
    fn date_range_rolls_over_into_the_trailing_pad() {
        let anchor = GridAnchor::new(2024, 4); // April has 30 days
        let (start_date, end_date) = date_range_of(32, 3, ViewMode::Month, anchor);
        assert_eq!(start_date, date(2024, 5, 3));
        assert_eq!(end_date, date(2024, 5, 5));
    }

    #[test]
    fn end_date_preserves_day_of_month_and_clamps_short_months() {
        // Jan 31 + 1 month lands on leap-February's last day.
        assert_eq!(
            end_date_for(date(2024, 1, 31), 2, ViewMode::Year),
            date(2024, 2, 29)
        );
        assert_eq!(
            end_date_for(date(2023, 1, 31), 2, ViewMode::Year),
            date(2023, 2, 28)
        );
        // Day is preserved when the target month has it.
        assert_eq!(
            end_date_for(date(2024, 1, 15), 3, ViewMode::Year),
            date(2024, 3, 15)
        );
        // Duration 1 spans a single cell.
        assert_eq!(
            end_date_for(date(2024, 6, 10), 1, ViewMode::Month),
            date(2024, 6, 10)
        );
    }

    #[test]
    fn anchor_navigation_wraps_year_boundaries() {
        let dec = GridAnchor::new(2024, 12);
        assert_eq!(dec.next(ViewMode::Month), GridAnchor::new(2025, 1));
        let jan = GridAnchor::new(2024, 1);
        assert_eq!(jan.prev(ViewMode::Month), GridAnchor::new(2023, 12));
        assert_eq!(jan.next(ViewMode::Year), GridAnchor::new(2025, 1));
    }
}
