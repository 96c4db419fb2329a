//! Month grid geometry and the date arithmetic shared by the window, index and
//! jump code. A month is always laid out as six Sunday-first weeks.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{Error, Result};
use crate::models::CalendarDay;

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

pub const WEEKDAY_NAMES: [&str; GRID_COLUMNS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const ENTRY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Lays out the month containing `reference` as exactly [`GRID_CELLS`] cells:
/// leading padding up to the weekday of the 1st, one cell per day, trailing
/// padding. The grid never grows past six rows.
pub fn layout(reference: NaiveDate) -> [CalendarDay; GRID_CELLS] {
    let start = month_start(reference);
    let offset = weekday_offset(start);
    let days = days_in_month(start.year(), start.month());

    let mut cells = [CalendarDay::Empty; GRID_CELLS];
    let mut date = start;
    for slot in cells.iter_mut().skip(offset).take(days as usize) {
        *slot = CalendarDay::DayOf(date);
        date += Duration::days(1);
    }
    cells
}

/// Column of `date` in a Sunday-first week (Sunday = 0).
pub fn weekday_offset(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Shifts `base` by whole months, clamping the day to the target month's length.
/// Returns `base` unchanged when the result is outside chrono's date range.
pub fn add_months(base: NaiveDate, months: i32) -> NaiveDate {
    checked_add_months(base, months).unwrap_or(base)
}

pub fn checked_add_months(base: NaiveDate, months: i32) -> Option<NaiveDate> {
    let step = Months::new(months.unsigned_abs());
    if months >= 0 {
        base.checked_add_months(step)
    } else {
        base.checked_sub_months(step)
    }
}

/// Signed number of calendar months from `from`'s month to `to`'s month.
pub fn month_diff(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// "YYYY-MM"
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// "YYYY-MM-DD"
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_entry_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ENTRY_DATE_FORMAT).map_err(|_| {
        Error::InvalidDateFormat {
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn layout_is_always_forty_two_cells() {
        // One 28-year cycle covers every (month length, starting weekday) pairing.
        let mut seen = std::collections::HashSet::new();
        for year in 2000..2028 {
            for month in 1..=12 {
                let start = ymd(year, month, 1);
                let cells = layout(start);
                let days = days_in_month(year, month);
                seen.insert((days, weekday_offset(start)));

                assert_eq!(cells.len(), GRID_CELLS);
                let filled = cells.iter().filter(|c| c.date().is_some()).count();
                assert_eq!(filled as u32, days, "{year}-{month}");
                let first = cells.iter().position(|c| c.date().is_some());
                assert_eq!(first, Some(weekday_offset(start)), "{year}-{month}");
            }
        }
        assert_eq!(seen.len(), 4 * 7);
    }

    #[test]
    fn layout_pads_september_2025() {
        // 1 September 2025 is a Monday.
        let cells = layout(ymd(2025, 9, 17));
        assert_eq!(cells[0], CalendarDay::Empty);
        assert_eq!(cells[1], CalendarDay::DayOf(ymd(2025, 9, 1)));
        assert_eq!(cells[30], CalendarDay::DayOf(ymd(2025, 9, 30)));
        assert!(cells[31..].iter().all(|c| *c == CalendarDay::Empty));
    }

    #[test]
    fn layout_of_sunday_february() {
        // 1 February 2026 is a Sunday and the month fills exactly four rows.
        let cells = layout(ymd(2026, 2, 1));
        assert_eq!(cells[0], CalendarDay::DayOf(ymd(2026, 2, 1)));
        assert_eq!(cells[27], CalendarDay::DayOf(ymd(2026, 2, 28)));
        assert_eq!(cells[28..].len(), 14);
        assert!(cells[28..].iter().all(|c| *c == CalendarDay::Empty));
    }

    #[test]
    fn counts_month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn add_months_crosses_years_and_clamps() {
        assert_eq!(add_months(ymd(2025, 11, 1), 3), ymd(2026, 2, 1));
        assert_eq!(add_months(ymd(2025, 1, 1), -1), ymd(2024, 12, 1));
        assert_eq!(add_months(ymd(2025, 1, 31), 1), ymd(2025, 2, 28));
        assert_eq!(add_months(ymd(2024, 3, 31), -1), ymd(2024, 2, 29));
    }

    #[test]
    fn month_shift_out_of_range_is_none() {
        assert_eq!(checked_add_months(ymd(2025, 8, 1), i32::MAX), None);
        assert_eq!(checked_add_months(ymd(2025, 8, 1), i32::MIN), None);
        assert_eq!(add_months(ymd(2025, 8, 1), 2_147_483_000), ymd(2025, 8, 1));
    }

    #[test]
    fn month_diff_is_signed() {
        assert_eq!(month_diff(ymd(2025, 7, 1), ymd(2026, 1, 20)), 6);
        assert_eq!(month_diff(ymd(2025, 7, 1), ymd(2025, 3, 2)), -4);
        assert_eq!(month_diff(ymd(2025, 7, 31), ymd(2025, 7, 1)), 0);
    }

    #[test]
    fn formats_keys() {
        assert_eq!(month_key(ymd(2025, 9, 5)), "2025-09");
        assert_eq!(day_key(ymd(2025, 9, 5)), "2025-09-05");
        assert_eq!(month_start(ymd(2025, 9, 5)), ymd(2025, 9, 1));
    }

    #[test]
    fn parses_day_first_entry_dates() {
        assert_eq!(parse_entry_date("05/09/2025").unwrap(), ymd(2025, 9, 5));
        assert!(matches!(
            parse_entry_date("2025-09-05"),
            Err(Error::InvalidDateFormat { .. })
        ));
        assert!(parse_entry_date("31/02/2025").is_err());
    }
}
