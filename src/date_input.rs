use chrono::{Duration, NaiveDate};

use crate::calendar::{checked_add_months, parse_entry_date};

/// Parses what the user typed into the jump popup, relative to `base`.
pub(crate) fn parse_jump_input(input: &str, base: NaiveDate) -> Option<NaiveDate> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.as_str() {
        "today" => return Some(base),
        "tomorrow" => return Some(base + Duration::days(1)),
        "yesterday" => return Some(base - Duration::days(1)),
        _ => {}
    }

    if let Some(date) = parse_explicit_date(&trimmed) {
        return Some(date);
    }

    parse_relative_offset(&trimmed, base)
}

fn parse_explicit_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = parse_entry_date(input) {
        return Some(date);
    }
    // "2026-01" means the first of that month.
    let (year, month) = input.split_once('-')?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn parse_relative_offset(input: &str, base: NaiveDate) -> Option<NaiveDate> {
    let mut chars = input.chars().peekable();
    let mut sign: i32 = 1;
    if let Some(&c) = chars.peek()
        && (c == '+' || c == '-')
    {
        if c == '-' {
            sign = -1;
        }
        chars.next();
    }

    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if digits.is_empty() {
        return None;
    }

    let qty: i32 = digits.parse().ok()?;
    let unit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let qty = sign.checked_mul(qty)?;
    match unit {
        'd' => base.checked_add_signed(Duration::try_days(qty as i64)?),
        'w' => base.checked_add_signed(Duration::try_weeks(qty as i64)?),
        'm' => checked_add_months(base, qty),
        'y' => checked_add_months(base, qty.checked_mul(12)?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse_jump_input("today", base()), Some(base()));
        assert_eq!(
            parse_jump_input("Tomorrow", base()),
            Some(base() + Duration::days(1))
        );
        assert_eq!(
            parse_jump_input(" yesterday ", base()),
            Some(base() - Duration::days(1))
        );
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(
            parse_jump_input("+3d", base()),
            Some(base() + Duration::days(3))
        );
        assert_eq!(
            parse_jump_input("-2w", base()),
            Some(base() - Duration::weeks(2))
        );
        assert_eq!(
            parse_jump_input("6m", base()),
            NaiveDate::from_ymd_opt(2025, 7, 15)
        );
        assert_eq!(
            parse_jump_input("-1y", base()),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn parses_explicit_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 5);
        assert_eq!(parse_jump_input("2025-09-05", base()), date);
        assert_eq!(parse_jump_input("05/09/2025", base()), date);
        assert_eq!(
            parse_jump_input("2026-01", base()),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
    }

    #[test]
    fn clamps_month_length() {
        let base = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(parse_jump_input("+1m", base), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_jump_input("", base()), None);
        assert_eq!(parse_jump_input("next friday", base()), None);
        assert_eq!(parse_jump_input("+3x", base()), None);
        assert_eq!(parse_jump_input("2025-13", base()), None);
        assert_eq!(parse_jump_input("31/02/2025", base()), None);
    }

    #[test]
    fn rejects_offsets_past_the_calendar_range() {
        assert_eq!(parse_jump_input("+2147483000m", base()), None);
        assert_eq!(parse_jump_input("-2147483000m", base()), None);
        assert_eq!(parse_jump_input("+300000000y", base()), None);
        assert_eq!(parse_jump_input("+99999999999d", base()), None);
    }
}
