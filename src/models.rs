use chrono::NaiveDate;

use crate::calendar::{self, month_key, month_start};
use crate::error::Result;

/// Longest star row the entry sheet draws.
pub const MAX_STARS: usize = 10;

/// Synthetic identity handed out when the entry collection is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct JournalEntry {
    pub id: EntryId,
    /// Day in source form, `dd/mm/yyyy`.
    pub date: String,
    pub description: String,
    pub rating: f64,
    pub categories: Vec<String>,
    pub image_ref: String,
}

impl JournalEntry {
    pub fn day(&self) -> Result<NaiveDate> {
        calendar::parse_entry_date(&self.date)
    }

    pub fn stars(&self) -> String {
        let count = self.rating.round().clamp(0.0, MAX_STARS as f64) as usize;
        "★".repeat(count)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarDay {
    Empty,
    DayOf(NaiveDate),
}

impl CalendarDay {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarDay::Empty => None,
            CalendarDay::DayOf(date) => Some(*date),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthSlot {
    pub reference_date: NaiveDate,
    pub key: String,
}

impl MonthSlot {
    pub fn containing(date: NaiveDate) -> Self {
        let reference_date = month_start(date);
        Self {
            reference_date,
            key: month_key(reference_date),
        }
    }

    /// Month name and year, e.g. "September 2025".
    pub fn label(&self) -> String {
        self.reference_date.format("%B %Y").to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtendDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Prev,
    Next,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ViewportMatch {
    pub month_key: Option<String>,
    pub intersection_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(rating: f64) -> JournalEntry {
        JournalEntry {
            id: EntryId(0),
            date: "05/09/2025".to_string(),
            description: String::new(),
            rating,
            categories: Vec::new(),
            image_ref: String::new(),
        }
    }

    #[test]
    fn stars_round_the_rating() {
        assert_eq!(rated(4.4).stars(), "★★★★");
        assert_eq!(rated(4.5).stars(), "★★★★★");
        assert_eq!(rated(0.0).stars(), "");
    }

    #[test]
    fn stars_stay_bounded_for_odd_ratings() {
        assert_eq!(rated(1e30).stars().chars().count(), MAX_STARS);
        assert_eq!(rated(-3.0).stars(), "");
        assert_eq!(rated(f64::NAN).stars(), "");
        assert_eq!(rated(f64::INFINITY).stars().chars().count(), MAX_STARS);
    }
}
