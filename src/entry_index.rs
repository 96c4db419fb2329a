use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::day_key;
use crate::models::{EntryId, JournalEntry};

/// Entries grouped by calendar day ("YYYY-MM-DD"), each list in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryIndex {
    by_day: BTreeMap<String, Vec<JournalEntry>>,
    rejected: Vec<(EntryId, String)>,
}

impl EntryIndex {
    /// Groups `entries` by day. Entries whose date cannot be parsed are left
    /// out of the index and recorded in [`EntryIndex::rejected`].
    pub fn build(entries: &[JournalEntry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            match entry.day() {
                Ok(day) => index
                    .by_day
                    .entry(day_key(day))
                    .or_default()
                    .push(entry.clone()),
                Err(err) => {
                    tracing::warn!(entry = entry.id.0, %err, "skipping entry");
                    index.rejected.push((entry.id, entry.date.clone()));
                }
            }
        }
        index
    }

    pub fn get(&self, key: &str) -> &[JournalEntry] {
        self.by_day.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn on(&self, day: NaiveDate) -> &[JournalEntry] {
        self.get(&day_key(day))
    }

    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.by_day.keys().map(String::as_str)
    }

    /// Ids and raw dates of entries that could not be indexed.
    pub fn rejected(&self) -> &[(EntryId, String)] {
        &self.rejected
    }
}
