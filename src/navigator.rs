use chrono::NaiveDate;

use crate::models::{EntryId, JournalEntry, StepDirection};

/// Chronological stepping through entries for the entry sheet.
#[derive(Debug, Clone, Default)]
pub struct EntryNavigator {
    sorted: Vec<(NaiveDate, JournalEntry)>,
    active_index: Option<usize>,
}

impl EntryNavigator {
    /// Sorts by day; same-day entries keep their input order. Entries with an
    /// unparsable date are not navigable.
    pub fn new(entries: &[JournalEntry]) -> Self {
        let mut sorted: Vec<(NaiveDate, JournalEntry)> = entries
            .iter()
            .filter_map(|entry| entry.day().ok().map(|day| (day, entry.clone())))
            .collect();
        sorted.sort_by_key(|(day, _)| *day);
        Self {
            sorted,
            active_index: None,
        }
    }

    pub fn open(&mut self, id: EntryId) -> Option<usize> {
        let position = self.sorted.iter().position(|(_, entry)| entry.id == id)?;
        self.active_index = Some(position);
        Some(position)
    }

    pub fn close(&mut self) {
        self.active_index = None;
    }

    /// Moves one entry back or forward. Returns `None` and leaves the position
    /// untouched when already at that end (or when nothing is open).
    pub fn step(&mut self, direction: StepDirection) -> Option<&JournalEntry> {
        if !self.can_step(direction) {
            return None;
        }
        let current = self.active_index?;
        let next = match direction {
            StepDirection::Prev => current - 1,
            StepDirection::Next => current + 1,
        };
        self.active_index = Some(next);
        self.sorted.get(next).map(|(_, entry)| entry)
    }

    pub fn can_step(&self, direction: StepDirection) -> bool {
        match (self.active_index, direction) {
            (Some(i), StepDirection::Prev) => i > 0,
            (Some(i), StepDirection::Next) => i + 1 < self.sorted.len(),
            (None, _) => false,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn current(&self) -> Option<&JournalEntry> {
        self.active_index
            .and_then(|i| self.sorted.get(i))
            .map(|(_, entry)| entry)
    }

    pub fn current_day(&self) -> Option<NaiveDate> {
        self.active_index
            .and_then(|i| self.sorted.get(i))
            .map(|(day, _)| *day)
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }
}
