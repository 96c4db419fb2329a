use chrono::NaiveDate;

use crate::calendar::{add_months, month_start};
use crate::models::{ExtendDirection, MonthSlot};

/// Months added per extension.
pub const EXTEND_STEP: usize = 3;
/// Smallest cap accepted by [`MonthWindow::evict_beyond`].
pub const MIN_WINDOW_CAP: usize = 9;

/// Months dropped by an eviction pass, split by edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Eviction {
    pub front: Vec<MonthSlot>,
    pub back: Vec<MonthSlot>,
}

impl Eviction {
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }
}

/// The contiguous, ascending run of months currently materialised.
///
/// Every mutation builds a new slot vector and swaps it in whole, so a reader
/// holding `slots()` between mutations always sees a complete window.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthWindow {
    anchor: NaiveDate,
    slots: Vec<MonthSlot>,
}

impl MonthWindow {
    /// Starts with the anchor's month and its two neighbours.
    pub fn new(anchor: NaiveDate) -> Self {
        let anchor = month_start(anchor);
        let slots = (-1..=1)
            .map(|offset| MonthSlot::containing(add_months(anchor, offset)))
            .collect();
        Self { anchor, slots }
    }

    pub fn slots(&self) -> &[MonthSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn first(&self) -> Option<&MonthSlot> {
        self.slots.first()
    }

    pub fn last(&self) -> Option<&MonthSlot> {
        self.slots.last()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Adds [`EXTEND_STEP`] months past the given edge and returns them in
    /// ascending order.
    pub fn extend(&mut self, direction: ExtendDirection) -> Vec<MonthSlot> {
        let step = EXTEND_STEP as i32;
        let added: Vec<MonthSlot> = match direction {
            ExtendDirection::Down => {
                let base = self.last().map_or(self.anchor, |s| s.reference_date);
                (1..=step)
                    .map(|i| MonthSlot::containing(add_months(base, i)))
                    .collect()
            }
            ExtendDirection::Up => {
                let base = self.first().map_or(self.anchor, |s| s.reference_date);
                (1..=step)
                    .rev()
                    .map(|i| MonthSlot::containing(add_months(base, -i)))
                    .collect()
            }
        };

        let mut next = Vec::with_capacity(self.slots.len() + added.len());
        match direction {
            ExtendDirection::Down => {
                next.extend_from_slice(&self.slots);
                next.extend_from_slice(&added);
            }
            ExtendDirection::Up => {
                next.extend_from_slice(&added);
                next.extend_from_slice(&self.slots);
            }
        }
        self.slots = next;

        tracing::debug!(
            ?direction,
            first = %self.slots[0].key,
            len = self.slots.len(),
            "extended month window"
        );
        added
    }

    /// Shrinks the window to at most `cap` months (never below
    /// [`MIN_WINDOW_CAP`]) by dropping whichever edge month lies farther from
    /// `focus_key`. Equal distances drop the trailing edge.
    pub fn evict_beyond(&mut self, cap: usize, focus_key: &str) -> Eviction {
        let cap = cap.max(MIN_WINDOW_CAP);
        if self.slots.len() <= cap {
            return Eviction::default();
        }

        let focus = self
            .position(focus_key)
            .unwrap_or(self.slots.len() / 2);
        let mut start = 0;
        let mut end = self.slots.len() - 1;
        while end - start + 1 > cap {
            if focus.saturating_sub(start) > end.saturating_sub(focus) {
                start += 1;
            } else {
                end -= 1;
            }
        }

        let eviction = Eviction {
            front: self.slots[..start].to_vec(),
            back: self.slots[end + 1..].to_vec(),
        };
        self.slots = self.slots[start..=end].to_vec();

        tracing::debug!(
            front = eviction.front.len(),
            back = eviction.back.len(),
            len = self.slots.len(),
            "evicted months"
        );
        eviction
    }
}
