use std::collections::HashMap;

use crate::models::MonthSlot;
use crate::viewport::{Bounds, RenderedMonth};
use crate::window::MonthWindow;

/// Where each loaded month sits in the scroll content, addressable by key.
#[derive(Debug, Clone, Default)]
pub struct RenderMap {
    months: Vec<RenderedMonth>,
    slots: Vec<MonthSlot>,
    positions: HashMap<String, usize>,
    content_height: f64,
}

impl RenderMap {
    /// Stacks the window's months top to bottom, `month_height` units each.
    pub fn build(window: &MonthWindow, month_height: f64) -> Self {
        let mut map = Self::default();
        let mut top = 0.0;
        for (i, slot) in window.slots().iter().enumerate() {
            map.months.push(RenderedMonth {
                key: slot.key.clone(),
                label: slot.label(),
                bounds: Bounds::new(top, month_height),
            });
            map.slots.push(slot.clone());
            map.positions.insert(slot.key.clone(), i);
            top += month_height;
        }
        map.content_height = top;
        map
    }

    pub fn rendered(&self) -> &[RenderedMonth] {
        &self.months
    }

    pub fn bounds_of(&self, key: &str) -> Option<Bounds> {
        self.positions.get(key).map(|&i| self.months[i].bounds)
    }

    pub fn label_of(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&i| self.months[i].label.as_str())
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Months overlapping `viewport`, with their slot, in document order.
    pub fn visible(&self, viewport: Bounds) -> impl Iterator<Item = (&MonthSlot, Bounds)> {
        self.slots
            .iter()
            .zip(self.months.iter())
            .filter(move |(_, month)| month.bounds.intersection(&viewport) > 0.0)
            .map(|(slot, month)| (slot, month.bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtendDirection;
    use chrono::NaiveDate;

    fn window() -> MonthWindow {
        MonthWindow::new(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap())
    }

    #[test]
    fn stacks_months_in_window_order() {
        let map = RenderMap::build(&window(), 15.0);
        assert_eq!(map.content_height(), 45.0);
        assert_eq!(map.bounds_of("2025-07"), Some(Bounds::new(0.0, 15.0)));
        assert_eq!(map.bounds_of("2025-09"), Some(Bounds::new(30.0, 15.0)));
        assert_eq!(map.bounds_of("2025-10"), None);
        assert_eq!(map.label_of("2025-08"), Some("August 2025"));
    }

    #[test]
    fn rebuild_tracks_prepended_months() {
        let mut window = window();
        window.extend(ExtendDirection::Up);
        let map = RenderMap::build(&window, 10.0);
        assert_eq!(map.bounds_of("2025-04").map(|b| b.top), Some(0.0));
        assert_eq!(map.bounds_of("2025-07").map(|b| b.top), Some(30.0));
    }

    #[test]
    fn visible_filters_by_overlap() {
        let map = RenderMap::build(&window(), 15.0);
        let keys: Vec<&str> = map
            .visible(Bounds::new(14.0, 10.0))
            .map(|(slot, _)| slot.key.as_str())
            .collect();
        assert_eq!(keys, vec!["2025-07", "2025-08"]);
    }
}
