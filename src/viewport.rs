//! Picks the month that best fills the viewport, for the header label.

use crate::models::ViewportMatch;

/// Vertical extent in layout units (one unit is one terminal row).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn intersection(&self, other: &Bounds) -> f64 {
        (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0)
    }

    /// Share of `self` that lies inside `viewport`, in `[0, 1]`.
    pub fn visible_ratio(&self, viewport: &Bounds) -> f64 {
        let height = self.height();
        if height <= 0.0 || !height.is_finite() {
            return 0.0;
        }
        (self.intersection(viewport) / height).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedMonth {
    pub key: String,
    /// e.g. "September 2025"
    pub label: String,
    pub bounds: Bounds,
}

/// Returns the month with the strictly greatest visible ratio; earlier months
/// win ties. An empty match means nothing is on screen and the caller should
/// keep whatever label it already shows.
pub fn best_match(months: &[RenderedMonth], viewport: Bounds) -> ViewportMatch {
    let mut best = ViewportMatch::default();
    for month in months {
        let ratio = month.bounds.visible_ratio(&viewport);
        if ratio > best.intersection_ratio {
            best = ViewportMatch {
                month_key: Some(month.key.clone()),
                intersection_ratio: ratio,
            };
        }
    }
    best
}
