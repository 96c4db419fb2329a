use crate::models::ExtendDirection;
use crate::viewport::Bounds;

/// Distance from either end of the content that asks for more months.
pub const EDGE_THRESHOLD: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    /// Eases toward the target over several ticks.
    Smooth,
}

/// Scroll position over the stacked month content.
#[derive(Debug, Clone, Default)]
pub struct ScrollHost {
    offset: f64,
    viewport_height: f64,
    content_height: f64,
    animation_target: Option<f64>,
}

impl ScrollHost {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn viewport(&self) -> Bounds {
        Bounds::new(self.offset, self.viewport_height)
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        self.clamp();
    }

    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height.max(0.0);
        self.clamp();
    }

    /// User-initiated scroll; interrupts any animation.
    pub fn scroll_by(&mut self, delta: f64) {
        self.animation_target = None;
        self.offset += delta;
        self.clamp();
    }

    pub fn scroll_to(&mut self, target: f64, behavior: ScrollBehavior) {
        match behavior {
            ScrollBehavior::Instant => {
                self.animation_target = None;
                self.offset = target;
                self.clamp();
            }
            ScrollBehavior::Smooth => self.animation_target = Some(target),
        }
    }

    /// Moves the offset (and any animation target) when content is inserted
    /// or removed above the viewport, so the visible rows stay put.
    pub fn shift(&mut self, delta: f64) {
        self.offset += delta;
        if let Some(target) = self.animation_target.as_mut() {
            *target += delta;
        }
        self.clamp();
    }

    /// Scrolls the least amount needed to bring `bounds` fully into view.
    pub fn reveal(&mut self, bounds: Bounds) {
        let viewport = self.viewport();
        if bounds.top < viewport.top {
            self.scroll_to(bounds.top, ScrollBehavior::Instant);
        } else if bounds.bottom > viewport.bottom {
            self.scroll_to(bounds.bottom - self.viewport_height, ScrollBehavior::Instant);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation_target.is_some()
    }

    /// One animation step. Returns whether the offset changed.
    pub fn advance(&mut self) -> bool {
        let Some(target) = self.animation_target else {
            return false;
        };
        let target = target.clamp(0.0, self.max_offset());
        let remaining = target - self.offset;
        let before = self.offset;
        if remaining.abs() <= 1.0 {
            self.offset = target;
            self.animation_target = None;
        } else {
            let step = (remaining / 3.0).round();
            self.offset += if step == 0.0 { remaining.signum() } else { step };
        }
        self.clamp();
        self.offset != before
    }

    /// Edges within `threshold` of the viewport; down is reported first.
    pub fn edges_near(&self, threshold: f64) -> Vec<ExtendDirection> {
        let mut edges = Vec::new();
        if self.content_height - self.offset <= self.viewport_height + threshold {
            edges.push(ExtendDirection::Down);
        }
        if self.offset <= threshold {
            edges.push(ExtendDirection::Up);
        }
        edges
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset()).round();
    }
}
