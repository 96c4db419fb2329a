//! Jump-to-date: grow the window until the target month is loaded, then
//! scroll to it once the new months have had time to lay out.

use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::calendar::{month_diff, month_key};
use crate::error::{Error, Result};
use crate::models::ExtendDirection;
use crate::window::{EXTEND_STEP, MonthWindow};

/// Default wait between loading months and measuring them.
pub const SETTLE_DELAY_MS: i64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpPlan {
    pub direction: Option<ExtendDirection>,
    pub count: usize,
}

impl JumpPlan {
    pub const NONE: JumpPlan = JumpPlan {
        direction: None,
        count: 0,
    };
}

/// Number of extensions, counted from the window's first month, that are
/// guaranteed to bring `target`'s month into the window. One extra step is
/// added so a distance that is not a multiple of three still lands inside.
pub fn resolve(target: NaiveDate, window: &MonthWindow) -> JumpPlan {
    if window.contains_key(&month_key(target)) {
        return JumpPlan::NONE;
    }
    let diff = window
        .first()
        .map_or(0, |first| month_diff(first.reference_date, target));
    let count = (diff.unsigned_abs() as usize).div_ceil(EXTEND_STEP) + 1;
    let direction = if diff > 0 {
        ExtendDirection::Down
    } else {
        ExtendDirection::Up
    };
    JumpPlan {
        direction: Some(direction),
        count,
    }
}

/// Resolves and performs the extensions for `target`. Plans longer than
/// `max_extensions` are refused rather than materialising that many months.
pub fn load_target(
    target: NaiveDate,
    window: &mut MonthWindow,
    max_extensions: usize,
) -> Result<JumpPlan> {
    let plan = resolve(target, window);
    if plan.count > max_extensions {
        return Err(Error::TargetMonthUnreachable {
            target,
            attempts: plan.count,
        });
    }
    if let Some(direction) = plan.direction {
        for _ in 0..plan.count {
            window.extend(direction);
        }
    }
    if !window.contains_key(&month_key(target)) {
        return Err(Error::TargetMonthUnreachable {
            target,
            attempts: plan.count,
        });
    }
    tracing::info!(target_date = %target, direction = ?plan.direction, count = plan.count, "loaded jump target");
    Ok(plan)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingScroll {
    pub target: NaiveDate,
    pub due: DateTime<Local>,
}

/// Holds the single outstanding scroll-to-month request. A newer request
/// replaces an older one that has not fired yet.
#[derive(Debug, Clone, Default)]
pub struct ScrollScheduler {
    pending: Option<PendingScroll>,
}

impl ScrollScheduler {
    /// Returns the request that was cancelled, if any.
    pub fn schedule(
        &mut self,
        target: NaiveDate,
        now: DateTime<Local>,
        settle: Duration,
    ) -> Option<PendingScroll> {
        self.pending.replace(PendingScroll {
            target,
            due: now + settle,
        })
    }

    /// Hands out the pending target once its settle delay has passed.
    pub fn poll(&mut self, now: DateTime<Local>) -> Option<NaiveDate> {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.pending = None;
                Some(pending.target)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn august_window() -> MonthWindow {
        MonthWindow::new(ymd(2025, 8, 1))
    }

    #[test]
    fn loaded_target_needs_no_extensions() {
        let window = august_window();
        assert_eq!(resolve(ymd(2025, 9, 30), &window), JumpPlan::NONE);
        assert_eq!(resolve(ymd(2025, 7, 1), &window), JumpPlan::NONE);
    }

    #[test]
    fn jump_to_january_extends_down_three_times() {
        let mut window = august_window();
        let plan = load_target(ymd(2026, 1, 15), &mut window, 100).unwrap();

        assert_eq!(
            plan,
            JumpPlan {
                direction: Some(ExtendDirection::Down),
                count: 3
            }
        );
        assert!(window.contains_key("2026-01"));
        assert_eq!(window.last().unwrap().key, "2026-06");
    }

    #[test]
    fn jump_backwards_extends_up() {
        let mut window = august_window();
        let plan = load_target(ymd(2024, 12, 25), &mut window, 100).unwrap();
        // 2025-07 back to 2024-12 is 7 months: ceil(7 / 3) + 1.
        assert_eq!(plan.direction, Some(ExtendDirection::Up));
        assert_eq!(plan.count, 4);
        assert!(window.contains_key("2024-12"));
    }

    #[test]
    fn every_target_in_range_gets_loaded_within_bound() {
        for offset in -40i32..=40 {
            let mut window = august_window();
            for _ in 0..(offset.rem_euclid(3)) {
                window.extend(ExtendDirection::Down);
            }
            let target = crate::calendar::add_months(ymd(2025, 8, 10), offset);
            let diff = month_diff(window.first().unwrap().reference_date, target);
            let bound = (diff.unsigned_abs() as usize).div_ceil(EXTEND_STEP) + 1;

            let plan = load_target(target, &mut window, 1000).unwrap();
            assert!(plan.count <= bound, "offset {offset}");
            assert!(window.contains_key(&month_key(target)), "offset {offset}");
        }
    }

    #[test]
    fn refuses_plans_beyond_the_cap() {
        let mut window = august_window();
        let err = load_target(ymd(2125, 1, 1), &mut window, 10).unwrap_err();
        assert!(matches!(err, Error::TargetMonthUnreachable { .. }));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn scheduler_fires_once_after_settle() {
        let now = Local::now();
        let mut scheduler = ScrollScheduler::default();
        scheduler.schedule(ymd(2026, 1, 1), now, Duration::milliseconds(200));

        assert_eq!(scheduler.poll(now), None);
        assert_eq!(
            scheduler.poll(now + Duration::milliseconds(200)),
            Some(ymd(2026, 1, 1))
        );
        assert_eq!(scheduler.poll(now + Duration::seconds(5)), None);
    }

    #[test]
    fn newer_request_replaces_pending_one() {
        let now = Local::now();
        let settle = Duration::milliseconds(200);
        let mut scheduler = ScrollScheduler::default();
        scheduler.schedule(ymd(2026, 1, 1), now, settle);
        let cancelled = scheduler.schedule(ymd(2024, 3, 1), now, settle);

        assert_eq!(cancelled.map(|p| p.target), Some(ymd(2026, 1, 1)));
        assert_eq!(
            scheduler.poll(now + settle),
            Some(ymd(2024, 3, 1))
        );
        assert!(!scheduler.is_pending());
    }
}
