use crate::app::App;
use chrono::{DateTime, Local};

/// Time-driven work between input events: due jump scrolls, one animation
/// step and toast expiry.
pub fn tick(app: &mut App, now: DateTime<Local>) {
    app.fire_pending_scroll(now);

    if app.scroll.advance() {
        app.on_scroll();
    } else if !app.scroll.is_animating() && !app.scheduler.is_pending() {
        // Settled; let eviction catch up with anything skipped mid-jump.
        app.on_scroll();
    }

    if let Some(expiry) = app.toast_expiry
        && now >= expiry
    {
        app.toast_expiry = None;
        app.toast_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::{Duration, NaiveDate};

    fn make_test_app() -> App {
        let mut config = Config::default();
        config.calendar.anchor_date = Some("2025-08-01".to_string());
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut app = App::with_config(config, Vec::new(), today);
        app.set_viewport_height(40);
        app
    }

    #[test]
    fn ticks_drive_a_jump_to_completion() {
        let mut app = make_test_app();
        let now = Local::now();
        app.jump_to_at(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), now);

        tick(&mut app, now);
        assert!(app.scheduler.is_pending());

        let mut at = now + Duration::milliseconds(250);
        for _ in 0..100 {
            tick(&mut app, at);
            at += Duration::milliseconds(50);
        }
        assert!(!app.scheduler.is_pending());
        assert!(!app.scroll.is_animating());
        assert_eq!(app.header, "March 2026");
    }

    #[test]
    fn expires_toasts() {
        let mut app = make_test_app();
        app.toast("Hello");
        let expiry = app.toast_expiry.unwrap();

        tick(&mut app, expiry - Duration::milliseconds(1));
        assert_eq!(app.toast_message.as_deref(), Some("Hello"));

        tick(&mut app, expiry);
        assert!(app.toast_message.is_none());
        assert!(app.toast_expiry.is_none());
    }
}
