use crate::{app::App, config::key_match};
use crossterm::event::KeyEvent;

pub fn handle_calendar_keys(app: &mut App, key: KeyEvent) {
    let bindings = app.config.keybindings.clone();

    if key_match(&key, &bindings.global.quit) {
        app.quit();
    } else if key_match(&key, &bindings.global.help) {
        app.show_help_popup = true;
    } else if key_match(&key, &bindings.global.jump) {
        app.jump_input.clear();
        app.show_jump_popup = true;
    } else if key_match(&key, &bindings.global.today) {
        let today = app.today;
        app.jump_to(today);
    } else if key_match(&key, &bindings.calendar.day_prev) {
        app.move_cursor(-1);
    } else if key_match(&key, &bindings.calendar.day_next) {
        app.move_cursor(1);
    } else if key_match(&key, &bindings.calendar.week_prev) {
        app.move_cursor(-7);
    } else if key_match(&key, &bindings.calendar.week_next) {
        app.move_cursor(7);
    } else if key_match(&key, &bindings.calendar.scroll_up) {
        app.scroll_rows(-1);
    } else if key_match(&key, &bindings.calendar.scroll_down) {
        app.scroll_rows(1);
    } else if key_match(&key, &bindings.calendar.page_up) {
        let rows = app.page_rows();
        app.scroll_rows(-rows);
    } else if key_match(&key, &bindings.calendar.page_down) {
        let rows = app.page_rows();
        app.scroll_rows(rows);
    } else if key_match(&key, &bindings.calendar.open) {
        app.open_entry_at_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{EntryId, JournalEntry};
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_app() -> App {
        let mut config = Config::default();
        config.calendar.anchor_date = Some("2025-08-01".to_string());
        let entries = vec![JournalEntry {
            id: EntryId(0),
            date: "08/08/2025".to_string(),
            description: "Picnic".to_string(),
            rating: 5.0,
            categories: vec!["outdoors".to_string()],
            image_ref: String::new(),
        }];
        let mut app = App::with_config(config, entries, ymd(2026, 10, 18));
        app.set_viewport_height(40);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_calendar_keys(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_move_the_day_cursor() {
        let mut app = make_test_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.cursor, ymd(2025, 8, 2));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, ymd(2025, 8, 9));
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, ymd(2025, 8, 1));
    }

    #[test]
    fn enter_opens_the_entry_sheet() {
        let mut app = make_test_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, ymd(2025, 8, 8));
        press(&mut app, KeyCode::Enter);
        assert!(app.show_entry_sheet);
        assert_eq!(app.navigator.current().map(|e| e.id), Some(EntryId(0)));
    }

    #[test]
    fn jump_key_opens_a_fresh_prompt() {
        let mut app = make_test_app();
        app.jump_input = "stale".to_string();
        press(&mut app, KeyCode::Char('g'));
        assert!(app.show_jump_popup);
        assert!(app.jump_input.is_empty());
    }

    #[test]
    fn today_key_schedules_a_jump() {
        let mut app = make_test_app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.cursor, ymd(2026, 10, 18));
        assert_eq!(app.selected_date, Some(ymd(2026, 10, 18)));
        assert!(app.scheduler.is_pending());
        assert!(app.window.contains_key("2026-10"));
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut app = make_test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
