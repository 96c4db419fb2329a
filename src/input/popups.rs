use crate::{
    app::App,
    config::key_match,
    date_input::parse_jump_input,
    models::StepDirection,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_popup_events(app: &mut App, key: KeyEvent) -> bool {
    if app.show_help_popup {
        if key.code == KeyCode::Esc || key_match(&key, &app.config.keybindings.global.help) {
            app.show_help_popup = false;
        }
        return true;
    }
    if app.show_jump_popup {
        handle_jump_popup(app, key);
        return true;
    }
    if app.show_entry_sheet {
        handle_entry_sheet(app, key);
        return true;
    }
    false
}

fn handle_jump_popup(app: &mut App, key: KeyEvent) {
    if key_match(&key, &app.config.keybindings.popup.cancel) {
        app.show_jump_popup = false;
        app.jump_input.clear();
        return;
    }
    if key_match(&key, &app.config.keybindings.popup.confirm) {
        submit_jump(app);
        return;
    }

    match key.code {
        KeyCode::Backspace => {
            app.jump_input.pop();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.jump_input.push(c);
        }
        _ => {}
    }
}

fn submit_jump(app: &mut App) {
    match parse_jump_input(&app.jump_input, app.cursor) {
        Some(date) => {
            app.show_jump_popup = false;
            app.jump_input.clear();
            app.jump_to(date);
        }
        None => {
            tracing::debug!(input = %app.jump_input, "unrecognised jump input");
            app.toast("Invalid date. Try 2025-09-05, 05/09/2025, 2026-01 or +3m.");
        }
    }
}

fn handle_entry_sheet(app: &mut App, key: KeyEvent) {
    let bindings = app.config.keybindings.sheet.clone();
    if key_match(&key, &bindings.close) {
        app.close_entry_sheet();
    } else if key_match(&key, &bindings.prev) {
        app.step_entry(StepDirection::Prev);
    } else if key_match(&key, &bindings.next) {
        app.step_entry(StepDirection::Next);
    }
}
