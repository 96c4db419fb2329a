pub(crate) mod navigate;
pub(crate) mod popups;

use crate::app::App;
use crossterm::event::{self, Event, KeyEventKind};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Mouse(mouse_event) => match mouse_event.kind {
            event::MouseEventKind::ScrollUp => app.scroll_rows(-WHEEL_ROWS),
            event::MouseEventKind::ScrollDown => app.scroll_rows(WHEEL_ROWS),
            _ => {}
        },
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if popups::handle_popup_events(app, key) {
                return;
            }
            navigate::handle_calendar_keys(app, key);
        }
        Event::Resize(_, _) => app.on_scroll(),
        _ => {}
    }
}
