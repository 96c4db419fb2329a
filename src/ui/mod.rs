use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, MONTH_HEADER_ROWS};
use crate::calendar::{self, GRID_COLUMNS, WEEKDAY_NAMES};
use crate::models::{CalendarDay, MonthSlot};

pub mod components;
pub mod popups;
pub mod theme;

use components::truncate_to_width;
use popups::{render_entry_sheet, render_help_popup, render_jump_popup};
use theme::ThemeTokens;

pub fn ui(f: &mut Frame, app: &mut App) {
    let tokens = ThemeTokens::from_theme(&app.config.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    // The calendar body is the scroll viewport.
    app.set_viewport_height(chunks[1].height);

    render_header(f, app, &tokens, chunks[0]);
    render_calendar(f, app, &tokens, chunks[1]);
    render_status(f, app, &tokens, chunks[2]);

    if app.show_entry_sheet {
        render_entry_sheet(f, app, &tokens);
    }
    if app.show_jump_popup {
        render_jump_popup(f, app, &tokens);
    }
    if app.show_help_popup {
        render_help_popup(f, app, &tokens);
    }
}

fn render_header(f: &mut Frame, app: &App, tokens: &ThemeTokens, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.header),
        Style::default()
            .fg(tokens.ui_header)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(selected) = app.selected_date {
        spans.push(Span::styled(
            format!(" selected {}", selected.format("%d/%m/%Y")),
            Style::default().fg(tokens.grid_selected),
        ));
    }
    spans.push(Span::styled(
        format!("  cursor {}", app.cursor.format("%a %d/%m/%Y")),
        Style::default().fg(tokens.ui_muted),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_calendar(f: &mut Frame, app: &App, tokens: &ThemeTokens, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let cell_width = (area.width as usize / GRID_COLUMNS).max(3);
    let offset = app.scroll.offset();
    let height = usize::from(area.height);
    let mut lines: Vec<Line> = vec![Line::default(); height];

    for (slot, bounds) in app.render_map.visible(app.scroll.viewport()) {
        let month_rows = bounds.height() as i64;
        let first_row = (bounds.top - offset) as i64;
        for row in 0..month_rows {
            let y = first_row + row;
            if y < 0 || y >= height as i64 {
                continue;
            }
            lines[y as usize] = month_row(app, tokens, slot, row as usize, cell_width);
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// One terminal row of a month block: title, weekday names, a week line or
/// the trailing gap.
fn month_row(
    app: &App,
    tokens: &ThemeTokens,
    slot: &MonthSlot,
    row: usize,
    cell_width: usize,
) -> Line<'static> {
    let header_rows = usize::from(MONTH_HEADER_ROWS);
    let cell_rows = usize::from(app.config.calendar.cell_rows.max(1));
    match row {
        0 => Line::from(Span::styled(
            format!(" {}", slot.label()),
            Style::default()
                .fg(tokens.ui_accent)
                .add_modifier(Modifier::BOLD),
        )),
        1 => Line::from(
            WEEKDAY_NAMES
                .iter()
                .map(|name| {
                    Span::styled(
                        pad(name, cell_width),
                        Style::default().fg(tokens.grid_weekday),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        r if r < header_rows + calendar::GRID_ROWS * cell_rows => {
            let week = (r - header_rows) / cell_rows;
            let sub_row = (r - header_rows) % cell_rows;
            let cells = calendar::layout(slot.reference_date);
            let spans = cells[week * GRID_COLUMNS..(week + 1) * GRID_COLUMNS]
                .iter()
                .map(|cell| day_cell(app, tokens, *cell, sub_row, cell_width))
                .collect::<Vec<_>>();
            Line::from(spans)
        }
        _ => Line::default(),
    }
}

fn day_cell(
    app: &App,
    tokens: &ThemeTokens,
    cell: CalendarDay,
    sub_row: usize,
    cell_width: usize,
) -> Span<'static> {
    let Some(date) = cell.date() else {
        return Span::raw(" ".repeat(cell_width));
    };
    let entries = app.index.on(date);
    let text = match sub_row {
        0 if entries.len() > 1 => format!("{:>2} ×{}", date.day(), entries.len()),
        0 => format!("{:>2}", date.day()),
        1 => entries
            .first()
            .and_then(|e| e.categories.first())
            .map(|c| format!(" {c}"))
            .unwrap_or_default(),
        _ => String::new(),
    };
    Span::styled(pad(&text, cell_width), day_style(app, tokens, date, !entries.is_empty()))
}

fn day_style(app: &App, tokens: &ThemeTokens, date: NaiveDate, has_entries: bool) -> Style {
    let mut style = Style::default();
    if has_entries {
        style = style.bg(tokens.grid_entry_bg);
    }
    if date == app.today {
        style = style.fg(tokens.grid_today).add_modifier(Modifier::BOLD);
    }
    if app.selected_date == Some(date) {
        style = style
            .fg(tokens.grid_selected)
            .add_modifier(Modifier::UNDERLINED);
    }
    if date == app.cursor {
        style = style.bg(tokens.grid_cursor_bg);
    }
    style
}

fn pad(text: &str, width: usize) -> String {
    let cell = truncate_to_width(text, width.saturating_sub(1));
    let used = unicode_width::UnicodeWidthStr::width(cell.as_str());
    format!("{cell}{}", " ".repeat(width.saturating_sub(used)))
}

fn render_status(f: &mut Frame, app: &App, tokens: &ThemeTokens, area: Rect) {
    let line = if let Some(message) = app.toast_message.as_deref() {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(tokens.ui_accent),
        ))
    } else {
        let hint = " hjkl move · Enter open · g jump · t today · ? help · q quit";
        let count = format!(
            "  {} entries on {} days",
            app.index.len(),
            app.index.days().count()
        );
        Line::from(vec![
            Span::styled(hint, Style::default().fg(tokens.ui_muted)),
            Span::styled(count, Style::default().fg(tokens.ui_muted)),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}
