use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::StepDirection;
use crate::ui::components::{centered_fixed, centered_rect};
use crate::ui::theme::ThemeTokens;

pub fn render_entry_sheet(f: &mut Frame, app: &App, tokens: &ThemeTokens) {
    let (Some(entry), Some(day)) = (app.navigator.current(), app.navigator.current_day()) else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", day.format("%A, %d %B %Y")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.ui_accent));
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(area);

    let rating = Line::from(vec![
        Span::styled(entry.stars(), Style::default().fg(tokens.content_rating)),
        Span::styled(
            format!("  {:.1}", entry.rating),
            Style::default().fg(tokens.ui_muted),
        ),
    ]);
    f.render_widget(Paragraph::new(rating), inner[0]);

    let categories = if entry.categories.is_empty() {
        "no categories".to_string()
    } else {
        entry.categories.join(", ")
    };
    f.render_widget(
        Paragraph::new(categories).style(Style::default().fg(tokens.grid_weekday)),
        inner[1],
    );

    let mut body = vec![Line::default()];
    body.extend(entry.description.lines().map(|l| Line::from(l.to_string())));
    if !entry.image_ref.is_empty() {
        body.push(Line::default());
        body.push(Line::from(Span::styled(
            format!("image: {}", entry.image_ref),
            Style::default().fg(tokens.ui_muted),
        )));
    }
    f.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), inner[2]);

    let step_style = |direction| {
        if app.navigator.can_step(direction) {
            Style::default().fg(tokens.ui_accent)
        } else {
            Style::default()
                .fg(tokens.ui_muted)
                .add_modifier(Modifier::DIM)
        }
    };
    let position = app.navigator.active_index().map_or(0, |i| i + 1);
    let footer = Line::from(vec![
        Span::styled("← prev", step_style(StepDirection::Prev)),
        Span::styled(
            format!("  {position}/{}  ", app.navigator.len()),
            Style::default().fg(tokens.ui_muted),
        ),
        Span::styled("next →", step_style(StepDirection::Next)),
        Span::styled("   Esc: close", Style::default().fg(tokens.ui_muted)),
    ]);
    f.render_widget(Paragraph::new(footer), inner[3]);
}

pub fn render_jump_popup(f: &mut Frame, app: &App, tokens: &ThemeTokens) {
    let block = Block::default()
        .title(" Jump to date ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.ui_accent));
    let area = centered_fixed(56, 5, f.area());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    let input = Line::from(vec![
        Span::raw(format!(" {}", app.jump_input)),
        Span::styled("▏", Style::default().fg(tokens.ui_accent)),
    ]);
    f.render_widget(Paragraph::new(input), inner[0]);
    f.render_widget(
        Paragraph::new(" YYYY-MM-DD · dd/mm/yyyy · YYYY-MM · today · +3m")
            .style(Style::default().fg(tokens.ui_muted)),
        inner[1],
    );
}

pub fn render_help_popup(f: &mut Frame, app: &App, tokens: &ThemeTokens) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.ui_border));
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(2)
        .split(area);

    let keys = &app.config.keybindings;
    let sections: [(&str, Vec<(&str, &Vec<String>)>); 3] = [
        (
            "Calendar",
            vec![
                ("Previous / next day", &keys.calendar.day_prev),
                ("", &keys.calendar.day_next),
                ("Previous / next week", &keys.calendar.week_prev),
                ("", &keys.calendar.week_next),
                ("Scroll", &keys.calendar.scroll_up),
                ("", &keys.calendar.scroll_down),
                ("Page", &keys.calendar.page_up),
                ("", &keys.calendar.page_down),
                ("Open entry", &keys.calendar.open),
            ],
        ),
        (
            "Entry sheet",
            vec![
                ("Previous entry", &keys.sheet.prev),
                ("Next entry", &keys.sheet.next),
                ("Close", &keys.sheet.close),
            ],
        ),
        (
            "Global",
            vec![
                ("Jump to date", &keys.global.jump),
                ("Today", &keys.global.today),
                ("Help", &keys.global.help),
                ("Quit", &keys.global.quit),
            ],
        ),
    ];

    let key_style = Style::default().fg(tokens.ui_accent);
    let mut lines = Vec::new();
    for (title, rows) in sections {
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(tokens.ui_header)
                .add_modifier(Modifier::BOLD),
        )));
        for (label, bindings) in rows {
            lines.push(Line::from(vec![
                Span::raw(format!("  {label:<22}")),
                Span::styled(bindings.join(" / "), key_style),
            ]));
        }
        lines.push(Line::default());
    }
    f.render_widget(Paragraph::new(lines), inner[0]);
    f.render_widget(
        Paragraph::new("Esc / ?: close").style(Style::default().fg(tokens.ui_muted)),
        inner[1],
    );
}
