use crate::config::Theme;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct ThemeTokens {
    pub ui_border: Color,
    pub ui_header: Color,
    pub ui_accent: Color,
    pub ui_muted: Color,
    pub grid_weekday: Color,
    pub grid_entry_bg: Color,
    pub grid_selected: Color,
    pub grid_cursor_bg: Color,
    pub grid_today: Color,
    pub content_rating: Color,
}

impl ThemeTokens {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            ui_border: parse_color(&theme.border),
            ui_header: parse_color(&theme.header),
            ui_accent: parse_color(&theme.accent),
            ui_muted: parse_color(&theme.muted),
            grid_weekday: parse_color(&theme.weekday),
            grid_entry_bg: parse_color(&theme.entry_day),
            grid_selected: parse_color(&theme.selected_day),
            grid_cursor_bg: parse_color(&theme.cursor),
            grid_today: parse_color(&theme.today),
            content_rating: parse_color(&theme.rating),
        }
    }
}

/// Named colors, `r,g,b` triples and `#rrggbb`. Anything else is `Reset`.
pub fn parse_color(s: &str) -> Color {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => parse_hex(&s)
            .or_else(|| parse_rgb_triple(&s))
            .unwrap_or(Color::Reset),
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb_triple(s: &str) -> Option<Color> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].trim().parse().ok()?;
    let g = parts[1].trim().parse().ok()?;
    let b = parts[2].trim().parse().ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colors_case_insensitive() {
        assert_eq!(parse_color("Blue"), Color::Blue);
        assert_eq!(parse_color("lightcyan"), Color::LightCyan);
        assert_eq!(parse_color("DaRkGrAy"), Color::DarkGray);
    }

    #[test]
    fn parses_rgb_and_hex() {
        assert_eq!(parse_color(" 10 , 20 , 30 "), Color::Rgb(10, 20, 30));
        assert_eq!(parse_color("#1f4f4a"), Color::Rgb(0x1f, 0x4f, 0x4a));
        assert_eq!(parse_color("#FFFFFF"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn invalid_values_fall_back_to_reset() {
        assert_eq!(parse_color("not-a-color"), Color::Reset);
        assert_eq!(parse_color("1,2"), Color::Reset);
        assert_eq!(parse_color("#12345"), Color::Reset);
        assert_eq!(parse_color("#zz0000"), Color::Reset);
    }

    #[test]
    fn maps_theme_keys_to_tokens() {
        let theme = Theme {
            border: "Red".to_string(),
            entry_day: "1,2,3".to_string(),
            ..Default::default()
        };

        let tokens = ThemeTokens::from_theme(&theme);
        assert_eq!(tokens.ui_border, Color::Red);
        assert_eq!(tokens.grid_entry_bg, Color::Rgb(1, 2, 3));
        assert_eq!(tokens.ui_header, Color::Cyan);
        assert_eq!(tokens.grid_today, Color::Yellow);
    }
}
