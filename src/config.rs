use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::jump::SETTLE_DELAY_MS;
use crate::scroll::EDGE_THRESHOLD;

pub fn key_match(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_binding(binding))
        .any(|(code, modifiers)| is_match(key, code, modifiers))
}

/// Parses strings like `"ctrl+q"`, `"shift+tab"` or `"pagedown"`.
fn parse_binding(binding: &str) -> Option<(KeyCode, KeyModifiers)> {
    let binding = binding.trim().to_lowercase();
    let mut modifiers = KeyModifiers::NONE;
    let mut code = None;

    for part in binding.split('+') {
        match part {
            "ctrl" => modifiers.insert(KeyModifiers::CONTROL),
            "opt" | "alt" => modifiers.insert(KeyModifiers::ALT),
            "shift" => modifiers.insert(KeyModifiers::SHIFT),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "backtab" => code = Some(KeyCode::BackTab),
            "space" => code = Some(KeyCode::Char(' ')),
            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "pageup" => code = Some(KeyCode::PageUp),
            "pagedown" => code = Some(KeyCode::PageDown),
            // "+" itself splits into empty parts.
            "" => code = Some(KeyCode::Char('+')),
            c if c.chars().count() == 1 => code = c.chars().next().map(KeyCode::Char),
            _ => {}
        }
    }

    code.map(|code| (code, modifiers))
}

fn is_match(key: &KeyEvent, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let code_matches = match (key.code, code) {
        (KeyCode::Char(pressed), KeyCode::Char(bound)) => {
            pressed.to_lowercase().next() == Some(bound)
        }
        (pressed, bound) => pressed == bound,
    };
    if !code_matches {
        return false;
    }

    // Shift only counts when the binding asks for it; terminals report it
    // for characters like '?' and for BackTab.
    let mut pressed_mods = key.modifiers;
    if !modifiers.contains(KeyModifiers::SHIFT) {
        pressed_mods.remove(KeyModifiers::SHIFT);
    }
    pressed_mods == modifiers
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "daygrid", "daygrid")
}

pub fn default_data_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("DAYGRID_DATA_DIR") {
        return PathBuf::from(path);
    }
    if let Some(dirs) = project_dirs() {
        return dirs.data_dir().to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".daygrid")
}

fn default_entries_path() -> PathBuf {
    if let Some(path) = std::env::var_os("DAYGRID_ENTRIES") {
        return PathBuf::from(path);
    }
    default_data_dir().join("entries.json")
}

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("DAYGRID_CONFIG") {
        return PathBuf::from(path);
    }
    if let Some(dirs) = project_dirs() {
        return dirs.config_dir().join("config.toml");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".daygrid-config.toml")
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub data: DataConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub entries_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            entries_path: default_entries_path(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CalendarConfig {
    /// `YYYY-MM-DD`; the window opens around today when unset.
    pub anchor_date: Option<String>,
    /// Terminal rows per week row.
    pub cell_rows: u16,
    pub edge_threshold: f64,
    pub settle_ms: i64,
    /// Upper bound on loaded months (never below 9). `0` keeps every month.
    pub max_months: Option<usize>,
    pub max_jump_extensions: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            anchor_date: None,
            cell_rows: 2,
            edge_threshold: EDGE_THRESHOLD,
            settle_ms: SETTLE_DELAY_MS,
            max_months: Some(120),
            max_jump_extensions: 1000,
        }
    }
}

impl CalendarConfig {
    pub fn anchor(&self, today: NaiveDate) -> NaiveDate {
        self.anchor_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
            .unwrap_or(today)
    }

    /// Rows taken by one month block: title, weekday header, six weeks, gap.
    pub fn month_height(&self) -> u16 {
        3 + 6 * self.cell_rows.max(1)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct KeyBindings {
    pub global: GlobalBindings,
    pub calendar: CalendarBindings,
    pub sheet: SheetBindings,
    pub popup: PopupBindings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GlobalBindings {
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub jump: Vec<String>,
    pub today: Vec<String>,
}

impl Default for GlobalBindings {
    fn default() -> Self {
        Self {
            quit: vec!["ctrl+q".to_string(), "q".to_string()],
            help: vec!["?".to_string()],
            jump: vec!["g".to_string(), "/".to_string()],
            today: vec!["t".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CalendarBindings {
    pub day_prev: Vec<String>,
    pub day_next: Vec<String>,
    pub week_prev: Vec<String>,
    pub week_next: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub open: Vec<String>,
}

impl Default for CalendarBindings {
    fn default() -> Self {
        Self {
            day_prev: vec!["h".to_string(), "left".to_string()],
            day_next: vec!["l".to_string(), "right".to_string()],
            week_prev: vec!["k".to_string(), "up".to_string()],
            week_next: vec!["j".to_string(), "down".to_string()],
            scroll_up: vec!["ctrl+y".to_string()],
            scroll_down: vec!["ctrl+e".to_string()],
            page_up: vec!["ctrl+u".to_string(), "pageup".to_string()],
            page_down: vec!["ctrl+d".to_string(), "pagedown".to_string()],
            open: vec!["enter".to_string(), "space".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SheetBindings {
    pub prev: Vec<String>,
    pub next: Vec<String>,
    pub close: Vec<String>,
}

impl Default for SheetBindings {
    fn default() -> Self {
        Self {
            prev: vec!["h".to_string(), "left".to_string()],
            next: vec!["l".to_string(), "right".to_string()],
            close: vec!["esc".to_string(), "q".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PopupBindings {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

impl Default for PopupBindings {
    fn default() -> Self {
        Self {
            confirm: vec!["enter".to_string()],
            cancel: vec!["esc".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    pub border: String,
    pub header: String,
    pub accent: String,
    pub muted: String,
    pub weekday: String,
    pub entry_day: String,
    pub selected_day: String,
    pub cursor: String,
    pub today: String,
    pub rating: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: "Reset".to_string(),
            header: "Cyan".to_string(),
            accent: "LightGreen".to_string(),
            muted: "DarkGray".to_string(),
            weekday: "Cyan".to_string(),
            entry_day: "#1f4f4a".to_string(),
            selected_day: "LightYellow".to_string(),
            cursor: "Blue".to_string(),
            today: "Yellow".to_string(),
            rating: "Yellow".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = config_path();

        let mut config = if let Ok(content) = fs::read_to_string(&config_path) {
            match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = ?config_path, error = %e, "failed to parse config, using defaults");
                    Config::default()
                }
            }
        } else {
            Config::default()
        };

        let changed = config.normalize();

        if changed || !config_path.exists() {
            if let Err(e) = config.save_to_path(&config_path) {
                tracing::warn!(path = ?config_path, error = %e, "could not write config");
            }
        }

        config
    }

    pub fn save_to_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).unwrap_or_default();
        fs::write(path, content)
    }

    fn normalize(&mut self) -> bool {
        let mut changed = false;

        if self.data.entries_path.as_os_str().is_empty() {
            self.data.entries_path = default_entries_path();
            changed = true;
        }

        if self.data.entries_path.is_relative() {
            self.data.entries_path = default_data_dir().join(&self.data.entries_path);
            changed = true;
        }

        if self.calendar.cell_rows == 0 {
            self.calendar.cell_rows = 1;
            changed = true;
        }

        if !self.calendar.edge_threshold.is_finite() || self.calendar.edge_threshold < 0.0 {
            self.calendar.edge_threshold = EDGE_THRESHOLD;
            changed = true;
        }

        if self.calendar.settle_ms < 0 {
            self.calendar.settle_ms = SETTLE_DELAY_MS;
            changed = true;
        }

        changed
    }
}
