use crate::calendar::{self, month_key};
use crate::config::Config;
use crate::entry_index::EntryIndex;
use crate::error::Result;
use crate::jump::{self, ScrollScheduler};
use crate::models::{ExtendDirection, JournalEntry, MonthSlot, StepDirection};
use crate::navigator::EntryNavigator;
use crate::render_map::RenderMap;
use crate::scroll::{ScrollBehavior, ScrollHost};
use crate::storage;
use crate::viewport::{self, Bounds};
use crate::window::{EXTEND_STEP, MonthWindow};
use chrono::{DateTime, Duration, Local, NaiveDate};

/// Rows above the first week inside a month block (title and weekday names).
pub const MONTH_HEADER_ROWS: u16 = 2;

pub struct App {
    pub today: NaiveDate,
    pub index: EntryIndex,
    pub navigator: EntryNavigator,
    pub window: MonthWindow,
    pub render_map: RenderMap,
    pub scroll: ScrollHost,
    pub scheduler: ScrollScheduler,

    /// Header label and key of the month that currently fills the viewport.
    pub header: String,
    pub header_key: String,
    pub cursor: NaiveDate,
    /// Last date picked through a jump; highlighted in the grid.
    pub selected_date: Option<NaiveDate>,

    pub show_help_popup: bool,
    pub show_jump_popup: bool,
    pub jump_input: String,
    pub show_entry_sheet: bool,

    pub toast_message: Option<String>,
    pub toast_expiry: Option<DateTime<Local>>,
    pub should_quit: bool,

    // Configuration
    pub config: Config,
}

impl App {
    pub fn new() -> App {
        let config = Config::load();
        let today = Local::now().date_naive();

        let (entries, load_error) = match storage::load_entries(&config.data.entries_path) {
            Ok(entries) => (entries, None),
            Err(e) => {
                tracing::error!(path = ?config.data.entries_path, error = %e, "failed to load entries");
                (Vec::new(), Some(format!("Could not load entries: {e}")))
            }
        };

        let mut app = App::with_config(config, entries, today);
        if let Some(message) = load_error {
            app.toast(message);
        } else if !app.index.rejected().is_empty() {
            let skipped = app.index.rejected().len();
            app.toast(format!("Skipped {skipped} entries with unreadable dates."));
        }
        app
    }

    pub fn with_config(config: Config, entries: Vec<JournalEntry>, today: NaiveDate) -> App {
        let anchor = config.calendar.anchor(today);
        let index = EntryIndex::build(&entries);
        let navigator = EntryNavigator::new(&entries);
        let window = MonthWindow::new(anchor);
        let anchor_slot = MonthSlot::containing(anchor);

        let mut app = App {
            today,
            index,
            navigator,
            window,
            render_map: RenderMap::default(),
            scroll: ScrollHost::default(),
            scheduler: ScrollScheduler::default(),
            header: anchor_slot.label(),
            header_key: anchor_slot.key.clone(),
            cursor: anchor,
            selected_date: None,
            show_help_popup: false,
            show_jump_popup: false,
            jump_input: String::new(),
            show_entry_sheet: false,
            toast_message: None,
            toast_expiry: None,
            should_quit: false,
            config,
        };
        app.rebuild_layout();
        if let Some(bounds) = app.render_map.bounds_of(&anchor_slot.key) {
            app.scroll.scroll_to(bounds.top, ScrollBehavior::Instant);
        }
        app
    }

    pub fn month_height(&self) -> f64 {
        f64::from(self.config.calendar.month_height())
    }

    fn rebuild_layout(&mut self) {
        self.render_map = RenderMap::build(&self.window, self.month_height());
        self.scroll.set_content_height(self.render_map.content_height());
    }

    /// Grows the window by one step and keeps the visible rows in place.
    pub fn extend(&mut self, direction: ExtendDirection) {
        let added = self.window.extend(direction);
        self.rebuild_layout();
        if direction == ExtendDirection::Up {
            self.scroll.shift(added.len() as f64 * self.month_height());
        }
    }

    /// Runs after every scroll position or viewport size change.
    pub fn on_scroll(&mut self) {
        let focus = self.header_key.clone();
        self.sync_window(&focus);
    }

    /// Edge extension, then eviction around `focus_key`, then header refresh.
    fn sync_window(&mut self, focus_key: &str) {
        for edge in self.scroll.edges_near(self.config.calendar.edge_threshold) {
            self.extend(edge);
        }
        self.evict_distant_months(focus_key);
        self.refresh_header();
    }

    fn evict_distant_months(&mut self, focus_key: &str) {
        let Some(cap) = self.config.calendar.max_months.filter(|&cap| cap > 0) else {
            return;
        };
        // A jump in flight needs its target to stay loaded.
        if self.scheduler.is_pending() || self.scroll.is_animating() {
            return;
        }
        let eviction = self.window.evict_beyond(cap, focus_key);
        if eviction.is_empty() {
            return;
        }
        // Shift before the content shrinks so the clamp sees the old height.
        self.scroll
            .shift(-(eviction.front.len() as f64) * self.month_height());
        self.rebuild_layout();
    }

    pub fn refresh_header(&mut self) {
        let best = viewport::best_match(self.render_map.rendered(), self.scroll.viewport());
        if let Some(key) = best.month_key
            && let Some(label) = self.render_map.label_of(&key)
        {
            self.header = label.to_string();
            self.header_key = key;
        }
    }

    pub fn set_viewport_height(&mut self, height: u16) {
        let height = f64::from(height);
        if self.scroll.viewport_height() == height {
            return;
        }
        self.scroll.set_viewport_height(height);
        self.on_scroll();
    }

    pub fn scroll_rows(&mut self, delta: i32) {
        self.scroll.scroll_by(f64::from(delta));
        self.on_scroll();
    }

    pub fn page_rows(&self) -> i32 {
        (self.scroll.viewport_height() as i32 - 2).max(1)
    }

    /// Makes sure `date`'s month is in the window, extending as the jump
    /// resolver prescribes.
    fn load_month(&mut self, date: NaiveDate) -> Result<()> {
        let plan = jump::load_target(
            date,
            &mut self.window,
            self.config.calendar.max_jump_extensions,
        )?;
        if plan.count == 0 {
            return Ok(());
        }
        self.rebuild_layout();
        if plan.direction == Some(ExtendDirection::Up) {
            let added = (plan.count * EXTEND_STEP) as f64;
            self.scroll.shift(added * self.month_height());
        }
        Ok(())
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.jump_to_at(date, Local::now());
    }

    pub fn jump_to_at(&mut self, date: NaiveDate, now: DateTime<Local>) {
        self.selected_date = Some(date);
        self.cursor = date;
        match self.load_month(date) {
            Ok(()) => {
                let settle = Duration::milliseconds(self.config.calendar.settle_ms);
                if let Some(cancelled) = self.scheduler.schedule(date, now, settle) {
                    tracing::debug!(target_date = %cancelled.target, "replaced pending jump");
                }
            }
            Err(e) => {
                tracing::warn!(%date, error = %e, "jump failed");
                self.toast(format!("Cannot jump to {date}: {e}"));
            }
        }
    }

    /// Fires a due jump scroll. Returns whether one fired.
    pub fn fire_pending_scroll(&mut self, now: DateTime<Local>) -> bool {
        let Some(target) = self.scheduler.poll(now) else {
            return false;
        };
        match self.render_map.bounds_of(&month_key(target)) {
            Some(bounds) => {
                tracing::debug!(target_date = %target, top = bounds.top, "scrolling to jump target");
                self.scroll.scroll_to(bounds.top, ScrollBehavior::Smooth);
            }
            None => tracing::debug!(target_date = %target, "jump target is no longer rendered"),
        }
        true
    }

    /// Moves the day cursor by `days`, loading and revealing its month.
    pub fn move_cursor(&mut self, days: i64) {
        let Some(next) = self.cursor.checked_add_signed(Duration::days(days)) else {
            return;
        };
        self.move_cursor_to(next);
    }

    pub fn move_cursor_to(&mut self, date: NaiveDate) {
        if let Err(e) = self.load_month(date) {
            tracing::warn!(%date, error = %e, "cursor month could not be loaded");
            return;
        }
        self.cursor = date;
        if let Some(bounds) = self.week_bounds(date) {
            self.scroll.reveal(bounds);
        }
        // The header still names the month shown before the reveal.
        self.sync_window(&month_key(date));
    }

    /// Rows occupied by the week containing `date`.
    pub fn week_bounds(&self, date: NaiveDate) -> Option<Bounds> {
        let month = self.render_map.bounds_of(&month_key(date))?;
        let cell_rows = f64::from(self.config.calendar.cell_rows.max(1));
        let start = calendar::month_start(date);
        let cell = calendar::weekday_offset(start) + (date - start).num_days() as usize;
        let week = (cell / calendar::GRID_COLUMNS) as f64;
        let top = month.top + f64::from(MONTH_HEADER_ROWS) + week * cell_rows;
        Some(Bounds::new(top, cell_rows))
    }

    pub fn open_entry_at_cursor(&mut self) {
        let Some(first) = self.index.on(self.cursor).first().map(|e| e.id) else {
            self.toast(format!("No entries on {}.", self.cursor.format("%d/%m/%Y")));
            return;
        };
        if self.navigator.open(first).is_some() {
            self.show_entry_sheet = true;
        }
    }

    pub fn step_entry(&mut self, direction: StepDirection) {
        if self.navigator.step(direction).is_none() {
            return;
        }
        if let Some(day) = self.navigator.current_day() {
            self.move_cursor_to(day);
        }
    }

    pub fn close_entry_sheet(&mut self) {
        self.navigator.close();
        self.show_entry_sheet = false;
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_expiry = Some(Local::now() + Duration::seconds(2));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
