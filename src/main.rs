use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{error::Error, fs, io, sync::Mutex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod calendar;
mod config;
mod date_input;
mod entry_index;
mod error;
mod input;
mod jump;
mod models;
mod navigator;
mod render_map;
mod runtime;
mod scroll;
mod storage;
mod ui;
mod viewport;
mod window;

use app::App;
use chrono::Local;

fn main() -> Result<(), Box<dyn Error>> {
    // Logging is best effort; the calendar works without it.
    if let Err(e) = init_tracing() {
        eprintln!("daygrid: logging disabled: {e}");
    }

    let mut app = App::new();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Unsupported on some terminals; the app works without it.
    let _ = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    );

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(50))? {
            let event = event::read()?;
            input::handle_event(app, event);
        }

        runtime::tick(app, Local::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Sends `tracing` output to `daygrid.log` in the data directory. The level
/// comes from `RUST_LOG` and defaults to `info`.
fn init_tracing() -> Result<(), Box<dyn Error>> {
    let dir = config::default_data_dir();
    fs::create_dir_all(&dir)?;
    let log_file = fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("daygrid.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(filter)
        .try_init()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "daygrid starting");
    Ok(())
}
