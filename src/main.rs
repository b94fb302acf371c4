// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::{App, View};
use data::SortBy;
use settings::Settings;
use source::{DataSource, FileSource, RestSource};
use ui::theme::ThemeChoice;

#[derive(Parser, Debug)]
#[command(name = "worldwatch")]
#[command(about = "Interactive TUI for browsing the world's countries")]
struct Args {
    /// Country endpoint to fetch from (REST Countries compatible)
    #[arg(short = 'u', long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Load countries from a local JSON snapshot instead of the network
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Record ordering: "population-desc" or "none"
    #[arg(short, long)]
    sort: Option<SortBy>,

    /// Theme: "light", "dark" or "auto"
    #[arg(short, long)]
    theme: Option<ThemeChoice>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to a config file (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(sort) = args.sort {
        settings.sort = sort;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout;
    }

    let theme = settings.theme.theme();

    // File mode: read a saved response body instead of the network.
    if let Some(ref path) = args.file {
        let source = Box::new(FileSource::new(path));
        return run_tui(source, settings.sort, theme);
    }

    // Network mode: the fetch runs on a background runtime while the TUI
    // owns the main thread. The runtime must outlive the TUI loop.
    let rt = tokio::runtime::Runtime::new()?;
    let source = Box::new(RestSource::new(
        &settings.endpoint,
        Duration::from_secs(settings.timeout_secs),
        rt.handle().clone(),
    )?);
    run_tui(source, settings.sort, theme)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, sort: SortBy, theme: ui::Theme) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and start the one-shot load
    let mut app = App::new(source, sort, theme);
    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with country counts
            ui::common::render_header(frame, app, chunks[0]);

            // Render current view (grid XOR detail)
            match app.current_view {
                View::Grid => ui::grid::render(frame, app, chunks[1]),
                View::Detail => ui::detail::render(frame, app, chunks[1]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[2]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply a completed load, if one has arrived
        app.poll_source();
    }

    Ok(())
}
