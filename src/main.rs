use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use dronedeck::app::{App, StatusLevel, Tab};
use dronedeck::config;
use dronedeck::fleet::series::DEFAULT_CAPACITY;
use dronedeck::fleet::{Fleet, StatusFilter};
use dronedeck::modules::modal::EmergencyAction;
use dronedeck::ui;

#[derive(Debug, Parser)]
#[command(
    name = "dronedeck",
    version,
    about = "Terminal dashboard for monitoring a drone fleet"
)]
struct Args {
    /// Fleet JSON file (array of drone records)
    #[arg(long)]
    fleet: Option<PathBuf>,

    /// Telemetry tick interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();
    let fleet = load_fleet(&args, &config)?;
    let tick_ms = args.tick_ms.or(config.tick_ms).unwrap_or(2000).max(100);
    let capacity = config.series_capacity.unwrap_or(DEFAULT_CAPACITY);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_settings(fleet, Duration::from_millis(tick_ms), capacity);
    if app.fleet.is_empty() {
        app.set_status("Fleet is empty; nothing to monitor", StatusLevel::Warn);
    }

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// A fleet file that was asked for but cannot be loaded is a fatal
/// configuration error. With nothing configured the embedded fleet is
/// used.
fn load_fleet(args: &Args, config: &config::Config) -> Result<Fleet> {
    if let Some(path) = &args.fleet {
        return Fleet::from_json_file(path)
            .with_context(|| format!("loading fleet from {}", path.display()));
    }
    if let Some(raw) = config
        .fleet_path
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let path = PathBuf::from(raw);
        return Fleet::from_json_file(&path)
            .with_context(|| format!("loading fleet from {}", path.display()));
    }
    Ok(Fleet::builtin())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.help_open = false;
        }
        return;
    }

    if app.modal.is_shown() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => app.confirm_modal(),
            KeyCode::Esc | KeyCode::Char('n') => app.cancel_modal(),
            // A new trigger overwrites the pending action.
            KeyCode::Char('r') => app.trigger_emergency(EmergencyAction::ReturnHome),
            KeyCode::Char('l') => app.trigger_emergency(EmergencyAction::EmergencyLand),
            KeyCode::Char('m') => app.trigger_emergency(EmergencyAction::ResumeMission),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('1') => app.set_tab(Tab::Overview),
        KeyCode::Char('2') => app.set_tab(Tab::Telemetry),
        KeyCode::Tab => app.cycle_tab(),
        KeyCode::Char('[') => app.cycle_filter(false),
        KeyCode::Char(']') => app.cycle_filter(true),
        KeyCode::Char('a') => app.apply_filter(StatusFilter::All),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Char('r') => app.trigger_emergency(EmergencyAction::ReturnHome),
        KeyCode::Char('l') => app.trigger_emergency(EmergencyAction::EmergencyLand),
        KeyCode::Char('m') => app.trigger_emergency(EmergencyAction::ResumeMission),
        KeyCode::Char('y') => handle_copy_to_clipboard(app),
        KeyCode::Char('x') => app.export_command_log(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };

    if app.modal.is_shown() {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && !ui::layout::rect_contains(ui::modal_rect(size), mouse.column, mouse.row)
        {
            // Backdrop click: close without confirming.
            app.cancel_modal();
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.current_tab == Tab::Overview {
                app.select_marker_at(mouse.column, mouse.row);
            }
        }
        MouseEventKind::ScrollUp => app.move_selection(-1),
        MouseEventKind::ScrollDown => app.move_selection(1),
        _ => {}
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(id) = app.selected_drone_id.clone() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(&id).is_ok() {
                app.set_status(format!("Copied: {id}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
