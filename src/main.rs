use anyhow::Result;
use creances_map::app::{App, Phase};
use creances_map::ui;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use ratatui::DefaultTerminal;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Directory holding the dataset and basemap resources.
const DATA_DIR: &str = "data";

fn main() -> Result<()> {
    init_tracing()?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Logging is opt-in via RUST_LOG and goes to a file: a subscriber writing
/// to the terminal would corrupt the raster.
fn init_tracing() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create("creances-map.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    let mut app = App::new();

    // Loading splash, then the one-shot startup load.
    terminal.draw(|frame| ui::render(frame, &app))?;
    let map_inner = map_inner_area(terminal)?;
    app.load(
        Path::new(DATA_DIR),
        map_inner.width as usize * 2,
        map_inner.height as usize * 4,
    );

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        handle_key(&mut app, key.code);
                    }
                }
                Event::Mouse(mouse) => {
                    let area = frame_area(terminal)?;
                    handle_mouse(&mut app, mouse, area);
                }
                Event::Resize(_, _) => {
                    let map_inner = map_inner_area(terminal)?;
                    if let Some(dash) = app.dashboard_mut() {
                        dash.set_map_size(map_inner.width, map_inner.height);
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn frame_area(terminal: &DefaultTerminal) -> Result<Rect> {
    let size = terminal.size()?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

fn map_inner_area(terminal: &DefaultTerminal) -> Result<Rect> {
    Ok(ui::block_inner(ui::zones(frame_area(terminal)?).map))
}

fn handle_key(app: &mut App, code: KeyCode) {
    let mut quit = false;

    match &mut app.phase {
        Phase::Ready(dash) if dash.search.active => match code {
            KeyCode::Esc => dash.search_cancel(),
            KeyCode::Enter => dash.search_commit(),
            KeyCode::Up => dash.search_up(),
            KeyCode::Down => dash.search_down(),
            KeyCode::Backspace => dash.search_backspace(),
            KeyCode::Char(c) => dash.search_input(c),
            _ => {}
        },
        Phase::Ready(dash) => match code {
            KeyCode::Char('q') => quit = true,
            // Esc closes the detail panel first, then the app.
            KeyCode::Esc => {
                if dash.selection.country.is_some() {
                    dash.clear_selection();
                } else {
                    quit = true;
                }
            }

            KeyCode::Left => dash.year_prev(),
            KeyCode::Right => dash.year_next(),

            KeyCode::Char('/') => dash.search_open(),

            // Pan with hjkl
            KeyCode::Char('h') => dash.viewport.pan(-10, 0),
            KeyCode::Char('l') => dash.viewport.pan(10, 0),
            KeyCode::Char('k') => dash.viewport.pan(0, -6),
            KeyCode::Char('j') => dash.viewport.pan(0, 6),

            // Zoom
            KeyCode::Char('+') | KeyCode::Char('=') => dash.viewport.zoom_in(),
            KeyCode::Char('-') | KeyCode::Char('_') => dash.viewport.zoom_out(),

            // Reset view
            KeyCode::Char('r') | KeyCode::Char('0') => dash.reset_view(),

            _ => {}
        },
        // Loading or terminal failure: any key quits.
        _ => quit = true,
    }

    if quit {
        app.quit();
    }
}

/// Mouse events: clicks select countries or years, scroll zooms towards the
/// cursor, drag pans.
fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    let zones = ui::zones(area);
    let map_inner = ui::block_inner(zones.map);

    let Some(dash) = app.dashboard_mut() else {
        return;
    };

    // Always track position for the hover tooltip.
    dash.mouse_cell = Some((mouse.column, mouse.row));
    dash.set_map_size(map_inner.width, map_inner.height);

    let in_map = map_inner.contains(Position::new(mouse.column, mouse.row));
    // Each terminal cell is 2 braille pixels wide, 4 tall.
    let px = ((mouse.column.saturating_sub(map_inner.x)) as i32) * 2;
    let py = ((mouse.row.saturating_sub(map_inner.y)) as i32) * 4;

    match mouse.kind {
        MouseEventKind::ScrollUp if in_map => dash.viewport.zoom_in_at(px, py),
        MouseEventKind::ScrollDown if in_map => dash.viewport.zoom_out_at(px, py),
        MouseEventKind::ScrollLeft => dash.viewport.pan(-15, 0),
        MouseEventKind::ScrollRight => dash.viewport.pan(15, 0),

        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(year) = ui::year_at(zones.year, mouse.column, mouse.row) {
                dash.set_year(year);
            } else if zones.search.contains(Position::new(mouse.column, mouse.row)) {
                dash.search_open();
            } else if in_map {
                dash.last_mouse = Some((mouse.column, mouse.row));
                dash.dragged = false;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if in_map => {
            dash.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            // A press that never panned is a click: resolve the country.
            if in_map && !dash.dragged && dash.last_mouse.is_some() {
                let (lon, lat) = dash.viewport.unproject(px, py);
                dash.click_map(lon, lat);
            }
            dash.end_drag();
        }
        _ => {}
    }
}
