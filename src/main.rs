//! Listings TUI - terminal browser for a paginated listings API.
//!
//! Main entry point and event loop for the application.

mod app;
mod browser;
mod config;
mod error;
mod fetcher;
mod listings;
mod logging;
mod ui;

use app::{Action, App, UiMode};
use browser::ListingsBrowser;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fetcher::Fetcher;
use listings::ListingsClient;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;

/// Main application entry point.
///
/// # Details
/// Loads configuration, sets up logging, fetches the first page, then runs
/// the event loop until the user quits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(None)?;
    let log_path = logging::init(&config)?;
    log::info!("Listings API: {}", config.api_base_url());

    let client = ListingsClient::new(&config)?;
    let mut browser = ListingsBrowser::new();
    let mut app = App::new();

    eprintln!("Loading listings from {}...", client.listings_url());
    browser.request_page(&client, &mut app).await;
    let mut fetcher = Fetcher::new(client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut browser, &mut fetcher).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Exiting with error: {:#}", e);
        eprintln!("See log file: {}", log_path.display());
    }
    result
}

/// Main event loop.
///
/// # Details
/// Applies finished fetches, redraws, then polls input with a 100 ms timeout
/// so responses show up while the user is idle.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    browser: &mut ListingsBrowser,
    fetcher: &mut Fetcher<ListingsClient>,
) -> anyhow::Result<()> {
    // Updated on each draw, used to map mouse clicks to rows
    let mut table_area = Rect::default();

    loop {
        while let Some(done) = fetcher.try_next() {
            if browser.finish_request(done.id, done.result, app) {
                app.clear_status();
            }
        }

        terminal.draw(|f| {
            table_area = ui::render_ui(f, app);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_key(key.code, key.modifiers)
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, app, table_area),
            _ => None,
        };

        if let Some(action) = action
            && !apply_action(action, app, browser, fetcher)
        {
            break;
        }
    }

    Ok(())
}

/// Run a browser action.
///
/// # Returns
/// * `bool` - False when the app should quit
///
/// # Details
/// State transitions that start a request hand it to the fetcher; the
/// response is applied later by the event loop.
fn apply_action(
    action: Action,
    app: &mut App,
    browser: &mut ListingsBrowser,
    fetcher: &Fetcher<ListingsClient>,
) -> bool {
    let pending = match action {
        Action::Quit => return false,
        Action::SubmitSearch => {
            let input = app.search_input.clone();
            Some(browser.submit_search(&input))
        }
        Action::ClearSearch => Some(browser.clear_search(app)),
        Action::PreviousPage => browser.previous_page(),
        Action::NextPage => Some(browser.next_page()),
        Action::ShowDetails(index) => {
            if let Some(listing) = app.rows.get(index).cloned()
                && let Err(e) = browser.show_details(&listing, app)
            {
                app.set_status(format!("Cannot show details: {}", e));
            }
            None
        }
    };

    if let Some(pending) = pending {
        let status = match &browser.state().search_name {
            Some(name) => format!("Loading page {} for \"{}\"...", pending.query.page, name),
            None => format!("Loading page {}...", pending.query.page),
        };
        app.set_status(status);
        fetcher.dispatch(pending);
    }
    true
}

/// Handle mouse events (scroll and click).
///
/// # Details
/// Scrolling moves the selection; a left click on a row opens its details.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, table_area: Rect) -> Option<Action> {
    if app.mode != UiMode::Table {
        return None;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.move_up();
            None
        }
        MouseEventKind::ScrollDown => {
            app.move_down();
            None
        }
        MouseEventKind::Down(MouseButton::Left) => {
            ui::table::row_at(app, table_area, mouse.column, mouse.row)
                .and_then(|index| app.click_row(index))
        }
        _ => None,
    }
}
