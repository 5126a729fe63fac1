//! UI components module.
//!
//! Contains ratatui widgets for displaying the listings browser.

pub mod details;
pub mod footer;
pub mod search;
pub mod table;

pub use details::render_details;
pub use footer::{render_pager, render_status};
pub use search::render_search;
pub use table::render_table;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Render the complete UI.
///
/// # Returns
/// * `Rect` - Area of the listings table, for mapping mouse clicks to rows
pub fn render_ui(f: &mut Frame, app: &App) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Listings table
            Constraint::Length(3), // Page indicator
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    render_search(app, chunks[0], f.buffer_mut());
    render_table(app, chunks[1], f.buffer_mut());
    render_pager(app, chunks[2], f.buffer_mut());
    render_status(app, chunks[3], f.buffer_mut());

    // Dialog goes last so it sits on top of the table.
    render_details(app, f.area(), f.buffer_mut());

    chunks[1]
}
