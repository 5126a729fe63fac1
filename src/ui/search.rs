//! Search widget rendering.
//!
//! Shows the name input and which filter the table rows were fetched with.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Block title naming the applied filter.
fn filter_title(app: &App) -> String {
    match (&app.mode, app.active_filter.as_deref()) {
        (UiMode::Search, _) => "Search by name (Enter to search, Esc to cancel)".to_string(),
        (_, Some(name)) => format!("Filtered by \"{}\" ('c' to clear)", name),
        (_, None) => "All listings ('/' to search by name)".to_string(),
    }
}

/// Render the search widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Input that differs from the applied filter is marked as not applied yet.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Search;
    let typed = app.search_input.trim();
    let pending = !typed.is_empty() && app.active_filter.as_deref() != Some(typed);

    let mut spans = vec![
        Span::styled("Name: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            app.search_input.as_str(),
            Style::default().fg(if is_active { Color::White } else { Color::Gray }),
        ),
    ];
    if is_active {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    if pending {
        spans.push(Span::styled(
            "  (not applied)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let border_style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if app.active_filter.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(filter_title(app))
            .borders(Borders::ALL)
            .style(border_style),
    );

    Widget::render(paragraph, area, buf);
}
