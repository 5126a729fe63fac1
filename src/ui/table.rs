//! Listings table widget rendering.
//!
//! One row per listing in server order, or a single notice row when the page
//! is empty or the request failed.

use crate::app::App;
use crate::listings::Listing;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

/// Lines per listing row.
const ROW_HEIGHT: u16 = 3;
/// Blank lines after each row.
const ROW_GAP: u16 = 1;
/// Header line plus its bottom margin.
const HEADER_LINES: u16 = 2;

const COLUMN_TITLES: [&str; 4] = ["Name", "Room Type", "Address", "Summary"];

/// Number of listing rows that fit in `area`.
fn visible_rows(area: Rect) -> usize {
    let body = area.height.saturating_sub(2 + HEADER_LINES);
    (body / (ROW_HEIGHT + ROW_GAP)).max(1) as usize
}

/// First row to draw so that `selected` stays on screen.
fn scroll_offset(selected: usize, total: usize, visible: usize) -> usize {
    let offset = (selected + 1).saturating_sub(visible);
    offset.min(total.saturating_sub(visible))
}

/// Index of the listing under a click at (`column`, `row`), if any.
///
/// # Details
/// Uses the same scroll offset as `render_table`, so it is only valid for the
/// area the table was last drawn in.
pub fn row_at(app: &App, area: Rect, column: u16, row: u16) -> Option<usize> {
    let inside_x = column > area.x && column < area.x + area.width.saturating_sub(1);
    let inside_y = row < area.y + area.height.saturating_sub(1);
    if !inside_x || !inside_y {
        return None;
    }

    let body_y = row.checked_sub(area.y + 1 + HEADER_LINES)?;
    let slot = (body_y / (ROW_HEIGHT + ROW_GAP)) as usize;
    let visible = visible_rows(area);
    if slot >= visible {
        return None;
    }

    let offset = scroll_offset(app.selected_index, app.rows.len(), visible);
    let index = offset + slot;
    (index < app.rows.len()).then_some(index)
}

fn header() -> Row<'static> {
    Row::new(COLUMN_TITLES)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1)
}

fn listing_row(listing: &Listing) -> Row<'_> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let summary = Text::from(vec![
        Line::from(listing.summary_text()),
        Line::from(vec![
            Span::styled("Accommodates: ", bold),
            Span::raw(listing.accommodates.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Rating: ", bold),
            Span::raw(format!(
                "{} ({})",
                listing.rating_label(),
                listing.number_of_reviews
            )),
        ]),
    ]);

    Row::new(vec![
        Cell::from(Span::styled(listing.name.as_str(), bold)),
        Cell::from(listing.room_type.as_str()),
        Cell::from(listing.address_line()),
        Cell::from(summary),
    ])
    .height(ROW_HEIGHT)
    .bottom_margin(ROW_GAP)
}

/// Render the listings table.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Draws only the rows that fit, scrolled so the selected row is visible.
/// With no rows, shows the notice message (or "Loading..." before the first
/// response).
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let title = format!("Listings ({})", app.rows.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    if app.rows.is_empty() {
        let message = app.notice.map(|n| n.message()).unwrap_or("Loading...");
        let header_line = Line::from(
            COLUMN_TITLES
                .iter()
                .map(|t| Span::styled(format!("{:<20}", t), Style::default().fg(Color::Cyan)))
                .collect::<Vec<_>>(),
        );
        let paragraph = Paragraph::new(vec![
            header_line,
            Line::default(),
            Line::from(Span::styled(
                message,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .block(block);
        Widget::render(paragraph, area, buf);
        return;
    }

    let selected_index = app.selected_index.min(app.rows.len() - 1);
    let visible = visible_rows(area);
    let offset = scroll_offset(selected_index, app.rows.len(), visible);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .skip(offset)
        .take(visible)
        .map(listing_row)
        .collect();

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(25),
        Constraint::Percentage(40),
    ];

    let table = Table::new(rows, widths)
        .header(header())
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(selected_index - offset));

    StatefulWidget::render(table, area, buf, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{ListingsView, TableNotice};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn listing(name: &str) -> Listing {
        Listing {
            id: name.to_string(),
            name: name.to_string(),
            room_type: "Private room".to_string(),
            ..Listing::default()
        }
    }

    fn draw(app: &App, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        render_table(app, area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_renders_notice_rows() {
        let mut app = App::new();
        let area = Rect::new(0, 0, 100, 12);

        app.render_notice(TableNotice::NoData);
        assert!(draw(&app, area).contains("No data available"));

        app.render_notice(TableNotice::FetchFailed);
        assert!(draw(&app, area).contains("Error fetching data"));
    }

    #[test]
    fn test_renders_listing_columns() {
        let mut app = App::new();
        app.render_rows(vec![listing("Harbour Loft"), listing("Garden Flat")]);
        let text = draw(&app, Rect::new(0, 0, 120, 14));

        assert!(text.contains("Harbour Loft"));
        assert!(text.contains("Garden Flat"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Accommodates:"));
        let first = text.find("Harbour Loft").unwrap();
        let second = text.find("Garden Flat").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 10, 3), 0);
        assert_eq!(scroll_offset(2, 10, 3), 0);
        assert_eq!(scroll_offset(5, 10, 3), 3);
        assert_eq!(scroll_offset(9, 10, 3), 7);
        assert_eq!(scroll_offset(1, 2, 3), 0);
    }

    #[test]
    fn test_row_at_maps_clicks_to_listings() {
        let mut app = App::new();
        app.render_rows(vec![listing("A"), listing("B"), listing("C")]);
        // 2 borders + 2 header lines + 3 rows of 4 lines
        let area = Rect::new(0, 3, 80, 16);

        assert_eq!(row_at(&app, area, 5, 3), None); // top border
        assert_eq!(row_at(&app, area, 5, 5), None); // header margin
        assert_eq!(row_at(&app, area, 5, 6), Some(0));
        assert_eq!(row_at(&app, area, 5, 10), Some(1));
        assert_eq!(row_at(&app, area, 5, 14), Some(2));
        assert_eq!(row_at(&app, area, 0, 6), None); // left border
    }
}
