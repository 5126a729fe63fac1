//! Detail dialog rendering.
//!
//! Draws the open `ListingDetails` as a centered popup over the rest of the UI.

use crate::app::App;
use crate::listings::ListingDetails;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Rectangle of `percent_x` by `percent_y` of `area`, centered in it.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    // u32 so wide terminals do not overflow; the result never exceeds `len`.
    let scale =
        |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn detail_lines(details: &ListingDetails) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            details.picture_url.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
        Line::from(details.neighborhood_overview.clone()),
        Line::default(),
        field("Price", details.price.clone()),
        field("Room Type", details.room_type.clone()),
        field("Bed Type", details.bed_line.clone()),
        field("Accommodates", details.accommodates.to_string()),
        Line::default(),
        Line::from(Span::styled(
            "Press 'Esc' to close",
            Style::default().fg(Color::Yellow),
        )),
    ]
}

/// Render the detail dialog when one is open.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Full screen area; the popup takes the middle 70%
/// * `buf` - Buffer to render to
pub fn render_details(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(details) = &app.details else {
        return;
    };

    let popup = popup_area(area, 70, 70);
    Widget::render(Clear, popup, buf);

    let paragraph = Paragraph::new(detail_lines(details))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(details.name.as_str())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        );

    Widget::render(paragraph, popup, buf);
}
