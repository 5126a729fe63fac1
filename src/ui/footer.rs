//! Page indicator and status line.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const HINTS: &str =
    "'q' quit, '/' search, 'c' clear, ←/→ page, Enter details";

/// Render the page indicator with previous/next controls.
pub fn render_pager(app: &App, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled("◀ prev (p)  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.page_label.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (n) next ▶", Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    Widget::render(paragraph, area, buf);
}

/// Render the status line, falling back to key hints.
pub fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let text = app.status_message.as_deref().unwrap_or(HINTS);
    Widget::render(Paragraph::new(Line::from(text)), area, buf);
}
