use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the application title with the current view.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let view = match state.current_view() {
        View::Login => "Sign in",
        View::Register => "Create account",
        View::Items => "Your items",
    };
    let line = Line::from(vec![
        Span::styled(" items-tui ", styling::banner_style()),
        Span::styled(format!("· {}", view), styling::normal_text_style()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style());
    frame.render_widget(Paragraph::new(line).block(block), size);
}
