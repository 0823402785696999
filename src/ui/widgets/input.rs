use super::styling;
use crate::state::{Field, State, StatusMessage};
use crate::ui::Frame;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render a single-line text input for the given field of the current view.
///
pub fn input(frame: &mut Frame, size: Rect, state: &State, field: Field) {
    let focused = state.focused_field() == field;
    let value = state.field_value(field);
    let text = if field.is_secret() {
        "*".repeat(value.chars().count())
    } else {
        value.to_owned()
    };
    let mut spans = vec![Span::styled(text, styling::normal_text_style())];
    if focused {
        spans.push(Span::styled("_", styling::active_list_item_style()));
    }

    let border_style = if focused {
        styling::active_block_border_style()
    } else {
        styling::normal_block_border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(field.label())
        .border_style(border_style);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}

/// Escape control characters so text from the API is drawn literally and
/// never reaches the terminal as an escape sequence.
///
pub fn plain(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Render the status message of a view, or nothing.
///
pub fn status(frame: &mut Frame, size: Rect, message: Option<&StatusMessage>) {
    if let Some(message) = message {
        let line = Span::styled(plain(&message.text), styling::status_style(message.kind));
        frame.render_widget(Paragraph::new(line), size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_escapes_control_characters() {
        assert_eq!(plain("a\x1b[31mb"), "a\\u{1b}[31mb");
        assert_eq!(plain("line\nbreak"), "line\\nbreak");
        assert_eq!(plain("<b>ok</b> é"), "<b>ok</b> é");
    }
}
