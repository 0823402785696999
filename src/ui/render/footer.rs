use super::Frame;
use crate::state::{Field, State, View};
use crate::ui::widgets::styling;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph};

/// Returns the key hints for the current view and focus.
///
fn hints(state: &State) -> &'static str {
    match state.current_view() {
        View::Login => " Tab: next field  Enter: sign in  Ctrl+R: create account  Ctrl+C: quit",
        View::Register => " Tab: next field  Enter: register  Ctrl+R: back to sign in  Ctrl+C: quit",
        View::Items if state.focused_field() == Field::ItemList => {
            " j/k: select  d: delete  r: refresh  Tab: next field  Ctrl+L: log out  Ctrl+C: quit"
        }
        View::Items => " Tab: next field  Enter: add item  Ctrl+L: log out  Ctrl+C: quit",
    }
}

/// Render the key hint line.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let text = Span::styled(hints(state), styling::muted_text_style());
    frame.render_widget(Paragraph::new(text), size);
}
