use super::*;
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(1),
            Constraint::Length(8),
        ])
        .split(frame.size());

    header(frame, rows[0], state);
    match state.current_view() {
        View::Login => login(frame, rows[1], state),
        View::Register => register(frame, rows[1], state),
        View::Items => items(frame, rows[1], state),
    }
    footer(frame, rows[2], state);
    log(frame, rows[3], state);
}
