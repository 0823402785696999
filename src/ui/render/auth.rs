use super::Frame;
use crate::state::State;
use crate::ui::widgets::{input, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

/// Render the login form.
///
pub fn login(frame: &mut Frame, size: Rect, state: &State) {
    form(
        frame,
        size,
        state,
        "Login",
        "No account yet? Press Ctrl+R to register.",
    );
}

/// Render the registration form.
///
pub fn register(frame: &mut Frame, size: Rect, state: &State) {
    form(
        frame,
        size,
        state,
        "Register",
        "Already registered? Press Ctrl+R to sign in.",
    );
}

fn form(frame: &mut Frame, size: Rect, state: &State, title: &str, toggle_hint: &str) {
    let view = *state.current_view();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style());
    frame.render_widget(block, size);

    let fields = view.fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.extend([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(size);

    for (row, field) in rows.iter().zip(fields) {
        input::input(frame, *row, state, *field);
    }
    input::status(frame, rows[fields.len()], state.status(view));
    frame.render_widget(
        Paragraph::new(Span::styled(toggle_hint, styling::muted_text_style())),
        rows[fields.len() + 1],
    );
}
