use crate::state::StatusKind;
use ratatui::style::{Color, Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the selected list item.
///
pub fn active_list_item_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Return the style for secondary text such as placeholders and hints.
///
pub fn muted_text_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Return the style for a status message of the given kind.
///
pub fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red),
    }
}

pub fn banner_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
