//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Terminal rendering and layout
//! - Widget components (spinner, styling, inputs)
//! - View rendering (login, register, items, log)

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod widgets;

pub const SPINNER_FRAME_COUNT: usize = widgets::spinner::FRAMES.len();

pub use render::render;
pub use render::{item_rows, ItemRow};
