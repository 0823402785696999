use super::Frame;
use crate::api::Item;
use crate::events::network::Event as NetworkEvent;
use crate::state::{Field, State, View};
use crate::ui::widgets::{input, spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub const EMPTY_PLACEHOLDER: &str = "No items yet. Add one above.";
pub const NO_DESCRIPTION: &str = "No description";

/// A single row of the item list.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRow {
    Empty,
    Entry {
        name: String,
        description: String,
        on_delete: NetworkEvent,
    },
}

/// Build the rows of the item list in fetch order. Text is escaped and each
/// entry carries the event its delete control dispatches.
///
pub fn item_rows(items: &[Item]) -> Vec<ItemRow> {
    if items.is_empty() {
        return vec![ItemRow::Empty];
    }
    items
        .iter()
        .map(|item| ItemRow::Entry {
            name: input::plain(&item.name),
            description: item
                .description
                .as_deref()
                .filter(|description| !description.is_empty())
                .map(input::plain)
                .unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
            on_delete: NetworkEvent::DeleteItem {
                id: item.id.clone(),
            },
        })
        .collect()
}

/// Render the item form and the item list.
///
pub fn items(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(size);

    input::input(frame, rows[0], state, Field::ItemName);
    input::input(frame, rows[1], state, Field::ItemDescription);
    input::status(frame, rows[2], state.status(View::Items));
    list(frame, rows[3], state);
}

fn list(frame: &mut Frame, size: Rect, state: &mut State) {
    let focused = state.focused_field() == Field::ItemList;
    let title = if state.is_items_loaded() {
        format!("Items ({})", state.items().len())
    } else {
        format!("Items {}", spinner::frame(*state.get_spinner_index()))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            styling::active_block_border_style()
        } else {
            styling::normal_block_border_style()
        });

    if !state.is_items_loaded() {
        let loading = Paragraph::new(Span::styled("Loading...", styling::muted_text_style()));
        frame.render_widget(loading.block(block), size);
        return;
    }

    let entries: Vec<ListItem> = state
        .item_rows()
        .into_iter()
        .map(|row| match row {
            ItemRow::Empty => ListItem::new(Span::styled(
                EMPTY_PLACEHOLDER,
                styling::muted_text_style(),
            )),
            ItemRow::Entry {
                name, description, ..
            } => ListItem::new(vec![
                Line::from(Span::raw(name)),
                Line::from(Span::styled(
                    format!("  {}", description),
                    styling::muted_text_style(),
                )),
            ]),
        })
        .collect();

    let list = List::new(entries)
        .block(block)
        .style(styling::normal_text_style())
        .highlight_style(styling::active_list_item_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, size, state.get_items_list_state());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemId;

    fn item(id: i64, name: &str, description: Option<&str>) -> Item {
        Item {
            id: ItemId::Number(id),
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn empty_list_is_only_placeholder() {
        assert_eq!(item_rows(&[]), vec![ItemRow::Empty]);
    }

    #[test]
    fn rows_follow_fetch_order() {
        let rows = item_rows(&[item(2, "b", Some("second")), item(1, "a", None)]);
        assert_eq!(
            rows,
            vec![
                ItemRow::Entry {
                    name: "b".to_string(),
                    description: "second".to_string(),
                    on_delete: NetworkEvent::DeleteItem {
                        id: ItemId::Number(2)
                    },
                },
                ItemRow::Entry {
                    name: "a".to_string(),
                    description: NO_DESCRIPTION.to_string(),
                    on_delete: NetworkEvent::DeleteItem {
                        id: ItemId::Number(1)
                    },
                },
            ]
        );
    }

    #[test]
    fn markup_stays_literal() {
        let rows = item_rows(&[item(1, "<img src=x onerror=alert(1)>", Some("<b>x</b>"))]);
        match &rows[0] {
            ItemRow::Entry {
                name, description, ..
            } => {
                assert_eq!(name, "<img src=x onerror=alert(1)>");
                assert_eq!(description, "<b>x</b>");
            }
            ItemRow::Empty => panic!("expected an entry"),
        }
    }

    #[test]
    fn terminal_escapes_are_neutralised() {
        let rows = item_rows(&[item(1, "\x1b]0;pwned\x07", None)]);
        match &rows[0] {
            ItemRow::Entry { name, .. } => {
                assert!(!name.chars().any(char::is_control));
                assert_eq!(name, "\\u{1b}]0;pwned\\u{7}");
            }
            ItemRow::Empty => panic!("expected an entry"),
        }
    }

    #[test]
    fn string_ids_are_carried_through() {
        let rows = item_rows(&[Item {
            id: ItemId::from("abc"),
            name: "n".to_string(),
            description: Some(String::new()),
        }]);
        assert!(matches!(
            &rows[0],
            ItemRow::Entry { description, on_delete: NetworkEvent::DeleteItem { id }, .. }
                if description == NO_DESCRIPTION && *id == ItemId::from("abc")
        ));
    }
}
