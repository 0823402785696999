use fake::{Dummy, Faker};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned item identifier. The API uses integers, but anything it
/// hands back is echoed verbatim when addressing the item.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(id) => write!(f, "{}", id),
            ItemId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Number(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_owned())
    }
}

impl Dummy<Faker> for ItemId {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        ItemId::Number(rng.gen_range(1..100_000))
    }
}

/// Defines item data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Defines the payload for creating an item.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
}

/// Defines the payload for registering an account.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
}

/// Defines the login response.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_id_accepts_numbers_and_strings() {
        let item: Item = serde_json::from_value(json!({
            "id": 7, "name": "a", "description": null
        }))
        .unwrap();
        assert_eq!(item.id, ItemId::Number(7));

        let item: Item = serde_json::from_value(json!({
            "id": "b2f1", "name": "a"
        }))
        .unwrap();
        assert_eq!(item.id, ItemId::Text("b2f1".to_string()));
        assert_eq!(item.description, None);
    }

    #[test]
    fn item_id_display_is_verbatim() {
        assert_eq!(ItemId::from(5).to_string(), "5");
        assert_eq!(ItemId::from("abc-1").to_string(), "abc-1");
    }

    #[test]
    fn item_ignores_extra_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": 1, "name": "a", "description": "d", "owner_id": 3
        }))
        .unwrap();
        assert_eq!(item.description.as_deref(), Some("d"));
    }

    #[test]
    fn new_item_serializes_missing_description_as_null() {
        let body = serde_json::to_value(NewItem {
            name: "n".to_string(),
            description: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "name": "n", "description": null }));
    }
}
