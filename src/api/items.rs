use super::{ApiClient, ApiError, Body, Item, ItemId, NewItem};
use log::*;
use reqwest::Method;

/// Authenticated item endpoints. Nothing here touches local state; callers
/// re-fetch the list after every mutation.
///
pub struct ItemsGateway<'a> {
    client: &'a ApiClient,
}

impl<'a> ItemsGateway<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        ItemsGateway { client }
    }

    /// Returns every item owned by the current user, in server order.
    ///
    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        debug!("Requesting items...");
        let items: Vec<Item> = self.client.request_as("/items/", Method::GET, None).await?;
        debug!("Retrieved {} items", items.len());
        Ok(items)
    }

    /// Create an item and return it as the server stored it.
    ///
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Item, ApiError> {
        debug!("Creating item '{}'...", name);
        let body = serde_json::to_value(NewItem {
            name: name.to_owned(),
            description: description.map(str::to_owned),
        })?;
        self.client
            .request_as("/items/", Method::POST, Some(Body::Json(body)))
            .await
    }

    /// Delete the item with the given id.
    ///
    pub async fn remove(&self, id: &ItemId) -> Result<(), ApiError> {
        debug!("Deleting item {}...", id);
        self.client
            .request(&format!("/items/{}", id), Method::DELETE, None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiClient, Item, ItemId};
    use crate::session::{MemoryStorage, SessionStore};
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    fn api(base_url: &str, token: &Uuid) -> ApiClient {
        let session = SessionStore::open(MemoryStorage::with_token(&token.to_string()));
        ApiClient::new(base_url, Arc::new(session)).unwrap()
    }

    #[tokio::test]
    async fn list_success_keeps_order() {
        let token: Uuid = UUIDv4.fake();
        let items: [Item; 2] = Faker.fake();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/items/")
                    .header("Authorization", &format!("Bearer {}", &token));
                then.status(200).json_body(json!([items[0], items[1]]));
            })
            .await;

        let listed = api(&server.base_url(), &token).items().list().await.unwrap();
        assert_eq!(listed, items.to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_success() {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/items/")
                    .header("Authorization", &format!("Bearer {}", &token))
                    .json_body(json!({ "name": "Milk", "description": null }));
                then.status(201).json_body(json!({
                    "id": 12, "name": "Milk", "description": null, "owner_id": 1
                }));
            })
            .await;

        let item = api(&server.base_url(), &token)
            .items()
            .create("Milk", None)
            .await
            .unwrap();
        assert_eq!(item.id, ItemId::Number(12));
        assert_eq!(item.name, "Milk");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn remove_addresses_id_verbatim() {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE")
                    .path("/items/5")
                    .header("Authorization", &format!("Bearer {}", &token));
                then.status(204);
            })
            .await;

        api(&server.base_url(), &token)
            .items()
            .remove(&ItemId::Number(5))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn remove_missing_item() {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/items/99");
                then.status(404).json_body(json!({ "detail": "Item not found" }));
            })
            .await;

        let err = api(&server.base_url(), &token)
            .items()
            .remove(&ItemId::Number(99))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Item not found");
    }
}
