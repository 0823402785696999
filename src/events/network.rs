use crate::api::{ApiClient, ItemId};
use crate::error::AppResult;
use crate::state::{State, StatusMessage, View};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Register { email: String, password: String },
    Login { email: String, password: String },
    FetchItems,
    CreateItem {
        name: String,
        description: Option<String>,
    },
    DeleteItem { id: ItemId },
}

/// Specify struct for managing state with network events.
///
/// The state lock is never held across a request: a 401 answer awaits the
/// session-expired hook, which takes the same lock.
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a ApiClient,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a ApiClient) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> AppResult<()> {
        match &event {
            Event::Register { email, .. } | Event::Login { email, .. } => {
                debug!("Processing network event for account '{}'...", email)
            }
            _ => debug!("Processing network event '{:?}'...", event),
        }
        match event {
            Event::Register { email, password } => self.register(email, password).await?,
            Event::Login { email, password } => self.login(email, password).await?,
            Event::FetchItems => self.fetch_items().await?,
            Event::CreateItem { name, description } => {
                self.create_item(name, description).await?
            }
            Event::DeleteItem { id } => self.delete_item(id).await?,
        }
        Ok(())
    }

    /// Create an account and report the outcome in the register view.
    ///
    async fn register(&mut self, email: String, password: String) -> AppResult<()> {
        info!("Registering account {}...", email);
        let result = self.api.auth().register(&email, &password).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(()) => {
                info!("Registered account {}.", email);
                state.registered();
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                state.set_status(View::Register, StatusMessage::error(e.to_string()));
            }
        }
        Ok(())
    }

    /// Exchange credentials for a token and enter the items view.
    ///
    async fn login(&mut self, email: String, password: String) -> AppResult<()> {
        info!("Logging in as {}...", email);
        let result = self.api.auth().login(&email, &password).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(token) => {
                if *state.current_view() == View::Items {
                    debug!("Discarding login result; already signed in.");
                    return Ok(());
                }
                state.login_succeeded(&token)?;
                info!("Logged in as {}.", email);
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                state.set_status(View::Login, StatusMessage::error(e.to_string()));
            }
        }
        Ok(())
    }

    /// Returns false if the session ended while the event sat in the queue.
    ///
    async fn signed_in(&self, event: &str) -> bool {
        let signed_in = self.state.lock().await.is_authenticated();
        if !signed_in {
            debug!("Skipping queued '{}' event; signed out.", event);
        }
        signed_in
    }

    /// Update state with the current item list.
    ///
    async fn fetch_items(&mut self) -> AppResult<()> {
        if !self.signed_in("FetchItems").await {
            return Ok(());
        }
        info!("Fetching items...");
        let result = self.api.items().list().await;
        let mut state = self.state.lock().await;
        match result {
            Ok(items) => {
                let count = items.len();
                if state.apply_items(items) {
                    info!("Received {} items.", count);
                } else {
                    debug!("Discarding item list; items view is no longer active.");
                }
            }
            Err(e) if e.is_unauthorized() => {
                // Session-expired hook already moved us to the login view
                warn!("Failed to fetch items: {}", e);
            }
            Err(e) => {
                error!("Failed to fetch items (status {:?}): {}", e.status(), e);
                state.items_failed(e.to_string());
            }
        }
        Ok(())
    }

    /// Create an item, then re-synchronize the list.
    ///
    async fn create_item(&mut self, name: String, description: Option<String>) -> AppResult<()> {
        if !self.signed_in("CreateItem").await {
            return Ok(());
        }
        info!("Creating item '{}'...", name);
        let result = self
            .api
            .items()
            .create(&name, description.as_deref())
            .await;
        let mut state = self.state.lock().await;
        match result {
            Ok(item) => {
                info!("Item '{}' created with id {}.", item.name, item.id);
                if *state.current_view() == View::Items {
                    state.item_form_mut().clear();
                    state.enter_items();
                }
            }
            Err(e) if e.is_unauthorized() => warn!("Failed to create item: {}", e),
            Err(e) => {
                error!("Failed to create item: {}", e);
                state.set_status(View::Items, StatusMessage::error(e.to_string()));
            }
        }
        Ok(())
    }

    /// Delete an item, then re-synchronize the list.
    ///
    async fn delete_item(&mut self, id: ItemId) -> AppResult<()> {
        if !self.signed_in("DeleteItem").await {
            return Ok(());
        }
        info!("Deleting item {}...", id);
        let result = self.api.items().remove(&id).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(()) => {
                info!("Item {} deleted.", id);
                if *state.current_view() == View::Items {
                    state.enter_items();
                }
            }
            Err(e) if e.is_unauthorized() => warn!("Failed to delete item {}: {}", id, e),
            Err(e) => {
                error!("Failed to delete item {}: {}", id, e);
                state.set_status(View::Items, StatusMessage::error(e.to_string()));
            }
        }
        Ok(())
    }
}
