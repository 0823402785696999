use crate::api::Item;
use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::session::{SessionError, SessionStore};
use crate::ui::{item_rows, ItemRow, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::widgets::ListState;
use std::sync::Arc;

use super::error::StateError;
use super::form::{ItemForm, LoginForm, RegisterForm, StatusMessage};
use super::navigation::{Field, View};

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
const REGISTERED: &str = "Registration successful! Please log in.";

/// Houses data representative of application state.
///
/// The active view is derived from the session: `Items` while a token is
/// held, otherwise whichever of `Login` and `Register` the user toggled to.
pub struct State {
    net_sender: Option<NetworkEventSender>,
    session: Arc<SessionStore>,
    log: LogBuffer,
    view: View,
    focus_index: usize,
    spinner_index: usize,
    login_form: LoginForm,
    register_form: RegisterForm,
    item_form: ItemForm,
    login_status: Option<StatusMessage>,
    register_status: Option<StatusMessage>,
    items_status: Option<StatusMessage>,
    items: Vec<Item>,
    items_loaded: bool,
    items_list_state: ListState,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            session: Arc::new(SessionStore::in_memory()),
            log: LogBuffer::default(),
            view: View::Login,
            focus_index: 0,
            spinner_index: 0,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            item_form: ItemForm::default(),
            login_status: None,
            register_status: None,
            items_status: None,
            items: vec![],
            items_loaded: false,
            items_list_state: ListState::default(),
        }
    }
}

impl State {
    /// Returns a new instance whose view reflects the given session.
    ///
    pub fn new(net_sender: NetworkEventSender, session: Arc<SessionStore>, log: LogBuffer) -> Self {
        let view = if session.is_authenticated() {
            View::Items
        } else {
            View::Login
        };
        State {
            net_sender: Some(net_sender),
            session,
            log,
            view,
            ..State::default()
        }
    }

    /// Performs the entry side effects of the initial view.
    ///
    pub fn start(&mut self) {
        if self.view == View::Items {
            self.enter_items();
        }
    }

    pub fn current_view(&self) -> &View {
        &self.view
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Store the issued token and enter the items view. A token that cannot
    /// be persisted still signs the user in for this run.
    ///
    pub fn login_succeeded(&mut self, token: &str) -> Result<(), SessionError> {
        match self.session.set(token) {
            Ok(()) => {}
            Err(SessionError::EmptyToken) => return Err(SessionError::EmptyToken),
            Err(e) => warn!("Signed in, but the session will not be remembered: {}", e),
        }
        self.login_form.clear();
        self.enter_items();
        Ok(())
    }

    /// Forget the session and return to the login view.
    ///
    pub fn logout(&mut self) {
        info!("Logging out.");
        self.session.clear();
        self.show_login();
    }

    /// Same as logout, but triggered by the API rejecting the credential.
    ///
    pub fn session_expired(&mut self) {
        self.session.clear();
        self.show_login();
        self.set_status(View::Login, StatusMessage::error(SESSION_EXPIRED));
    }

    pub fn toggle_to_register(&mut self) -> Result<(), StateError> {
        if !self.view.is_auth() {
            return Err(StateError::InvalidViewTransition(format!(
                "{:?} -> Register",
                self.view
            )));
        }
        self.switch_view(View::Register);
        Ok(())
    }

    pub fn toggle_to_login(&mut self) -> Result<(), StateError> {
        if !self.view.is_auth() {
            return Err(StateError::InvalidViewTransition(format!(
                "{:?} -> Login",
                self.view
            )));
        }
        self.switch_view(View::Login);
        Ok(())
    }

    /// Enter the items view and request a fresh list. Re-entering while
    /// already there only refreshes.
    ///
    pub fn enter_items(&mut self) {
        self.switch_view(View::Items);
        self.dispatch(NetworkEvent::FetchItems);
    }

    fn show_login(&mut self) {
        self.items.clear();
        self.items_loaded = false;
        self.items_list_state = ListState::default();
        self.item_form.clear();
        self.switch_view(View::Login);
    }

    /// Change view, dropping every transient status on an actual change.
    ///
    fn switch_view(&mut self, view: View) {
        if self.view != view {
            debug!("Switching view {:?} -> {:?}", self.view, view);
            self.login_status = None;
            self.register_status = None;
            self.items_status = None;
            self.focus_index = 0;
            self.view = view;
        }
    }

    /// Returns the status message of the given view.
    ///
    pub fn status(&self, view: View) -> Option<&StatusMessage> {
        match view {
            View::Login => self.login_status.as_ref(),
            View::Register => self.register_status.as_ref(),
            View::Items => self.items_status.as_ref(),
        }
    }

    /// Sets the status message of the given view. Ignored unless that view
    /// is active, since statuses never outlive a view switch.
    ///
    pub fn set_status(&mut self, view: View, message: StatusMessage) -> &mut Self {
        if view != self.view {
            debug!("Dropping status for inactive view {:?}: {}", view, message.text);
            return self;
        }
        let slot = match view {
            View::Login => &mut self.login_status,
            View::Register => &mut self.register_status,
            View::Items => &mut self.items_status,
        };
        *slot = Some(message);
        self
    }

    /// Replace the item list with a fetched one. Returns false and leaves
    /// state untouched if the items view is no longer active.
    ///
    pub fn apply_items(&mut self, items: Vec<Item>) -> bool {
        if self.view != View::Items {
            return false;
        }
        self.items = items;
        self.items_loaded = true;
        let selected = match self.items_list_state.selected() {
            _ if self.items.is_empty() => None,
            Some(index) => Some(index.min(self.items.len() - 1)),
            None => Some(0),
        };
        self.items_list_state.select(selected);
        true
    }

    /// Record a failed list fetch; the last fetched list stays on screen.
    ///
    pub fn items_failed(&mut self, message: String) {
        if self.view == View::Items {
            self.items_loaded = true;
            self.set_status(View::Items, StatusMessage::error(message));
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_items_loaded(&self) -> bool {
        self.items_loaded
    }

    /// Returns the rows the item list currently shows.
    ///
    pub fn item_rows(&self) -> Vec<ItemRow> {
        item_rows(&self.items)
    }

    pub fn get_items_list_state(&mut self) -> &mut ListState {
        &mut self.items_list_state
    }

    pub fn next_item(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.items_list_state.selected() {
            Some(index) if index + 1 < self.items.len() => index + 1,
            Some(_) => 0,
            None => 0,
        };
        self.items_list_state.select(Some(next));
    }

    pub fn previous_item(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let previous = match self.items_list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(index) => index - 1,
        };
        self.items_list_state.select(Some(previous));
    }

    /// Dispatch the delete action of the selected row, if it has one.
    ///
    pub fn delete_selected(&mut self) {
        if self.view != View::Items {
            return;
        }
        let Some(index) = self.items_list_state.selected() else {
            return;
        };
        if let Some(ItemRow::Entry { on_delete, .. }) = self.item_rows().into_iter().nth(index) {
            self.dispatch(on_delete);
        }
    }

    /// Re-fetch the item list without any other change.
    ///
    pub fn refresh_items(&mut self) {
        if self.view == View::Items {
            self.enter_items();
        }
    }

    /// Returns the field holding focus in the current view.
    ///
    pub fn focused_field(&self) -> Field {
        let fields = self.view.fields();
        fields[self.focus_index % fields.len()]
    }

    pub fn next_field(&mut self) {
        self.focus_index = (self.focus_index + 1) % self.view.fields().len();
    }

    pub fn previous_field(&mut self) {
        let count = self.view.fields().len();
        self.focus_index = (self.focus_index + count - 1) % count;
    }

    /// Returns the value of the given field in the current view.
    ///
    pub fn field_value(&self, field: Field) -> &str {
        match (self.view, field) {
            (View::Login, Field::Email) => &self.login_form.email,
            (View::Login, Field::Password) => &self.login_form.password,
            (View::Register, Field::Email) => &self.register_form.email,
            (View::Register, Field::Password) => &self.register_form.password,
            (View::Register, Field::ConfirmPassword) => &self.register_form.confirm_password,
            (View::Items, Field::ItemName) => &self.item_form.name,
            (View::Items, Field::ItemDescription) => &self.item_form.description,
            _ => "",
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match (self.view, self.focused_field()) {
            (View::Login, Field::Email) => Some(&mut self.login_form.email),
            (View::Login, Field::Password) => Some(&mut self.login_form.password),
            (View::Register, Field::Email) => Some(&mut self.register_form.email),
            (View::Register, Field::Password) => Some(&mut self.register_form.password),
            (View::Register, Field::ConfirmPassword) => {
                Some(&mut self.register_form.confirm_password)
            }
            (View::Items, Field::ItemName) => Some(&mut self.item_form.name),
            (View::Items, Field::ItemDescription) => Some(&mut self.item_form.description),
            _ => None,
        }
    }

    /// Type a character into the focused field. Returns false if the
    /// focused field does not take text.
    ///
    pub fn input_char(&mut self, c: char) -> bool {
        match self.focused_input() {
            Some(input) => {
                input.push(c);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.pop();
        }
    }

    #[cfg(test)]
    pub fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    #[cfg(test)]
    pub fn register_form(&self) -> &RegisterForm {
        &self.register_form
    }

    #[cfg(test)]
    pub fn item_form(&self) -> &ItemForm {
        &self.item_form
    }

    pub fn item_form_mut(&mut self) -> &mut ItemForm {
        &mut self.item_form
    }

    /// Submit the form of the current view.
    ///
    pub fn submit(&mut self) {
        match self.view {
            View::Login => self.submit_login(),
            View::Register => self.submit_register(),
            View::Items => self.submit_item(),
        }
    }

    fn submit_login(&mut self) {
        if let Err(e) = self.login_form.validate() {
            self.set_status(View::Login, StatusMessage::error(e.to_string()));
            return;
        }
        self.login_status = None;
        self.dispatch(NetworkEvent::Login {
            email: self.login_form.email.trim().to_owned(),
            password: self.login_form.password.clone(),
        });
    }

    fn submit_register(&mut self) {
        if let Err(e) = self.register_form.validate() {
            debug!("Registration form rejected: {}", e);
            self.set_status(View::Register, StatusMessage::error(e.to_string()));
            return;
        }
        self.register_status = None;
        self.dispatch(NetworkEvent::Register {
            email: self.register_form.email.trim().to_owned(),
            password: self.register_form.password.clone(),
        });
    }

    fn submit_item(&mut self) {
        if let Err(e) = self.item_form.validate() {
            self.set_status(View::Items, StatusMessage::error(e.to_string()));
            return;
        }
        self.items_status = None;
        self.dispatch(NetworkEvent::CreateItem {
            name: self.item_form.name.trim().to_owned(),
            description: self.item_form.description(),
        });
    }

    /// Report a completed registration in the register view.
    ///
    pub fn registered(&mut self) {
        if self.view == View::Register {
            self.register_form.clear();
            self.focus_index = 0;
            self.set_status(View::Register, StatusMessage::success(REGISTERED));
        }
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    /// Advance the loading spinner by one frame.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        self
    }

    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}
