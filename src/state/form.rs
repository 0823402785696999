//! Form editing state types.
//!
//! This module contains the login, registration, and item forms together
//! with the checks they run before anything is sent to the API, and the
//! transient status messages shown beneath them.

use super::error::StateError;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length at registration.
///
pub const MIN_PASSWORD_LENGTH: usize = 12;

fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    match PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok()) {
        Some(pattern) => pattern.is_match(email),
        None => email.contains('@'),
    }
}

/// Specifying status message kinds.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient feedback shown in a single view.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Login form input.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), StateError> {
        if self.email.trim().is_empty() {
            return Err(StateError::MissingField("Email"));
        }
        if self.password.is_empty() {
            return Err(StateError::MissingField("Password"));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = LoginForm::default();
    }
}

/// Registration form input.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Password length is checked first so a short password is always
    /// reported as such, whatever the confirmation holds.
    ///
    pub fn validate(&self) -> Result<(), StateError> {
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(StateError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if self.password != self.confirm_password {
            return Err(StateError::PasswordMismatch);
        }
        if self.email.trim().is_empty() {
            return Err(StateError::MissingField("Email"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(StateError::InvalidEmail);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = RegisterForm::default();
    }
}

/// Item creation form input.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
}

impl ItemForm {
    pub fn validate(&self) -> Result<(), StateError> {
        if self.name.trim().is_empty() {
            return Err(StateError::MissingField("Name"));
        }
        Ok(())
    }

    /// Returns the description to send, with a blank one meaning none.
    ///
    pub fn description(&self) -> Option<String> {
        let description = self.description.trim();
        if description.is_empty() {
            None
        } else {
            Some(description.to_owned())
        }
    }

    pub fn clear(&mut self) {
        *self = ItemForm::default();
    }
}
