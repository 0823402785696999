//! Navigation-related state types.
//!
//! This module contains the views and the focusable fields within them.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Login,
    Register,
    Items,
}

impl View {
    /// Returns the focusable fields of the view in tab order.
    ///
    pub fn fields(&self) -> &'static [Field] {
        match self {
            View::Login => &[Field::Email, Field::Password],
            View::Register => &[Field::Email, Field::Password, Field::ConfirmPassword],
            View::Items => &[Field::ItemName, Field::ItemDescription, Field::ItemList],
        }
    }

    /// Returns true for the views shown while signed out.
    ///
    pub fn is_auth(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }
}

/// Specifying the focusable fields.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    ItemName,
    ItemDescription,
    ItemList,
}

impl Field {
    /// Returns true if the field accepts typed text.
    ///
    pub fn is_text(&self) -> bool {
        !matches!(self, Field::ItemList)
    }

    /// Returns true if the field value must be masked when drawn.
    ///
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
            Field::ItemName => "Name",
            Field::ItemDescription => "Description",
            Field::ItemList => "Items",
        }
    }
}
