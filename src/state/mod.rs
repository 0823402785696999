//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds the session view, forms and items
//! - Navigation types (View, Field)
//! - Form types and their validation
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::{StatusKind, StatusMessage};
pub use navigation::{Field, View};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
