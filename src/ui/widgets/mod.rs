//! Reusable UI widget components.
//!
//! This module contains reusable widget components such as spinners, text
//! inputs, status lines and styling utilities.

pub mod input;
pub mod spinner;
pub mod styling;
