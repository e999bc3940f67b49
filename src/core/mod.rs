//! Core types shared by every vellum module.
//!
//! Currently this is the error taxonomy: [`ViewError`] for library operations and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting failures to CLI users.

pub mod error;

pub use error::{ErrorContext, ViewError, user_friendly_error};
