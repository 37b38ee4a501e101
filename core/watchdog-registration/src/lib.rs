//! Headless registration dialog for Watchdog-protected applications.
//!
//! The dialog collects a customer name and license key, validates them, and
//! shows progress and error feedback. This crate holds everything except the
//! drawing: the UI layer forwards [`UiEvent`]s and applies the [`UiCommand`]s
//! it gets back, such as showing the spinner or shaking the window.
//!
//! Serial checking is delegated to [`watchdog_license`].

mod command;
mod config;
mod controller;
mod error;

pub use command::{UiCommand, UiEvent};
pub use config::{RegistrationConfig, NAME_PLACEHOLDER};
pub use controller::{RegistrationController, RegistrationState};
pub use error::{RegistrationError, RegistrationResult};
