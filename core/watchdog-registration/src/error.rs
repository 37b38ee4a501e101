//! Error types for the registration controller.

use thiserror::Error;
use watchdog_license::LicenseError;

/// Errors raised while setting up the registration controller.
///
/// Validation failures during registration never surface here; they become
/// [`crate::UiCommand::ShowError`] commands instead.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Configuration is present but unusable.
    #[error("invalid registration config: {0}")]
    Config(String),

    /// Reading the configuration file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::RegistrationConfig`].
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    License(#[from] LicenseError),
}

/// Result type for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;
