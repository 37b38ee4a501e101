//! Registration dialog configuration, read from `registration.toml`.

use crate::error::{RegistrationError, RegistrationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use watchdog_license::link_scheme;

/// Placeholder replaced by the customer name in the registered greeting.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Settings for one application's registration dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistrationConfig {
    /// Application bundle name; quick-apply links must carry it.
    pub bundle_name: String,
    /// Page where customers recover a lost serial.
    pub lost_key_url: String,
    /// Page where customers buy a serial.
    pub buy_online_url: String,
    #[serde(default = "default_unregistered_greeting")]
    pub unregistered_greeting: String,
    /// Greeting once registered; `{name}` is replaced by the customer name.
    #[serde(default = "default_registered_greeting")]
    pub registered_greeting: String,
}

fn default_unregistered_greeting() -> String {
    "Unregistered copy".to_string()
}

fn default_registered_greeting() -> String {
    format!("Registered to {NAME_PLACEHOLDER}")
}

impl RegistrationConfig {
    /// Creates a config with default greetings.
    pub fn new(
        bundle_name: impl Into<String>,
        lost_key_url: impl Into<String>,
        buy_online_url: impl Into<String>,
    ) -> Self {
        Self {
            bundle_name: bundle_name.into(),
            lost_key_url: lost_key_url.into(),
            buy_online_url: buy_online_url.into(),
            unregistered_greeting: default_unregistered_greeting(),
            registered_greeting: default_registered_greeting(),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Parse`] for bad TOML and the errors of
    /// [`Self::validate`] for unusable values.
    pub fn from_toml(contents: &str) -> RegistrationResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Io`] if the file cannot be read, otherwise
    /// as [`Self::from_toml`].
    pub fn load_from(path: &Path) -> RegistrationResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded registration config from {:?}", path);
        Ok(config)
    }

    /// Checks that the bundle name can form a link scheme and both URLs are
    /// http(s).
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::License`] for an unusable bundle name and
    /// [`RegistrationError::Config`] for a bad URL.
    pub fn validate(&self) -> RegistrationResult<()> {
        link_scheme(&self.bundle_name)?;
        check_web_url("lost-key-url", &self.lost_key_url)?;
        check_web_url("buy-online-url", &self.buy_online_url)?;
        Ok(())
    }

    /// Renders the greeting for a registered customer.
    #[must_use]
    pub fn registered_greeting_for(&self, customer_name: &str) -> String {
        self.registered_greeting.replace(NAME_PLACEHOLDER, customer_name)
    }
}

fn check_web_url(field: &str, url: &str) -> RegistrationResult<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !url.chars().any(char::is_whitespace) => Ok(()),
        _ => Err(RegistrationError::Config(format!(
            "{field} must be an http(s) URL, got \"{url}\""
        ))),
    }
}
