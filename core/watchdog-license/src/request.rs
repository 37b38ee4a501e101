//! Data passed between the registration UI and the validator.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};

/// A customer name and license key as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Name the license was issued to.
    pub customer_name: String,
    /// Serial the user entered or received in a quick-apply link.
    pub license_key: String,
}

impl RegistrationRequest {
    /// Creates a request from raw field contents.
    #[must_use]
    pub fn new(customer_name: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            license_key: license_key.into(),
        }
    }

    /// Returns a copy with surrounding whitespace removed from both fields.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(self.customer_name.trim(), self.license_key.trim())
    }

    /// Returns true when both fields contain something other than whitespace.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.customer_name.trim().is_empty() && !self.license_key.trim().is_empty()
    }

    /// Fails with [`LicenseError::InvalidInput`] naming the first blank field.
    pub fn ensure_complete(&self) -> LicenseResult<()> {
        require_non_blank("customer name", &self.customer_name)?;
        require_non_blank("license key", &self.license_key)?;
        Ok(())
    }
}

/// Outcome of validating a [`RegistrationRequest`], as presented to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    /// Whether the request may proceed.
    pub valid: bool,
    /// Human-readable explanation when `valid` is false.
    pub message: Option<String>,
}

impl Validation {
    /// A passing validation.
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing validation with a message for the user.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

impl From<LicenseError> for Validation {
    fn from(err: LicenseError) -> Self {
        Self::rejected(err.to_string())
    }
}

pub(crate) fn require_non_blank<'a>(field: &str, value: &'a str) -> LicenseResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LicenseError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}
