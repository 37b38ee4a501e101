//! The validator the registration dialog talks to.

use crate::error::LicenseResult;
use crate::link;
use crate::request::{RegistrationRequest, Validation};
use crate::serial::{self, SerialScheme};
use tracing::{debug, info, warn};

/// Message shown when a serial is well formed but issued to someone else.
pub const KEY_MISMATCH_MESSAGE: &str = "The license key does not match the customer name.";

/// Validates registration input for one application bundle.
///
/// Holds no mutable state; every method is a pure function of its inputs,
/// the bundle name, and the serial scheme.
#[derive(Debug, Clone)]
pub struct LicenseValidator<S> {
    bundle_name: String,
    scheme: S,
}

impl<S: SerialScheme> LicenseValidator<S> {
    /// Creates a validator for `bundle_name` checking serials with `scheme`.
    pub fn new(bundle_name: impl Into<String>, scheme: S) -> Self {
        Self {
            bundle_name: bundle_name.into(),
            scheme,
        }
    }

    /// Returns the bundle name quick-apply links must carry.
    #[must_use]
    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    /// Returns the serial scheme.
    #[must_use]
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Splits a quick-apply link issued for this bundle.
    ///
    /// # Errors
    ///
    /// See [`link::decompose_quick_apply_link`].
    pub fn decompose_quick_apply_link(&self, link: &str) -> LicenseResult<RegistrationRequest> {
        link::decompose_quick_apply_link(link, &self.bundle_name)
    }

    /// Builds a quick-apply link for this bundle.
    ///
    /// # Errors
    ///
    /// See [`link::compose_quick_apply_link`].
    pub fn compose_quick_apply_link(&self, request: &RegistrationRequest) -> LicenseResult<String> {
        link::compose_quick_apply_link(&self.bundle_name, request)
    }

    /// Checks that `serial` was issued to `customer_name`.
    ///
    /// # Errors
    ///
    /// See [`serial::is_serial_valid`].
    pub fn is_serial_valid(&self, serial: &str, customer_name: &str) -> LicenseResult<bool> {
        serial::is_serial_valid(serial, customer_name, &self.scheme)
    }

    /// Validates a submitted request, folding errors into a user-facing result.
    #[must_use]
    pub fn validate(&self, request: &RegistrationRequest) -> Validation {
        match self.is_serial_valid(&request.license_key, &request.customer_name) {
            Ok(true) => {
                info!("License key accepted for {}", self.bundle_name);
                Validation::accepted()
            }
            Ok(false) => {
                warn!("License key rejected for {}: name mismatch", self.bundle_name);
                Validation::rejected(KEY_MISMATCH_MESSAGE)
            }
            Err(e) => {
                debug!("Registration input rejected: {}", e);
                e.into()
            }
        }
    }
}
