//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
///
/// Every variant is a recoverable validation failure meant to be shown to
/// the user, never a reason to abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LicenseError {
    /// The quick-apply link does not follow `<scheme>://<name>:<key>`.
    #[error("malformed quick-apply link: {0}")]
    MalformedLink(String),

    /// The quick-apply link was issued for a different application.
    #[error("quick-apply link belongs to \"{found}\", expected \"{expected}\"")]
    BundleMismatch {
        /// Normalized bundle name the caller expected.
        expected: String,
        /// Bundle identifier embedded in the link.
        found: String,
    },

    /// A required field is empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Key material for a signed serial scheme is unusable.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
