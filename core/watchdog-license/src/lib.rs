//! Registration validation for Watchdog-protected applications.
//!
//! This module handles:
//! - Decoding quick-apply links that pre-fill the registration dialog
//! - Checking that a serial corresponds to a customer name
//! - Folding both into a pass/fail result the UI can show
//!
//! # Design Principles
//!
//! - **Pure**: no I/O, no shared state; every call is synchronous
//! - **Pluggable serials**: the name-to-serial function is injected through
//!   [`SerialScheme`] / [`SerialGenerator`], never hardcoded
//! - **Recoverable errors**: every [`LicenseError`] is a validation message,
//!   never a reason to abort
//!
//! # Quick-Apply Link Format
//!
//! Links are formatted as: `<bundle>-wd://base64(customer_name):<license_key>`

mod error;
mod link;
mod request;
mod serial;
mod validator;

pub use error::{LicenseError, LicenseResult};
pub use link::{
    compose_quick_apply_link, decompose_quick_apply_link, link_scheme, normalize_bundle_name,
    QuickApplyLink, SCHEME_SUFFIX,
};
pub use request::{RegistrationRequest, Validation};
pub use serial::{
    is_serial_valid, KeyedDigestGenerator, SerialGenerator, SerialScheme, SignedSerialIssuer,
    SignedSerialVerifier,
};
pub use validator::{LicenseValidator, KEY_MISMATCH_MESSAGE};
