//! Quick-apply link encoding and decoding.
//!
//! A quick-apply link pre-fills the registration dialog. Links use the format:
//! `<bundle>-wd://base64(customer_name):<license_key>`
//!
//! - `<bundle>` is the application bundle name, lowercased with whitespace
//!   removed, so `"Watchdog Pro"` becomes `watchdogpro-wd://...`
//! - the customer name is base64 (standard alphabet, padded) so that any
//!   UTF-8 name survives the trip through mail clients and browsers
//! - the license key follows the first `:` after `://`, percent-encoded
//!
//! Decoding undoes percent-escapes anywhere after `://`, is lenient about
//! base64 padding, and also accepts the URL-safe alphabet, since browsers and
//! mailers like to rewrite all three.

use crate::error::{LicenseError, LicenseResult};
use crate::request::{require_non_blank, RegistrationRequest};
use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Suffix appended to the normalized bundle name to form the link scheme.
pub const SCHEME_SUFFIX: &str = "-wd";

const SCHEME_SEPARATOR: &str = "://";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Normalizes a bundle name the way it appears in a link scheme.
#[must_use]
pub fn normalize_bundle_name(bundle_name: &str) -> String {
    bundle_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the link scheme (without `://`) for a bundle name.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidInput`] if the bundle name normalizes to
/// nothing or to characters a URI scheme cannot hold.
pub fn link_scheme(bundle_name: &str) -> LicenseResult<String> {
    Ok(format!("{}{SCHEME_SUFFIX}", bundle_id_for(bundle_name)?))
}

fn bundle_id_for(bundle_name: &str) -> LicenseResult<String> {
    let bundle_id = normalize_bundle_name(bundle_name);
    if bundle_id.is_empty() {
        return Err(LicenseError::InvalidInput(
            "bundle name must not be empty".to_string(),
        ));
    }
    if !is_scheme_safe(&bundle_id) {
        return Err(LicenseError::InvalidInput(format!(
            "bundle name \"{bundle_name}\" cannot be used as a link scheme"
        )));
    }
    Ok(bundle_id)
}

/// A decoded quick-apply link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickApplyLink {
    bundle_id: String,
    request: RegistrationRequest,
}

impl QuickApplyLink {
    /// Builds a link for `bundle_name` carrying `request`.
    ///
    /// Both request fields are trimmed before encoding.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if the bundle name normalizes to
    /// something that cannot be a URI scheme, or either field is blank.
    pub fn new(bundle_name: &str, request: &RegistrationRequest) -> LicenseResult<Self> {
        let bundle_id = bundle_id_for(bundle_name)?;
        request.ensure_complete()?;

        Ok(Self {
            bundle_id,
            request: request.trimmed(),
        })
    }

    /// Parses a link string without checking which bundle it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MalformedLink`] if any part of the structure is
    /// missing or undecodable.
    pub fn parse(link: &str) -> LicenseResult<Self> {
        let link = link.trim();

        let (scheme, payload) = link.split_once(SCHEME_SEPARATOR).ok_or_else(|| {
            malformed("missing \"://\" after the link scheme")
        })?;

        let scheme = scheme.to_lowercase();
        let bundle_id = scheme
            .strip_suffix(SCHEME_SUFFIX)
            .ok_or_else(|| malformed(format!("scheme must end with \"{SCHEME_SUFFIX}\"")))?;
        if bundle_id.is_empty() || !is_scheme_safe(bundle_id) {
            return Err(malformed("missing or invalid bundle identifier"));
        }

        let payload = urlencoding::decode(payload)
            .map_err(|_| malformed("percent-escapes do not decode to UTF-8"))?;
        let (name_b64, license_key) = payload.split_once(':').ok_or_else(|| {
            malformed("missing ':' between customer name and license key")
        })?;

        let name_bytes = LENIENT_STANDARD
            .decode(name_b64)
            .or_else(|_| LENIENT_URL_SAFE.decode(name_b64))
            .map_err(|e| malformed(format!("customer name is not valid base64: {e}")))?;
        let customer_name = String::from_utf8(name_bytes)
            .map_err(|_| malformed("customer name is not valid UTF-8"))?;

        if customer_name.trim().is_empty() {
            return Err(malformed("customer name is empty"));
        }
        if license_key.trim().is_empty() {
            return Err(malformed("license key is empty"));
        }

        Ok(Self {
            bundle_id: bundle_id.to_string(),
            request: RegistrationRequest::new(customer_name, license_key),
        })
    }

    /// Returns the normalized bundle identifier embedded in the link.
    #[must_use]
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    /// Returns the carried registration fields.
    #[must_use]
    pub fn request(&self) -> &RegistrationRequest {
        &self.request
    }

    /// Consumes the link, returning the registration fields.
    #[must_use]
    pub fn into_request(self) -> RegistrationRequest {
        self.request
    }

    /// Returns true if the link was issued for `bundle_name`.
    #[must_use]
    pub fn matches_bundle(&self, bundle_name: &str) -> bool {
        self.bundle_id == normalize_bundle_name(bundle_name)
    }
}

impl fmt::Display for QuickApplyLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SCHEME_SUFFIX}{SCHEME_SEPARATOR}{}:{}",
            self.bundle_id,
            STANDARD.encode(self.request.customer_name.as_bytes()),
            urlencoding::encode(&self.request.license_key)
        )
    }
}

impl FromStr for QuickApplyLink {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Encodes `request` as a quick-apply link for `bundle_name`.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidInput`] for a blank bundle name or field.
pub fn compose_quick_apply_link(
    bundle_name: &str,
    request: &RegistrationRequest,
) -> LicenseResult<String> {
    Ok(QuickApplyLink::new(bundle_name, request)?.to_string())
}

/// Splits a quick-apply link into its registration fields.
///
/// # Errors
///
/// - [`LicenseError::InvalidInput`] if `expected_bundle_name` is blank
/// - [`LicenseError::MalformedLink`] if the link structure is broken
/// - [`LicenseError::BundleMismatch`] if the link was issued for another bundle
pub fn decompose_quick_apply_link(
    link: &str,
    expected_bundle_name: &str,
) -> LicenseResult<RegistrationRequest> {
    require_non_blank("bundle name", expected_bundle_name)?;

    let parsed = QuickApplyLink::parse(link).inspect_err(|e| {
        debug!("Rejected quick-apply link: {}", e);
    })?;

    if !parsed.matches_bundle(expected_bundle_name) {
        let expected = normalize_bundle_name(expected_bundle_name);
        debug!(
            "Quick-apply link for {} offered to {}",
            parsed.bundle_id, expected
        );
        return Err(LicenseError::BundleMismatch {
            expected,
            found: parsed.bundle_id,
        });
    }

    Ok(parsed.into_request())
}

fn malformed(reason: impl Into<String>) -> LicenseError {
    LicenseError::MalformedLink(reason.into())
}

/// A letter followed by characters allowed in a URI scheme (RFC 3986
/// section 3.1).
fn is_scheme_safe(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
