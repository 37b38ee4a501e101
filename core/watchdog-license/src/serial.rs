//! Serial schemes: the correspondence between a customer name and a serial.
//!
//! The registration core never hardcodes how serials are minted. A
//! [`SerialScheme`] decides whether a serial belongs to a name, and any
//! deterministic [`SerialGenerator`] (including a plain closure) is a scheme
//! by generating the expected serial and comparing.
//!
//! Two schemes ship with the crate:
//! - [`KeyedDigestGenerator`]: SHA-256 over a vendor secret and the name,
//!   formatted as `XXXX-XXXX-XXXX-XXXX-XXXX`
//! - [`SignedSerialIssuer`] / [`SignedSerialVerifier`]: Ed25519 signature over
//!   the name, base64url-encoded; the app only needs the public key

use crate::error::{LicenseError, LicenseResult};
use crate::request::require_non_blank;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of digest bytes rendered into a keyed-digest serial.
const DIGEST_SERIAL_BYTES: usize = 10;

/// Hex characters per dash-separated group.
const DIGEST_GROUP_LEN: usize = 4;

/// Decides whether a serial was issued to a customer name.
pub trait SerialScheme: Send + Sync {
    /// Returns true if `serial` belongs to `customer_name`.
    ///
    /// Both arguments arrive trimmed and non-empty.
    fn conforms(&self, serial: &str, customer_name: &str) -> bool;
}

/// A deterministic `customer name -> serial` function.
pub trait SerialGenerator: Send + Sync {
    /// Produces the serial for `customer_name`.
    fn generate(&self, customer_name: &str) -> String;

    /// Canonical form used when comparing a candidate with a generated serial.
    /// The default drops all whitespace.
    fn normalize(&self, serial: &str) -> String {
        strip_whitespace(serial)
    }
}

impl<G: SerialGenerator> SerialScheme for G {
    fn conforms(&self, serial: &str, customer_name: &str) -> bool {
        let expected = self.generate(customer_name);
        self.normalize(serial) == self.normalize(&expected)
    }
}

impl<F> SerialGenerator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn generate(&self, customer_name: &str) -> String {
        self(customer_name)
    }
}

/// Checks that `serial` was issued to `customer_name` under `scheme`.
///
/// Surrounding whitespace is ignored on both inputs. A serial that is well
/// formed but belongs to someone else yields `Ok(false)`.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidInput`] if either input is blank.
pub fn is_serial_valid<S: SerialScheme + ?Sized>(
    serial: &str,
    customer_name: &str,
    scheme: &S,
) -> LicenseResult<bool> {
    let serial = require_non_blank("serial", serial)?;
    let customer_name = require_non_blank("customer name", customer_name)?;
    Ok(scheme.conforms(serial, customer_name))
}

// ── Keyed digest ─────────────────────────────────────────────────

/// Serial generator based on SHA-256 of a vendor secret and the customer name.
///
/// Comparison ignores ASCII case and whitespace, so `abcd-1234-...` typed in
/// lowercase still matches.
#[derive(Clone)]
pub struct KeyedDigestGenerator {
    secret: Vec<u8>,
}

impl KeyedDigestGenerator {
    /// Creates a generator keyed with `secret`.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }
}

impl SerialGenerator for KeyedDigestGenerator {
    fn generate(&self, customer_name: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update([0u8]);
        hasher.update(customer_name.trim().as_bytes());
        let hash = hasher.finalize();

        let hex = hex::encode_upper(&hash[..DIGEST_SERIAL_BYTES]);
        hex.as_bytes()
            .chunks(DIGEST_GROUP_LEN)
            .map(|group| std::str::from_utf8(group).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }

    fn normalize(&self, serial: &str) -> String {
        strip_whitespace(serial).to_ascii_uppercase()
    }
}

impl fmt::Debug for KeyedDigestGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedDigestGenerator")
            .field("secret", &"<redacted>")
            .finish()
    }
}

// ── Ed25519 signed serials ───────────────────────────────────────

/// Issues serials by signing the customer name with an Ed25519 key.
///
/// Ed25519 signatures are deterministic, so the issuer is also a valid
/// [`SerialGenerator`]. Shipping apps should use [`SignedSerialVerifier`]
/// instead so the signing key never leaves the vendor.
#[derive(Clone)]
pub struct SignedSerialIssuer {
    signing_key: SigningKey,
}

impl SignedSerialIssuer {
    /// Creates an issuer from a 32-byte Ed25519 seed.
    #[must_use]
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Creates an issuer from a hex-encoded 32-byte seed.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the hex or its length is wrong.
    pub fn from_hex(seed_hex: &str) -> LicenseResult<Self> {
        Ok(Self::from_seed(&decode_key_hex(seed_hex)?))
    }

    /// Returns the matching public key bytes.
    #[must_use]
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Returns a verifier for serials produced by this issuer.
    #[must_use]
    pub fn verifier(&self) -> SignedSerialVerifier {
        SignedSerialVerifier {
            verifying_key: self.signing_key.verifying_key(),
        }
    }
}

impl SerialGenerator for SignedSerialIssuer {
    fn generate(&self, customer_name: &str) -> String {
        let signature = self.signing_key.sign(customer_name.trim().as_bytes());
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    }
}

impl fmt::Debug for SignedSerialIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedSerialIssuer")
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}

/// Verifies Ed25519-signed serials with only the public key.
#[derive(Debug, Clone)]
pub struct SignedSerialVerifier {
    verifying_key: VerifyingKey,
}

impl SignedSerialVerifier {
    /// Creates a verifier from raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the bytes are not a valid
    /// Ed25519 point.
    pub fn from_bytes(public_key: &[u8; 32]) -> LicenseResult<Self> {
        let verifying_key = VerifyingKey::from_bytes(public_key)
            .map_err(|_| LicenseError::InvalidKey("invalid public key".to_string()))?;
        Ok(Self { verifying_key })
    }

    /// Creates a verifier from a hex-encoded public key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the hex, its length, or the
    /// point itself is invalid.
    pub fn from_hex(public_key_hex: &str) -> LicenseResult<Self> {
        Self::from_bytes(&decode_key_hex(public_key_hex)?)
    }
}

impl SerialScheme for SignedSerialVerifier {
    fn conforms(&self, serial: &str, customer_name: &str) -> bool {
        let Ok(sig_bytes) = URL_SAFE_NO_PAD.decode(strip_whitespace(serial)) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&sig_bytes) else {
            return false;
        };
        self.verifying_key
            .verify(customer_name.trim().as_bytes(), &signature)
            .is_ok()
    }
}

fn decode_key_hex(key_hex: &str) -> LicenseResult<[u8; 32]> {
    let bytes = hex::decode(key_hex.trim())
        .map_err(|e| LicenseError::InvalidKey(format!("invalid key hex: {e}")))?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        LicenseError::InvalidKey(format!("key must be 32 bytes, got {}", bytes.len()))
    })
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
