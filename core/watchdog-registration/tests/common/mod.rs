//! Shared test helpers for registration tests.

#![allow(dead_code)]

use watchdog_license::{KeyedDigestGenerator, SerialGenerator};
use watchdog_registration::{RegistrationConfig, RegistrationController};

pub const LOST_KEY_URL: &str = "https://example.com/lost-key";
pub const BUY_URL: &str = "https://example.com/buy";

pub fn test_config() -> RegistrationConfig {
    RegistrationConfig::new("Watchdog", LOST_KEY_URL, BUY_URL)
}

pub fn test_scheme() -> KeyedDigestGenerator {
    KeyedDigestGenerator::new("registration-test-secret")
}

pub fn serial_for(name: &str) -> String {
    test_scheme().generate(name)
}

pub fn controller() -> RegistrationController<KeyedDigestGenerator> {
    RegistrationController::new(test_config(), test_scheme()).unwrap()
}
