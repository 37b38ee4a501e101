mod common;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common::BUNDLE;
use pretty_assertions::assert_eq;
use watchdog_license::{
    compose_quick_apply_link, decompose_quick_apply_link, LicenseError, QuickApplyLink,
    RegistrationRequest,
};

fn jane() -> RegistrationRequest {
    RegistrationRequest::new("Jane Doe", "ABCD-1234-EF56-7890-ABCD")
}

// ── Composition ──────────────────────────────────────────────────

#[test]
fn compose_known_link() {
    let link = compose_quick_apply_link(BUNDLE, &jane()).unwrap();
    assert_eq!(link, "watchdog-wd://SmFuZSBEb2U=:ABCD-1234-EF56-7890-ABCD");
}

#[test]
fn compose_normalizes_bundle_name() {
    let link = compose_quick_apply_link("Watchdog Pro", &jane()).unwrap();
    assert!(link.starts_with("watchdogpro-wd://"));
}

#[test]
fn compose_trims_fields() {
    let padded = RegistrationRequest::new("  Jane Doe ", " KEY\n");
    let link = compose_quick_apply_link(BUNDLE, &padded).unwrap();
    let decoded = decompose_quick_apply_link(&link, BUNDLE).unwrap();
    assert_eq!(decoded, RegistrationRequest::new("Jane Doe", "KEY"));
}

#[test]
fn compose_percent_encodes_key() {
    let request = RegistrationRequest::new("Jane", "AB CD%1");
    let link = compose_quick_apply_link(BUNDLE, &request).unwrap();
    assert_eq!(link, "watchdog-wd://SmFuZQ==:AB%20CD%251");
    assert!(!link.contains(' '));
    assert_eq!(decompose_quick_apply_link(&link, BUNDLE).unwrap(), request);
}

#[test]
fn compose_rejects_blank_fields() {
    let blank_name = RegistrationRequest::new(" ", "KEY");
    let blank_key = RegistrationRequest::new("Jane", "");
    assert!(matches!(
        compose_quick_apply_link(BUNDLE, &blank_name),
        Err(LicenseError::InvalidInput(_))
    ));
    assert!(matches!(
        compose_quick_apply_link(BUNDLE, &blank_key),
        Err(LicenseError::InvalidInput(_))
    ));
}

#[test]
fn compose_rejects_unusable_bundle_names() {
    assert!(matches!(
        compose_quick_apply_link("", &jane()),
        Err(LicenseError::InvalidInput(_))
    ));
    assert!(matches!(
        compose_quick_apply_link("my/app", &jane()),
        Err(LicenseError::InvalidInput(_))
    ));
    assert!(matches!(
        compose_quick_apply_link("1Password", &jane()),
        Err(LicenseError::InvalidInput(_))
    ));
}

// ── Decomposition ────────────────────────────────────────────────

#[test]
fn decompose_known_link() {
    let request =
        decompose_quick_apply_link("watchdog-wd://SmFuZSBEb2U=:ABCD-1234-EF56-7890-ABCD", BUNDLE)
            .unwrap();
    assert_eq!(request, jane());
}

#[test]
fn decompose_round_trips_unicode_names() {
    let request = RegistrationRequest::new("Zoë Łukasiewicz 山田", "K-1");
    let link = compose_quick_apply_link(BUNDLE, &request).unwrap();
    assert_eq!(decompose_quick_apply_link(&link, BUNDLE).unwrap(), request);
}

#[test]
fn decompose_keeps_colons_in_key() {
    let request = RegistrationRequest::new("Jane Doe", "part:one:two");
    let link = compose_quick_apply_link(BUNDLE, &request).unwrap();
    assert_eq!(decompose_quick_apply_link(&link, BUNDLE).unwrap(), request);
}

#[test]
fn decompose_accepts_unpadded_and_url_safe_names() {
    let name = "Jane Doe??>";
    let encoded = URL_SAFE_NO_PAD.encode(name);
    let link = format!("watchdog-wd://{encoded}:KEY");
    let request = decompose_quick_apply_link(&link, BUNDLE).unwrap();
    assert_eq!(request, RegistrationRequest::new(name, "KEY"));
}

#[test]
fn decompose_undoes_percent_escapes() {
    let request =
        decompose_quick_apply_link("watchdog-wd://SmFuZQ%3D%3D:AB%20CD", BUNDLE).unwrap();
    assert_eq!(request, RegistrationRequest::new("Jane", "AB CD"));

    let request =
        decompose_quick_apply_link("watchdog-wd://SmFuZSBEb2U%3D%3AKEY%2D1", BUNDLE).unwrap();
    assert_eq!(request, RegistrationRequest::new("Jane Doe", "KEY-1"));
}

#[test]
fn decompose_is_case_insensitive_on_scheme() {
    let request =
        decompose_quick_apply_link("WatchDog-WD://SmFuZSBEb2U=:KEY", "watchdog").unwrap();
    assert_eq!(request.customer_name, "Jane Doe");
}

#[test]
fn decompose_ignores_surrounding_whitespace() {
    let request =
        decompose_quick_apply_link("  watchdog-wd://SmFuZSBEb2U=:KEY\n", BUNDLE).unwrap();
    assert_eq!(request, RegistrationRequest::new("Jane Doe", "KEY"));
}

#[test]
fn decompose_bundle_mismatch() {
    let link = compose_quick_apply_link("Other App", &jane()).unwrap();
    let err = decompose_quick_apply_link(&link, BUNDLE).unwrap_err();
    assert_eq!(
        err,
        LicenseError::BundleMismatch {
            expected: "watchdog".into(),
            found: "otherapp".into(),
        }
    );
}

#[test]
fn decompose_ignores_whitespace_in_bundle_names() {
    let link = compose_quick_apply_link("Watch Dog", &jane()).unwrap();
    assert!(link.starts_with("watchdog-wd://"));
    assert_eq!(decompose_quick_apply_link(&link, BUNDLE).unwrap(), jane());
}

#[test]
fn decompose_blank_expected_bundle_is_invalid_input() {
    let link = compose_quick_apply_link(BUNDLE, &jane()).unwrap();
    assert!(matches!(
        decompose_quick_apply_link(&link, "  "),
        Err(LicenseError::InvalidInput(_))
    ));
}

#[test]
fn decompose_malformed_links() {
    let cases = [
        "",
        "not a link",
        "watchdog://SmFuZSBEb2U=:KEY",
        "-wd://SmFuZSBEb2U=:KEY",
        "watch/dog-wd://SmFuZSBEb2U=:KEY",
        "watchdog-wd://SmFuZSBEb2U=",
        "watchdog-wd://***:KEY",
        "watchdog-wd://:KEY",
        "watchdog-wd://SmFuZSBEb2U=:",
        "watchdog-wd://SmFuZSBEb2U=:   ",
        "watchdog-wd://ICAg:KEY",
        "watchdog-wd:///w==:KEY",
        "watchdog-wd://%2Fw%3D%3D:KEY",
        "1watchdog-wd://SmFuZSBEb2U=:KEY",
    ];
    for link in cases {
        let result = decompose_quick_apply_link(link, BUNDLE);
        assert!(
            matches!(result, Err(LicenseError::MalformedLink(_))),
            "expected MalformedLink for {link:?}, got {result:?}"
        );
    }
}

// ── QuickApplyLink type ──────────────────────────────────────────

#[test]
fn parse_exposes_bundle_id() {
    let link: QuickApplyLink = "watchdogpro-wd://SmFuZSBEb2U=:KEY".parse().unwrap();
    assert_eq!(link.bundle_id(), "watchdogpro");
    assert!(link.matches_bundle("Watchdog Pro"));
    assert!(!link.matches_bundle("Watchdog"));
    assert_eq!(link.request().license_key, "KEY");
}

#[test]
fn display_matches_compose() {
    let link = QuickApplyLink::new(BUNDLE, &jane()).unwrap();
    assert_eq!(
        link.to_string(),
        compose_quick_apply_link(BUNDLE, &jane()).unwrap()
    );
    assert_eq!(link.into_request(), jane());
}
