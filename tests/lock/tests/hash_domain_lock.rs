//! Hash domain lock tests.
//!
//! Pins the domain prefixes and a few golden digests so that any change to
//! the canonical byte forms shows up as a test failure rather than as a
//! silent digest drift.

use std::collections::BTreeSet;

use ara_harness::runner::DOMAIN_RUN_BUNDLE;
use ara_search::digest::{
    canonical_hash, canonical_json_bytes, DOMAIN_SEARCH_POLICY, DOMAIN_SEARCH_REPORT,
};
use ara_search::SearchPolicy;

const ALL_DOMAINS: &[&[u8]] = &[DOMAIN_SEARCH_REPORT, DOMAIN_SEARCH_POLICY, DOMAIN_RUN_BUNDLE];

// ---------------------------------------------------------------------------
// Domain shape
// ---------------------------------------------------------------------------

#[test]
fn domains_are_unique() {
    let distinct: BTreeSet<&[u8]> = ALL_DOMAINS.iter().copied().collect();
    assert_eq!(distinct.len(), ALL_DOMAINS.len());
}

#[test]
fn domains_are_null_terminated_and_namespaced() {
    for domain in ALL_DOMAINS {
        assert!(domain.ends_with(&[0]), "{domain:?} is not null-terminated");
        let text = std::str::from_utf8(&domain[..domain.len() - 1]).unwrap();
        assert!(
            text.starts_with("ARA::") && text.ends_with("::V1"),
            "{text} does not follow ARA::<NAME>::V1"
        );
    }
}

// ---------------------------------------------------------------------------
// Golden digests
// ---------------------------------------------------------------------------

#[test]
fn golden_digest_per_domain() {
    let payload = br#"{"a":1}"#;
    assert_eq!(
        canonical_hash(DOMAIN_SEARCH_REPORT, payload).as_str(),
        "sha256:cacff71499fb4eed9079ff84338764a8d8649234b46d913087f05ca0d17879ac"
    );
    assert_eq!(
        canonical_hash(DOMAIN_SEARCH_POLICY, payload).as_str(),
        "sha256:819ac2d6004929eb096d805e36c01ec018d31c5ed2402a46224ec7eb9609111a"
    );
    assert_eq!(
        canonical_hash(DOMAIN_RUN_BUNDLE, payload).as_str(),
        "sha256:03df8ba262f39f5323544dbf23aa13522f1afdba2611b9067c47fc2564c7ae27"
    );
}

#[test]
fn default_policy_canonical_form_is_pinned() {
    let bytes = canonical_json_bytes(&SearchPolicy::default().to_json()).unwrap();
    assert_eq!(
        String::from_utf8(bytes.clone()).unwrap(),
        r#"{"bound_tolerance":"0.000000001","epsilon_initial":"3","epsilon_step":"0.5","max_expansions":null,"mode":"anytime","timeout_ms":10000}"#
    );
    assert_eq!(
        canonical_hash(DOMAIN_SEARCH_POLICY, &bytes).as_str(),
        "sha256:5336d42b7f88d981efe0f2db03d4cb0010edaefd0545ea8513aadddfe5ffb4c5"
    );
}
