//! Authentication flow integration tests
//!
//! End-to-end dispatch behavior: the concrete credential scenarios, scope
//! isolation, and scheme enablement/ordering.

use crate::common::{basic_header, bearer_header, credential_file};
use authgate::{AuthGate, AuthGateConfig, SchemeKind, ScopeConfig, SourceConfig};

// ==================== Concrete scenarios ====================

/// A user loaded from `demo-user:{noop}demo-password USER` authenticates
/// with the matching Basic credentials and rejects a wrong password
#[test]
fn test_basic_user_scenario() {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/user-info/**")
                .with_users(SourceConfig::inline(["demo-user:{noop}demo-password USER"])),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    let outcome = gate.handle(
        "/user-info",
        Some(&basic_header("demo-user", "demo-password")),
    );
    let principal = outcome.principal().expect("valid credentials");
    assert_eq!(principal.name, "demo-user");
    assert!(principal.has_role("USER"));

    let outcome = gate.handle("/user-info", Some(&basic_header("demo-user", "wrong")));
    assert!(!outcome.is_authenticated());
}

/// A token loaded from `TOKEN_STORED_IN_FILE demo-user USER` authenticates
/// as its principal
#[test]
fn test_bearer_token_from_file_scenario() {
    let tokens = credential_file("TOKEN_STORED_IN_FILE demo-user USER\n");

    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/file-user-info/**")
                .with_tokens(SourceConfig::file(tokens.path())),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    let outcome = gate.handle(
        "/file-user-info",
        Some(&bearer_header("TOKEN_STORED_IN_FILE")),
    );
    let principal = outcome.principal().expect("valid token");
    assert_eq!(principal.name, "demo-user");
    assert!(principal.has_role("USER"));
}

/// A request to an unregistered path, or a registered path without an
/// Authorization header, is Unauthenticated rather than a crash
#[test]
fn test_missing_scope_and_missing_credentials() {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/user-info/**")
                .with_users(SourceConfig::inline(["demo-user:{noop}demo-password USER"])),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    assert!(!gate.handle("/nowhere", None).is_authenticated());
    assert!(!gate.handle("/user-info", None).is_authenticated());
}

// ==================== Isolation ====================

/// A scope never authenticates credentials valid only in another scope's
/// bundle, even with both registered simultaneously
#[test]
fn test_scope_bundles_are_isolated() {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/first/**")
                .with_users(SourceConfig::inline(["alice:{noop}alice-pw USER"])),
            ScopeConfig::new("/second/**")
                .with_users(SourceConfig::inline(["bob:{noop}bob-pw USER"])),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    // each user works in their own scope
    assert!(gate
        .handle("/first", Some(&basic_header("alice", "alice-pw")))
        .is_authenticated());
    assert!(gate
        .handle("/second", Some(&basic_header("bob", "bob-pw")))
        .is_authenticated());

    // and nowhere else
    assert!(!gate
        .handle("/second", Some(&basic_header("alice", "alice-pw")))
        .is_authenticated());
    assert!(!gate
        .handle("/first", Some(&basic_header("bob", "bob-pw")))
        .is_authenticated());
}

// ==================== Scheme ordering & enablement ====================

/// A scheme the scope does not enable is never consulted, even when the
/// request carries credentials that would satisfy it
#[test]
fn test_disabled_scheme_is_not_consulted() {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/token-only/**")
                .with_users(SourceConfig::inline(["alice:{noop}pw USER"]))
                .with_tokens(SourceConfig::inline(["TOKEN alice USER"]))
                .with_schemes(vec![SchemeKind::Bearer]),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    assert!(gate
        .handle("/token-only", Some(&bearer_header("TOKEN")))
        .is_authenticated());
    assert!(!gate
        .handle("/token-only", Some(&basic_header("alice", "pw")))
        .is_authenticated());
}

/// With both schemes enabled, a scheme whose credential material is absent
/// is skipped and the next scheme still gets its turn
#[test]
fn test_schemes_are_tried_in_order_with_skips() {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/both/**")
                .with_users(SourceConfig::inline(["alice:{noop}pw USER"]))
                .with_tokens(SourceConfig::inline(["TOKEN token-principal USER"]))
                .with_schemes(vec![SchemeKind::Basic, SchemeKind::Bearer]),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    // Basic listed first, but a Bearer header only satisfies the second scheme
    let outcome = gate.handle("/both", Some(&bearer_header("TOKEN")));
    assert_eq!(outcome.principal().unwrap().name, "token-principal");

    let outcome = gate.handle("/both", Some(&basic_header("alice", "pw")));
    assert_eq!(outcome.principal().unwrap().name, "alice");
}

// ==================== Pattern specificity ====================

/// When two patterns match, the most specific scope's bundle decides
#[test]
fn test_most_specific_scope_wins() {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/api/**")
                .with_users(SourceConfig::inline(["outer:{noop}outer-pw USER"])),
            ScopeConfig::new("/api/admin/**")
                .with_users(SourceConfig::inline(["inner:{noop}inner-pw ADMIN"])),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();

    assert!(gate
        .handle("/api/admin/panel", Some(&basic_header("inner", "inner-pw")))
        .is_authenticated());
    assert!(!gate
        .handle("/api/admin/panel", Some(&basic_header("outer", "outer-pw")))
        .is_authenticated());
    assert!(gate
        .handle("/api/other", Some(&basic_header("outer", "outer-pw")))
        .is_authenticated());
}
