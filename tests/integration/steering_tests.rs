//! Steered environment integration tests
//!
//! The process-wide steering switch substitutes a registered supplier for
//! the real environment. Set before the environment source is consulted,
//! cleared afterwards; the tests here serialize their use of the switch.

use crate::common::basic_header;
use authgate::envvar::{self, EnvironmentSupplier, SteeredEnvironment};
use authgate::{AuthGate, AuthGateConfig, GateError, ScopeConfig, SourceConfig};
use parking_lot::Mutex;
use std::collections::HashMap;

static STEER_LOCK: Mutex<()> = Mutex::new(());

fn demo_environment() -> HashMap<String, String> {
    HashMap::from([
        (
            "SMS_ENV_USER_1".to_string(),
            "environment-demo-user:{noop}environment-demo-password USER".to_string(),
        ),
        (
            "SMS_ENV_TOKEN_1".to_string(),
            "TOKEN_READ_FROM_ENVIRONMENT environment-demo-user USER".to_string(),
        ),
    ])
}

fn empty_environment() -> HashMap<String, String> {
    HashMap::new()
}

fn environment_config() -> AuthGateConfig {
    crate::common::init_test_logging();
    AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/environment-user-info/**")
                .with_users(SourceConfig::environment("SMS_ENV_USER"))
                .with_tokens(SourceConfig::environment("SMS_ENV_TOKEN")),
        ],
    }
}

/// Steering the default supplier feeds the environment source a
/// deterministic snapshot without touching the process environment
#[test]
fn test_steered_supplier_feeds_environment_source() {
    let _guard = STEER_LOCK.lock();
    envvar::register_supplier("steering-tests-demo", demo_environment);
    envvar::steer("steering-tests-demo");

    let gate = AuthGate::from_config(&environment_config()).unwrap();
    envvar::clear_steering();

    let outcome = gate.handle(
        "/environment-user-info",
        Some(&basic_header(
            "environment-demo-user",
            "environment-demo-password",
        )),
    );
    let principal = outcome.principal().expect("environment user");
    assert_eq!(principal.name, "environment-demo-user");

    let outcome = gate.handle(
        "/environment-user-info",
        Some("Bearer TOKEN_READ_FROM_ENVIRONMENT"),
    );
    assert_eq!(
        outcome.principal().expect("environment token").name,
        "environment-demo-user"
    );
}

/// A snapshot with no matching keys yields an empty bundle, not an error
#[test]
fn test_empty_snapshot_is_empty_bundle() {
    let _guard = STEER_LOCK.lock();
    envvar::register_supplier("steering-tests-empty", empty_environment);
    envvar::steer("steering-tests-empty");

    let gate = AuthGate::from_config(&environment_config()).unwrap();
    envvar::clear_steering();

    let outcome = gate.handle(
        "/environment-user-info",
        Some(&basic_header("anyone", "anything")),
    );
    assert!(!outcome.is_authenticated());
}

/// Steering to an unregistered supplier fails the load rather than
/// silently falling back
#[test]
fn test_unresolvable_supplier_fails_assembly() {
    let _guard = STEER_LOCK.lock();
    envvar::steer("steering-tests-missing");

    let result = AuthGate::from_config(&environment_config());
    envvar::clear_steering();

    assert!(matches!(result, Err(GateError::SourceLoad(_))));
}

/// After clearing, snapshots come from the real process environment again
#[test]
fn test_cleared_switch_reads_process_environment() {
    let _guard = STEER_LOCK.lock();
    envvar::clear_steering();

    let snapshot = SteeredEnvironment.snapshot().unwrap();
    assert_eq!(snapshot.len(), std::env::vars().count());
}
