//! Source equivalence integration tests
//!
//! The three source kinds loaded with equivalent underlying data must
//! authenticate identically.

use crate::common::{basic_header, bearer_header, credential_file, FixedEnvironment};
use authgate::{AuthGate, AuthGateConfig, AuthenticationOutcome, ScopeConfig, SourceConfig};
use std::sync::Arc;

const USER_LINE: &str = "demo-user:{noop}demo-password USER";
const TOKEN_LINE: &str = "SHARED_TOKEN demo-user USER";

fn inline_gate() -> AuthGate {
    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/demo/**")
                .with_users(SourceConfig::inline([USER_LINE]))
                .with_tokens(SourceConfig::inline([TOKEN_LINE])),
        ],
    };
    AuthGate::from_config(&config).unwrap()
}

fn file_gate() -> (AuthGate, Vec<tempfile::NamedTempFile>) {
    let passwords = credential_file(&format!("# users\n{}\n", USER_LINE));
    let tokens = credential_file(&format!("{}\n", TOKEN_LINE));

    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/demo/**")
                .with_users(SourceConfig::file(passwords.path()))
                .with_tokens(SourceConfig::file(tokens.path())),
        ],
    };
    let gate = AuthGate::from_config(&config).unwrap();
    (gate, vec![passwords, tokens])
}

fn environment_gate() -> AuthGate {
    let supplier = Arc::new(FixedEnvironment::from_pairs(&[
        ("DEMO_USER_1", USER_LINE),
        ("DEMO_TOKEN_1", TOKEN_LINE),
    ]));

    let config = AuthGateConfig {
        scopes: vec![
            ScopeConfig::new("/demo/**")
                .with_users(SourceConfig::environment("DEMO_USER"))
                .with_tokens(SourceConfig::environment("DEMO_TOKEN")),
        ],
    };
    AuthGate::with_supplier(&config, supplier).unwrap()
}

fn assert_outcomes_match(gate: &AuthGate, reference: &AuthGate) {
    let probes = [
        Some(basic_header("demo-user", "demo-password")),
        Some(basic_header("demo-user", "wrong")),
        Some(basic_header("nobody", "demo-password")),
        Some(bearer_header("SHARED_TOKEN")),
        Some(bearer_header("UNKNOWN_TOKEN")),
        None,
    ];

    for probe in probes {
        let got = gate.handle("/demo", probe.as_deref());
        let want = reference.handle("/demo", probe.as_deref());
        assert_eq!(got, want);
    }
}

/// Equivalent data behind file and environment sources authenticates the
/// same way it does behind the inline source
#[test]
fn test_all_sources_authenticate_equivalently() {
    let reference = inline_gate();
    let (from_files, _fixtures) = file_gate();
    let from_environment = environment_gate();

    assert_outcomes_match(&from_files, &reference);
    assert_outcomes_match(&from_environment, &reference);
}

/// The reference outcomes themselves are what the scenarios require
#[test]
fn test_reference_outcomes() {
    let gate = inline_gate();

    let outcome = gate.handle("/demo", Some(&basic_header("demo-user", "demo-password")));
    assert_eq!(outcome.principal().unwrap().name, "demo-user");

    let outcome = gate.handle("/demo", Some(&bearer_header("SHARED_TOKEN")));
    assert_eq!(outcome.principal().unwrap().name, "demo-user");

    assert_eq!(
        gate.handle("/demo", Some(&basic_header("demo-user", "wrong"))),
        AuthenticationOutcome::Unauthenticated
    );
}
