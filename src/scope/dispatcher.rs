//! Request dispatcher
//!
//! For an inbound request the dispatcher finds the matching scope, attempts
//! each of its enabled schemes in configured order against the scope's own
//! bundle, and short-circuits on the first success. A scheme whose credential
//! material is absent from the request is skipped, not failed. The dispatcher
//! holds only immutable state and is safe to share across workers.

use super::registry::ScopeRegistry;
use crate::methods::{
    AuthenticationOutcome, BasicAuthenticator, BearerAuthenticator, Credential,
};
use tracing::debug;

/// Evaluates authentication policies for inbound requests
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: ScopeRegistry,
    basic: BasicAuthenticator,
    bearer: BearerAuthenticator,
}

impl Dispatcher {
    /// Dispatcher with the default authenticators
    pub fn new(registry: ScopeRegistry) -> Self {
        Self {
            registry,
            basic: BasicAuthenticator::new(),
            bearer: BearerAuthenticator::new(),
        }
    }

    /// Dispatcher with a customized Basic authenticator
    ///
    /// Used when additional password encodings are registered.
    pub fn with_basic_authenticator(registry: ScopeRegistry, basic: BasicAuthenticator) -> Self {
        Self {
            registry,
            basic,
            bearer: BearerAuthenticator::new(),
        }
    }

    /// Whether any scope protects the given path
    pub fn protects(&self, path: &str) -> bool {
        self.registry.match_path(path).is_some()
    }

    /// The underlying scope registry
    pub fn registry(&self) -> &ScopeRegistry {
        &self.registry
    }

    /// Authenticate one request
    ///
    /// `authorization` is the raw `Authorization` header value, if the
    /// request carried one.
    pub fn handle(&self, path: &str, authorization: Option<&str>) -> AuthenticationOutcome {
        let Some(scope) = self.registry.match_path(path) else {
            debug!(path, "no scope matches path");
            return AuthenticationOutcome::Unauthenticated;
        };

        let Some(header) = authorization else {
            debug!(path, "request offers no credentials");
            return AuthenticationOutcome::Unauthenticated;
        };

        for scheme in scope.schemes() {
            let Some(credential) = Credential::for_scheme(header, *scheme) else {
                continue;
            };

            let outcome = match credential {
                Credential::Basic { username, password } => {
                    self.basic.authenticate(&username, &password, scope.bundle())
                }
                Credential::Bearer(value) => self.bearer.authenticate(&value, scope.bundle()),
            };

            if outcome.is_authenticated() {
                debug!(path, scheme = %scheme, "request authenticated");
                return outcome;
            }
        }

        AuthenticationOutcome::Unauthenticated
    }
}
