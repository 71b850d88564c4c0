//! Bearer token authentication

use super::types::AuthenticationOutcome;
use crate::credentials::records::{CredentialBundle, Principal};
use tracing::debug;

/// Validates bearer token values against a bundle's token records
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerAuthenticator;

impl BearerAuthenticator {
    /// Create a bearer authenticator
    pub fn new() -> Self {
        Self
    }

    /// Validate a bearer value against the bundle
    pub fn authenticate(&self, value: &str, bundle: &CredentialBundle) -> AuthenticationOutcome {
        match bundle.token(value) {
            Some(record) => AuthenticationOutcome::Authenticated(Principal {
                name: record.principal.clone(),
                roles: record.roles.clone(),
            }),
            None => {
                debug!("bearer authentication attempt rejected");
                AuthenticationOutcome::Unauthenticated
            }
        }
    }
}
