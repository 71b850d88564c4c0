//! HTTP Basic authentication

use super::password::PasswordEncodings;
use super::types::AuthenticationOutcome;
use crate::credentials::records::{CredentialBundle, Principal};
use tracing::debug;

/// Validates username/password pairs against a bundle's user records
#[derive(Debug, Clone, Default)]
pub struct BasicAuthenticator {
    encodings: PasswordEncodings,
}

impl BasicAuthenticator {
    /// Authenticator with the built-in password encodings
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticator with a custom password-encoding registry
    pub fn with_encodings(encodings: PasswordEncodings) -> Self {
        Self { encodings }
    }

    /// Validate a username/password pair against the bundle
    ///
    /// An unknown username and a wrong password produce the identical
    /// outcome; nothing discloses which factor failed.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        bundle: &CredentialBundle,
    ) -> AuthenticationOutcome {
        match bundle.user(username) {
            Some(record) if self.encodings.verify(&record.password, password) => {
                AuthenticationOutcome::Authenticated(Principal {
                    name: record.username.clone(),
                    roles: record.roles.clone(),
                })
            }
            _ => {
                debug!("basic authentication attempt rejected");
                AuthenticationOutcome::Unauthenticated
            }
        }
    }
}
