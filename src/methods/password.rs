//! Password encoding registry
//!
//! Stored passwords may be prefixed with an encoding-scheme marker of the
//! form `{id}`. The registry maps each known id to a verify function, so new
//! encodings can be added without touching the Basic authenticator. A stored
//! password without a recognized marker is compared verbatim.

use std::collections::HashMap;
use std::fmt;

/// Verify a presented password against the stored remainder for one encoding
pub type PasswordVerifier = fn(stored: &str, presented: &str) -> bool;

/// Registry of encoding-scheme id → verify function
#[derive(Clone)]
pub struct PasswordEncodings {
    verifiers: HashMap<String, PasswordVerifier>,
}

impl fmt::Debug for PasswordEncodings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEncodings")
            .field("encodings", &self.verifiers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for PasswordEncodings {
    fn default() -> Self {
        let mut registry = Self {
            verifiers: HashMap::new(),
        };
        registry.register("noop", |stored, presented| stored == presented);
        registry
    }
}

impl PasswordEncodings {
    /// Registry with the built-in `{noop}` encoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a verify function for an encoding id
    pub fn register(&mut self, id: &str, verifier: PasswordVerifier) {
        self.verifiers.insert(id.to_string(), verifier);
    }

    /// Verify a presented password against a stored one
    ///
    /// A `{id}` marker with a registered verifier delegates to it with the
    /// marker stripped; anything else is compared verbatim.
    pub fn verify(&self, stored: &str, presented: &str) -> bool {
        match split_marker(stored) {
            Some((id, remainder)) => match self.verifiers.get(id) {
                Some(verifier) => verifier(remainder, presented),
                None => stored == presented,
            },
            None => stored == presented,
        }
    }
}

/// Split `{id}remainder` into its parts
fn split_marker(stored: &str) -> Option<(&str, &str)> {
    stored.strip_prefix('{')?.split_once('}')
}
