//! Inline credential source
//!
//! Credentials supplied as literal line-formatted strings directly in the
//! configuration, the runtime counterpart of hardcoding them next to the
//! scope they protect.

use super::{build_bundle, decode_token_lines, decode_user_lines, CredentialSource};
use crate::credentials::records::CredentialBundle;
use crate::utils::error::Result;
use tracing::debug;

/// Source holding an ordered sequence of literal credential lines
#[derive(Debug, Clone, Default)]
pub struct HardcodedSource {
    users: Vec<String>,
    tokens: Vec<String>,
}

impl HardcodedSource {
    /// Create a source from literal user and token lines
    pub fn new(users: Vec<String>, tokens: Vec<String>) -> Self {
        Self { users, tokens }
    }
}

impl CredentialSource for HardcodedSource {
    fn load(&self) -> Result<CredentialBundle> {
        let users = decode_user_lines("inline users", self.users.iter().map(String::as_str))?;
        let tokens = decode_token_lines("inline tokens", self.tokens.iter().map(String::as_str))?;

        let bundle = build_bundle("inline credentials", users, tokens)?;
        debug!(
            users = bundle.user_count(),
            tokens = bundle.token_count(),
            "loaded inline credentials"
        );
        Ok(bundle)
    }
}
