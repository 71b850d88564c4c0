//! Environment-backed credential source
//!
//! Selects variables named `<PREFIX>_<N>` (N a positive integer, consecutive
//! or sparse) from an environment snapshot and decodes each value as one
//! credential line. Unrelated variables are ignored, so the source tolerates
//! arbitrary process environments; a snapshot with no matching keys yields an
//! empty bundle, not an error.

use super::{build_bundle, decode_token_lines, decode_user_lines, CredentialSource};
use crate::credentials::records::CredentialBundle;
use crate::envvar::{EnvironmentSupplier, SteeredEnvironment};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Source reading user and/or token records from environment variables
#[derive(Clone)]
pub struct EnvironmentSource {
    users_prefix: Option<String>,
    tokens_prefix: Option<String>,
    supplier: Arc<dyn EnvironmentSupplier>,
}

impl EnvironmentSource {
    /// Create a source backed by the steerable default supplier
    pub fn new(users_prefix: Option<String>, tokens_prefix: Option<String>) -> Self {
        Self::with_supplier(users_prefix, tokens_prefix, Arc::new(SteeredEnvironment))
    }

    /// Create a source backed by an explicit supplier
    pub fn with_supplier(
        users_prefix: Option<String>,
        tokens_prefix: Option<String>,
        supplier: Arc<dyn EnvironmentSupplier>,
    ) -> Self {
        Self {
            users_prefix,
            tokens_prefix,
            supplier,
        }
    }
}

impl CredentialSource for EnvironmentSource {
    fn load(&self) -> Result<CredentialBundle> {
        let snapshot = self.supplier.snapshot()?;

        let users = match &self.users_prefix {
            Some(prefix) => {
                let lines = indexed_values(&snapshot, prefix);
                decode_user_lines(
                    &format!("environment variables '{}_*'", prefix),
                    lines.iter().map(String::as_str),
                )?
            }
            None => Vec::new(),
        };

        let tokens = match &self.tokens_prefix {
            Some(prefix) => {
                let lines = indexed_values(&snapshot, prefix);
                decode_token_lines(
                    &format!("environment variables '{}_*'", prefix),
                    lines.iter().map(String::as_str),
                )?
            }
            None => Vec::new(),
        };

        let bundle = build_bundle("environment credentials", users, tokens)?;
        debug!(
            users = bundle.user_count(),
            tokens = bundle.token_count(),
            "loaded environment credentials"
        );
        Ok(bundle)
    }
}

/// Collect values of `<prefix>_<N>` keys in ascending index order
fn indexed_values(snapshot: &HashMap<String, String>, prefix: &str) -> Vec<String> {
    let mut indexed: Vec<(u32, &String)> = snapshot
        .iter()
        .filter_map(|(key, value)| {
            let suffix = key.strip_prefix(prefix)?.strip_prefix('_')?;
            let index: u32 = suffix.parse().ok()?;
            (index > 0).then_some((index, value))
        })
        .collect();

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, value)| value.clone()).collect()
}
