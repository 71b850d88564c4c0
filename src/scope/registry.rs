//! Scope registry
//!
//! A scope binds a path pattern to a credential bundle and an ordered list
//! of enabled schemes. The registry is assembled once at startup and is
//! immutable afterwards, so request-time matching needs no locking.

use super::pattern::PathPattern;
use crate::credentials::records::CredentialBundle;
use crate::methods::SchemeKind;
use crate::utils::error::{GateError, Result};
use std::sync::Arc;
use tracing::warn;

/// One authentication policy: pattern + schemes + bundle
#[derive(Debug, Clone)]
pub struct Scope {
    pattern: PathPattern,
    schemes: Vec<SchemeKind>,
    bundle: Arc<CredentialBundle>,
}

impl Scope {
    /// The scope's path pattern
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Enabled schemes, in evaluation order
    pub fn schemes(&self) -> &[SchemeKind] {
        &self.schemes
    }

    /// The scope's credential bundle
    pub fn bundle(&self) -> &CredentialBundle {
        &self.bundle
    }
}

/// Immutable, ordered collection of scopes
#[derive(Debug, Clone, Default)]
pub struct ScopeRegistry {
    scopes: Vec<Scope>,
}

impl ScopeRegistry {
    /// Start assembling a registry
    pub fn builder() -> ScopeRegistryBuilder {
        ScopeRegistryBuilder::default()
    }

    /// Find the scope for a request path
    ///
    /// When more than one pattern matches, the most specific one wins and
    /// the ambiguity is logged; ties go to the earliest registered scope.
    pub fn match_path(&self, path: &str) -> Option<&Scope> {
        let matching: Vec<&Scope> = self
            .scopes
            .iter()
            .filter(|scope| scope.pattern.matches(path))
            .collect();

        if matching.len() > 1 {
            let patterns: Vec<&str> = matching.iter().map(|s| s.pattern.as_str()).collect();
            warn!(path, ?patterns, "multiple scopes match; using the most specific pattern");
        }

        matching.into_iter().reduce(|best, candidate| {
            if candidate.pattern.specificity() > best.pattern.specificity() {
                candidate
            } else {
                best
            }
        })
    }

    /// Number of registered scopes
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether the registry holds no scopes
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Builder collecting scopes before the registry is frozen
#[derive(Debug, Default)]
pub struct ScopeRegistryBuilder {
    scopes: Vec<Scope>,
}

impl ScopeRegistryBuilder {
    /// Register one scope
    ///
    /// The schemes list is evaluated in the given order at request time.
    pub fn register(
        mut self,
        pattern: &str,
        schemes: Vec<SchemeKind>,
        bundle: Arc<CredentialBundle>,
    ) -> Result<Self> {
        let pattern = PathPattern::parse(pattern)?;

        if schemes.is_empty() {
            return Err(GateError::Config(format!(
                "scope '{}' enables no authentication schemes",
                pattern
            )));
        }

        if self.scopes.iter().any(|scope| scope.pattern == pattern) {
            return Err(GateError::Config(format!(
                "scope pattern '{}' registered more than once",
                pattern
            )));
        }

        self.scopes.push(Scope {
            pattern,
            schemes,
            bundle,
        });
        Ok(self)
    }

    /// Freeze the registry
    pub fn build(self) -> ScopeRegistry {
        ScopeRegistry {
            scopes: self.scopes,
        }
    }
}
