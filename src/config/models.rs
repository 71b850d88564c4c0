//! Configuration data models
//!
//! Explicit configuration objects for the authentication policies: one
//! [`ScopeConfig`] per protected path pattern, each naming the credential
//! source for its user records and/or token records and, optionally, the
//! scheme evaluation order.

use crate::methods::SchemeKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration: the full list of authentication scopes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthGateConfig {
    /// Configured scopes, in registration order
    #[serde(default)]
    pub scopes: Vec<ScopeConfig>,
}

/// Configuration of one authentication scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Path pattern the scope protects, e.g. `/file-user-info/**`
    pub pattern: String,
    /// Scheme evaluation order; empty means "Basic then Bearer, restricted
    /// to the record kinds actually configured"
    #[serde(default)]
    pub schemes: Vec<SchemeKind>,
    /// Source of user records for Basic authentication
    #[serde(default)]
    pub users: Option<SourceConfig>,
    /// Source of token records for Bearer authentication
    #[serde(default)]
    pub tokens: Option<SourceConfig>,
}

impl ScopeConfig {
    /// Scope with no sources yet; combine with the `with_*` helpers
    pub fn new<P: Into<String>>(pattern: P) -> Self {
        Self {
            pattern: pattern.into(),
            schemes: Vec::new(),
            users: None,
            tokens: None,
        }
    }

    /// Set the user-record source
    pub fn with_users(mut self, source: SourceConfig) -> Self {
        self.users = Some(source);
        self
    }

    /// Set the token-record source
    pub fn with_tokens(mut self, source: SourceConfig) -> Self {
        self.tokens = Some(source);
        self
    }

    /// Set an explicit scheme evaluation order
    pub fn with_schemes(mut self, schemes: Vec<SchemeKind>) -> Self {
        self.schemes = schemes;
        self
    }

    /// The scheme order the scope will actually evaluate
    ///
    /// An explicit `schemes` list wins; otherwise Basic (when a user source
    /// is configured) is tried before Bearer (when a token source is).
    pub fn effective_schemes(&self) -> Vec<SchemeKind> {
        if !self.schemes.is_empty() {
            return self.schemes.clone();
        }

        let mut schemes = Vec::new();
        if self.users.is_some() {
            schemes.push(SchemeKind::Basic);
        }
        if self.tokens.is_some() {
            schemes.push(SchemeKind::Bearer);
        }
        schemes
    }

    /// Validate one scope configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.pattern.is_empty() {
            return Err("scope pattern must not be empty".to_string());
        }
        if !self.pattern.starts_with('/') {
            return Err(format!("scope pattern '{}' must start with '/'", self.pattern));
        }

        if self.users.is_none() && self.tokens.is_none() {
            return Err(format!(
                "scope '{}' configures no credential source",
                self.pattern
            ));
        }

        for scheme in &self.schemes {
            let configured = match scheme {
                SchemeKind::Basic => self.users.is_some(),
                SchemeKind::Bearer => self.tokens.is_some(),
            };
            if !configured {
                return Err(format!(
                    "scope '{}' enables the {} scheme without a matching credential source",
                    self.pattern, scheme
                ));
            }
        }

        if self.schemes.len()
            != self
                .schemes
                .iter()
                .collect::<std::collections::HashSet<_>>()
                .len()
        {
            return Err(format!(
                "scope '{}' lists a scheme more than once",
                self.pattern
            ));
        }

        if let Some(source) = &self.users {
            source
                .validate()
                .map_err(|e| format!("scope '{}' users: {}", self.pattern, e))?;
        }
        if let Some(source) = &self.tokens {
            source
                .validate()
                .map_err(|e| format!("scope '{}' tokens: {}", self.pattern, e))?;
        }

        Ok(())
    }
}

/// Where one kind of credential record comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Literal credential lines supplied directly in the configuration
    Inline {
        /// Ordered line-formatted records
        lines: Vec<String>,
    },
    /// Credential lines read from a file at startup
    File {
        /// Path of the credentials file
        path: PathBuf,
    },
    /// Credential lines read from `<PREFIX>_<N>` environment variables
    Environment {
        /// Variable name prefix, e.g. `SMS_ENV_USER`
        prefix: String,
    },
}

impl SourceConfig {
    /// Inline source from anything stringish
    pub fn inline<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Inline {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// File-backed source
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self::File { path: path.into() }
    }

    /// Environment-backed source
    pub fn environment<P: Into<String>>(prefix: P) -> Self {
        Self::Environment {
            prefix: prefix.into(),
        }
    }

    /// Validate one source configuration
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SourceConfig::Inline { .. } => Ok(()),
            SourceConfig::File { path } => {
                if path.as_os_str().is_empty() {
                    Err("file source has an empty path".to_string())
                } else {
                    Ok(())
                }
            }
            SourceConfig::Environment { prefix } => {
                if prefix.is_empty() {
                    Err("environment source has an empty prefix".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}
