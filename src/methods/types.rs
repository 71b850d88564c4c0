//! Authentication method types

use crate::credentials::records::Principal;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two supported HTTP authentication schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// HTTP Basic authentication (username/password)
    Basic,
    /// Bearer token authentication
    Bearer,
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeKind::Basic => write!(f, "basic"),
            SchemeKind::Bearer => write!(f, "bearer"),
        }
    }
}

/// A credential extracted from an inbound request
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Username/password pair from an `Authorization: Basic` header
    Basic {
        /// Presented username
        username: String,
        /// Presented cleartext password
        password: String,
    },
    /// Opaque value from an `Authorization: Bearer` header
    Bearer(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credential::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

impl Credential {
    /// Extract a Basic credential from an `Authorization` header value
    ///
    /// Returns `None` when the header carries a different scheme or the
    /// payload is not valid base64-encoded `username:password` material;
    /// absence of a credential is not a failure.
    pub fn basic_from_header(header: &str) -> Option<Self> {
        let payload = strip_scheme(header, "Basic")?;
        let decoded = STANDARD.decode(payload.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Credential::Basic {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Extract a Bearer credential from an `Authorization` header value
    pub fn bearer_from_header(header: &str) -> Option<Self> {
        let value = strip_scheme(header, "Bearer")?.trim();
        (!value.is_empty()).then(|| Credential::Bearer(value.to_string()))
    }

    /// Extract the credential for one scheme, if the header offers it
    pub fn for_scheme(header: &str, scheme: SchemeKind) -> Option<Self> {
        match scheme {
            SchemeKind::Basic => Self::basic_from_header(header),
            SchemeKind::Bearer => Self::bearer_from_header(header),
        }
    }
}

/// Scheme names are case-insensitive per RFC 7235
fn strip_scheme<'a>(header: &'a str, scheme: &str) -> Option<&'a str> {
    let (name, rest) = header.trim_start().split_once(' ')?;
    name.eq_ignore_ascii_case(scheme).then_some(rest)
}

/// Outcome of one authentication attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// The request authenticated as the given principal
    Authenticated(Principal),
    /// No configured scheme accepted the request's credentials
    Unauthenticated,
}

impl AuthenticationOutcome {
    /// Whether the attempt produced a principal
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticationOutcome::Authenticated(_))
    }

    /// The authenticated principal, if any
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthenticationOutcome::Authenticated(principal) => Some(principal),
            AuthenticationOutcome::Unauthenticated => None,
        }
    }

    /// Consume the outcome, yielding the principal if authenticated
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            AuthenticationOutcome::Authenticated(principal) => Some(principal),
            AuthenticationOutcome::Unauthenticated => None,
        }
    }
}
