//! Credential record model
//!
//! Typed representations of the credentials resolved by a source: users for
//! HTTP Basic authentication, tokens for Bearer authentication, and the
//! immutable bundle a source produces from them.

use crate::utils::error::{GateError, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A user credential: username, password and granted roles
///
/// The password may carry an encoding-scheme marker such as `{noop}`; see
/// [`crate::methods::PasswordEncodings`].
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Username, unique within a source
    pub username: String,
    /// Stored password, optionally prefixed with an encoding marker
    pub password: String,
    /// Roles granted to the user
    pub roles: BTreeSet<String>,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// A token credential: opaque bearer value, owning principal and roles
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Bearer token value, unique within a source
    pub token: String,
    /// Principal the token authenticates as
    pub principal: String,
    /// Roles granted to the principal
    pub roles: BTreeSet<String>,
}

impl fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRecord")
            .field("token", &"<redacted>")
            .field("principal", &self.principal)
            .field("roles", &self.roles)
            .finish()
    }
}

/// The authenticated identity returned to the caller
///
/// Created per successful authentication attempt and discarded after the
/// request completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Authenticated name
    pub name: String,
    /// Roles granted to the identity
    pub roles: BTreeSet<String>,
}

impl Principal {
    /// Check whether the principal carries the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Immutable credential set produced by exactly one source
///
/// Built once at startup; never mutated afterwards. Replacing credentials
/// means rebuilding the whole bundle.
#[derive(Debug, Clone, Default)]
pub struct CredentialBundle {
    users: HashMap<String, UserRecord>,
    tokens: HashMap<String, TokenRecord>,
}

impl CredentialBundle {
    /// Build a bundle from decoded records
    ///
    /// Fails with [`GateError::DuplicateCredential`] if two users share a
    /// username or two tokens share a value.
    pub fn from_records(users: Vec<UserRecord>, tokens: Vec<TokenRecord>) -> Result<Self> {
        let mut user_map = HashMap::with_capacity(users.len());
        for user in users {
            if user_map.contains_key(&user.username) {
                return Err(GateError::DuplicateCredential(format!(
                    "user '{}' defined more than once",
                    user.username
                )));
            }
            user_map.insert(user.username.clone(), user);
        }

        let mut token_map = HashMap::with_capacity(tokens.len());
        for token in tokens {
            if token_map.contains_key(&token.token) {
                return Err(GateError::DuplicateCredential(format!(
                    "token for principal '{}' defined more than once",
                    token.principal
                )));
            }
            token_map.insert(token.token.clone(), token);
        }

        Ok(Self {
            users: user_map,
            tokens: token_map,
        })
    }

    /// Combine the user records of one bundle with the token records of another
    ///
    /// Used when a scope draws its user records and its token records from
    /// two separately configured sources.
    pub fn combine(users_part: CredentialBundle, tokens_part: CredentialBundle) -> CredentialBundle {
        CredentialBundle {
            users: users_part.users,
            tokens: tokens_part.tokens,
        }
    }

    /// Look up a user by username
    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// Look up a token record by its bearer value
    pub fn token(&self, value: &str) -> Option<&TokenRecord> {
        self.tokens.get(value)
    }

    /// Number of user records in the bundle
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of token records in the bundle
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the bundle holds no credentials at all
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.tokens.is_empty()
    }
}

/// Build a role set from string-likes, mostly for tests and inline wiring
pub fn roles<I, S>(iter: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    iter.into_iter().map(Into::into).collect()
}
