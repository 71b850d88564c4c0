//! Line codec for the textual credential format
//!
//! All three credential sources share one textual format, one record per
//! line, in two shapes:
//!
//! ```text
//! username:password ROLE[,ROLE...]
//! token principal ROLE[,ROLE...]
//! ```
//!
//! Decoding and encoding are pure functions and exact inverses of each other.

use crate::credentials::records::{TokenRecord, UserRecord};
use crate::utils::error::{GateError, Result};
use std::collections::BTreeSet;

/// Decode a single user line of the form `username:password ROLE[,ROLE...]`
pub fn decode_user(line: &str) -> Result<UserRecord> {
    let line = line.trim();
    let (username, rest) = line.split_once(':').ok_or_else(|| {
        GateError::MalformedLine("user line is missing the ':' separator".to_string())
    })?;

    if username.is_empty() {
        return Err(GateError::MalformedLine(
            "user line has an empty username".to_string(),
        ));
    }

    let (password, roles_part) = rest.split_once(char::is_whitespace).ok_or_else(|| {
        GateError::MalformedLine("user line is missing the role list".to_string())
    })?;

    Ok(UserRecord {
        username: username.to_string(),
        password: password.to_string(),
        roles: decode_roles(roles_part)?,
    })
}

/// Decode a single token line of the form `token principal ROLE[,ROLE...]`
pub fn decode_token(line: &str) -> Result<TokenRecord> {
    let line = line.trim();
    let (token, rest) = line.split_once(char::is_whitespace).ok_or_else(|| {
        GateError::MalformedLine("token line is missing the principal".to_string())
    })?;

    if token.is_empty() {
        return Err(GateError::MalformedLine(
            "token line has an empty token value".to_string(),
        ));
    }

    let rest = rest.trim_start();
    let (principal, roles_part) = rest.split_once(char::is_whitespace).ok_or_else(|| {
        GateError::MalformedLine("token line is missing the role list".to_string())
    })?;

    Ok(TokenRecord {
        token: token.to_string(),
        principal: principal.to_string(),
        roles: decode_roles(roles_part)?,
    })
}

/// Serialize a user record back into its line form
pub fn encode_user(record: &UserRecord) -> String {
    format!(
        "{}:{} {}",
        record.username,
        record.password,
        encode_roles(&record.roles)
    )
}

/// Serialize a token record back into its line form
pub fn encode_token(record: &TokenRecord) -> String {
    format!(
        "{} {} {}",
        record.token,
        record.principal,
        encode_roles(&record.roles)
    )
}

fn decode_roles(part: &str) -> Result<BTreeSet<String>> {
    let part = part.trim();
    if part.is_empty() {
        return Err(GateError::MalformedLine(
            "role list is absent".to_string(),
        ));
    }

    let mut roles = BTreeSet::new();
    for role in part.split(',') {
        let role = role.trim();
        if role.is_empty() {
            return Err(GateError::MalformedLine(
                "role list contains an empty role".to_string(),
            ));
        }
        if role.contains(char::is_whitespace) {
            return Err(GateError::MalformedLine(format!(
                "role '{}' contains whitespace",
                role
            )));
        }
        roles.insert(role.to_string());
    }
    Ok(roles)
}

fn encode_roles(roles: &BTreeSet<String>) -> String {
    roles.iter().cloned().collect::<Vec<_>>().join(",")
}
