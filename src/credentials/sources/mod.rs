//! Credential sources
//!
//! Three interchangeable sources resolve credentials into an immutable
//! [`CredentialBundle`]: inline lines supplied directly in configuration,
//! a file on disk, and environment variables. Loading is deterministic and
//! all-or-nothing; a bundle is never partially populated.

pub mod environment;
pub mod file;
pub mod hardcoded;

pub use environment::EnvironmentSource;
pub use file::FileSource;
pub use hardcoded::HardcodedSource;

use crate::credentials::codec;
use crate::credentials::records::{CredentialBundle, TokenRecord, UserRecord};
use crate::utils::error::{GateError, Result};

/// Common contract of all credential sources
pub trait CredentialSource {
    /// Resolve the source into an immutable credential bundle
    ///
    /// Fails with [`GateError::SourceLoad`], [`GateError::MalformedLine`] or
    /// [`GateError::DuplicateCredential`] rather than partially populating
    /// the bundle.
    fn load(&self) -> Result<CredentialBundle>;
}

/// Decode user lines, annotating failures with their origin and position
pub(crate) fn decode_user_lines<'a, I>(origin: &str, lines: I) -> Result<Vec<UserRecord>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| codec::decode_user(line).map_err(|e| annotate(e, origin, idx)))
        .collect()
}

/// Decode token lines, annotating failures with their origin and position
pub(crate) fn decode_token_lines<'a, I>(origin: &str, lines: I) -> Result<Vec<TokenRecord>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| codec::decode_token(line).map_err(|e| annotate(e, origin, idx)))
        .collect()
}

/// Build the bundle, annotating duplicate-key failures with their origin
pub(crate) fn build_bundle(
    origin: &str,
    users: Vec<UserRecord>,
    tokens: Vec<TokenRecord>,
) -> Result<CredentialBundle> {
    CredentialBundle::from_records(users, tokens).map_err(|e| match e {
        GateError::DuplicateCredential(msg) => {
            GateError::DuplicateCredential(format!("{}: {}", origin, msg))
        }
        other => other,
    })
}

fn annotate(err: GateError, origin: &str, idx: usize) -> GateError {
    match err {
        GateError::MalformedLine(msg) => {
            GateError::MalformedLine(format!("{}, record {}: {}", origin, idx + 1, msg))
        }
        other => other,
    }
}
