//! File-backed credential source
//!
//! Reads UTF-8 text files with one credential record per line. Blank lines
//! and lines starting with `#` are ignored. A missing or unreadable file is
//! a load failure, never a silently empty bundle.

use super::{build_bundle, decode_token_lines, decode_user_lines, CredentialSource};
use crate::credentials::records::CredentialBundle;
use crate::utils::error::{GateError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source reading user and/or token records from files on disk
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    passwords_file: Option<PathBuf>,
    tokens_file: Option<PathBuf>,
}

impl FileSource {
    /// Create a source reading from the given files
    ///
    /// Either file may be omitted when a scope only uses one record kind.
    pub fn new(passwords_file: Option<PathBuf>, tokens_file: Option<PathBuf>) -> Self {
        Self {
            passwords_file,
            tokens_file,
        }
    }

    /// Convenience constructor for a passwords-only source
    pub fn passwords<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(Some(path.into()), None)
    }

    /// Convenience constructor for a tokens-only source
    pub fn tokens<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(None, Some(path.into()))
    }
}

impl CredentialSource for FileSource {
    fn load(&self) -> Result<CredentialBundle> {
        let users = match &self.passwords_file {
            Some(path) => {
                let lines = read_credential_lines(path)?;
                decode_user_lines(
                    &format!("passwords file '{}'", path.display()),
                    lines.iter().map(String::as_str),
                )?
            }
            None => Vec::new(),
        };

        let tokens = match &self.tokens_file {
            Some(path) => {
                let lines = read_credential_lines(path)?;
                decode_token_lines(
                    &format!("tokens file '{}'", path.display()),
                    lines.iter().map(String::as_str),
                )?
            }
            None => Vec::new(),
        };

        let bundle = build_bundle("file credentials", users, tokens)?;
        debug!(
            users = bundle.user_count(),
            tokens = bundle.token_count(),
            "loaded file credentials"
        );
        Ok(bundle)
    }
}

/// Read a credential file into its meaningful lines
fn read_credential_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        GateError::SourceLoad(format!(
            "cannot read credentials file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
