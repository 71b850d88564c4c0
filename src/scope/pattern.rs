//! Glob-style URL path patterns
//!
//! Patterns are segment-based: literal segments must match exactly, `*`
//! matches exactly one segment, and a trailing `/**` matches the prefix
//! itself or any deeper path. Specificity is the number of literal
//! characters; the registry uses it to pick the most specific of several
//! matching patterns.

use crate::utils::error::{GateError, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard,
}

/// A parsed path pattern such as `/file-user-info/**`
#[derive(Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    deep: bool,
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathPattern({})", self.raw)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PathPattern {
    /// Parse a pattern
    ///
    /// Patterns must be absolute (start with `/`); `**` is only meaningful
    /// as the final segment.
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.starts_with('/') {
            return Err(GateError::Config(format!(
                "path pattern '{}' must start with '/'",
                raw
            )));
        }

        let mut remainder = raw;
        let mut deep = false;
        if let Some(stripped) = remainder.strip_suffix("/**") {
            deep = true;
            remainder = if stripped.is_empty() { "/" } else { stripped };
        }

        let mut segments = Vec::new();
        for part in remainder.split('/').filter(|p| !p.is_empty()) {
            match part {
                "*" => segments.push(Segment::Wildcard),
                "**" => {
                    return Err(GateError::Config(format!(
                        "path pattern '{}' may only use '**' as its final segment",
                        raw
                    )));
                }
                literal => segments.push(Segment::Literal(literal.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            deep,
        })
    }

    /// Whether the pattern matches a request path
    pub fn matches(&self, path: &str) -> bool {
        let path_segments: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        if self.deep {
            if path_segments.len() < self.segments.len() {
                return false;
            }
        } else if path_segments.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(path_segments.iter())
            .all(|(segment, part)| match segment {
                Segment::Literal(literal) => literal == part,
                Segment::Wildcard => true,
            })
    }

    /// Literal character count, used as the most-specific-wins measure
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => literal.len(),
                Segment::Wildcard => 0,
            })
            .sum()
    }

    /// The pattern as originally written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}
