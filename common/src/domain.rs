//! # Analysis Target
//!
//! A [`Domain`] is the only input an analysis accepts. It can only be built
//! through [`validate`], so holding one means the name is non-empty, at most
//! [`MAX_DOMAIN_LEN`] characters long and shaped like a public hostname:
//!
//! * labels of ASCII letters, digits and hyphens, at most 63 characters,
//! * no hyphen at the start or end of a label,
//! * a final, purely alphabetic label of at least two characters (`.com`, `.io`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MAX_DOMAIN_LEN: usize = 253;

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("domain pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("domain cannot be empty")]
    Empty,
    #[error("domain is {0} characters long, the maximum is {MAX_DOMAIN_LEN}")]
    TooLong(usize),
    #[error("invalid domain format: {0}")]
    Malformed(String),
}

/// Checks `domain` against the hostname rules, first failing rule wins.
pub fn validate(domain: &str) -> Result<(), ValidationError> {
    if domain.is_empty() {
        return Err(ValidationError::Empty);
    }

    if domain.len() > MAX_DOMAIN_LEN {
        return Err(ValidationError::TooLong(domain.len()));
    }

    if !DOMAIN_RE.is_match(domain) {
        return Err(ValidationError::Malformed(domain.to_string()));
    }

    Ok(())
}

/// A hostname that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    pub fn parse(domain: &str) -> Result<Self, ValidationError> {
        validate(domain)?;
        Ok(Self(domain.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a name reported by the remote service refers to this domain.
    ///
    /// Hostnames are case-insensitive and the service may echo them back in
    /// a different case than they were requested in.
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl FromStr for Domain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
