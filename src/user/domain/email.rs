//! Validated email address type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized email address.
///
/// The value is trimmed and lower-cased so uniqueness checks compare
/// addresses case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyEmail`] when the value is blank and
    /// [`UserDomainError::InvalidEmail`] when it lacks a local part, has more
    /// than one `@`, contains whitespace, or its domain has no dot-separated
    /// label.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UserDomainError::EmptyEmail);
        }

        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let domain_is_dotted = domain
            .split('.')
            .all(|label| !label.is_empty())
            && domain.contains('.');
        let is_valid = !local.is_empty()
            && domain_is_dotted
            && !has_more_parts
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
