//! Resource identifier type.

use serde::{Serialize, Serializer};
use std::fmt;

use super::ResourceKind;
use crate::error::Error;
use crate::resource::validate;

/// A validated resource identifier.
///
/// Identifiers are opaque hex handles: 16 characters for tokens and 32 for
/// every other kind, case-insensitive. The original casing is preserved.
///
/// # Example
///
/// ```
/// use craftar::{Identifier, ResourceKind};
///
/// let id = Identifier::new(ResourceKind::Token, "0123456789abcdef").unwrap();
/// assert_eq!(id.as_str(), "0123456789abcdef");
///
/// assert!(Identifier::new(ResourceKind::Item, "0123456789abcdef").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Create a new identifier for the given kind, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError::Identifier` if the string is not exactly
    /// `kind.identifier_len()` hex characters.
    pub fn new(kind: ResourceKind, s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        validate::identifier(kind, &s)?;
        Ok(Self(s))
    }

    /// Returns the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
