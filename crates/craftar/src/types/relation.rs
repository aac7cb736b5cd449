//! Relation link type.

use serde::{Serialize, Serializer};
use std::fmt;

use super::{Identifier, ResourceKind};

/// A reference to another resource as it appears on the wire.
///
/// Format: `/api/{version}/{kind}/{identifier}/`
///
/// Records returned by the client carry bare identifiers instead; links are
/// only built when a request body must point at a parent resource.
///
/// # Example
///
/// ```
/// use craftar::{Identifier, RelationLink, ResourceKind};
///
/// let id = Identifier::new(ResourceKind::Collection, "0123456789abcdef0123456789abcdef").unwrap();
/// let link = RelationLink::new("v0", ResourceKind::Collection, &id);
/// assert_eq!(link.as_str(), "/api/v0/collection/0123456789abcdef0123456789abcdef/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationLink(String);

impl RelationLink {
    pub fn new(api_version: &str, kind: ResourceKind, id: &Identifier) -> Self {
        Self(format!("/api/{}/{}/{}/", api_version, kind, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last non-empty path segment of a link.
    ///
    /// `None` only for a link made entirely of slashes.
    pub fn trailing_segment(uri: &str) -> Option<&str> {
        uri.rsplit('/').find(|segment| !segment.is_empty())
    }
}

impl fmt::Display for RelationLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RelationLink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_segment_ignores_trailing_slash() {
        assert_eq!(
            RelationLink::trailing_segment("/api/v0/item/abc/"),
            Some("abc")
        );
        assert_eq!(RelationLink::trailing_segment("/api/v0/item/abc"), Some("abc"));
        assert_eq!(RelationLink::trailing_segment("abc"), Some("abc"));
        assert_eq!(RelationLink::trailing_segment("///"), None);
    }

    #[test]
    fn link_round_trips_to_identifier() {
        let id = Identifier::new(ResourceKind::Token, "0123456789abcdef").unwrap();
        let link = RelationLink::new("v1", ResourceKind::Token, &id);
        assert_eq!(link.as_str(), "/api/v1/token/0123456789abcdef/");
        assert_eq!(
            RelationLink::trailing_segment(link.as_str()),
            Some(id.as_str())
        );
    }
}
