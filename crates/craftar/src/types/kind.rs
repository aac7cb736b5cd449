//! Resource kinds and API surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A category of entity managed by the service.
///
/// The wire name of each kind is the path segment used in resource URLs
/// (`/api/{version}/{kind}/`). Parsing is exact-match: `"Item"` is not a
/// kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Collection,
    Item,
    Image,
    Token,
    Tag,
    App,
    Version,
    Bundle,
    Media,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Collection,
        ResourceKind::Item,
        ResourceKind::Image,
        ResourceKind::Token,
        ResourceKind::Tag,
        ResourceKind::App,
        ResourceKind::Version,
        ResourceKind::Bundle,
        ResourceKind::Media,
    ];

    /// Returns the wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Collection => "collection",
            ResourceKind::Item => "item",
            ResourceKind::Image => "image",
            ResourceKind::Token => "token",
            ResourceKind::Tag => "tag",
            ResourceKind::App => "app",
            ResourceKind::Version => "version",
            ResourceKind::Bundle => "bundle",
            ResourceKind::Media => "media",
        }
    }

    /// Number of hex characters in an identifier of this kind.
    pub fn identifier_len(self) -> usize {
        match self {
            ResourceKind::Token => 16,
            _ => 32,
        }
    }

    /// Query parameter that restricts a listing of this kind to one parent.
    ///
    /// Kinds without an entry cannot be filtered.
    pub fn filter_param(self) -> Option<&'static str> {
        match self {
            ResourceKind::Item | ResourceKind::Token => Some("collection__uuid"),
            ResourceKind::Image => Some("item__uuid"),
            ResourceKind::Collection
            | ResourceKind::Tag
            | ResourceKind::App
            | ResourceKind::Version
            | ResourceKind::Bundle
            | ResourceKind::Media => None,
        }
    }

    /// The kind a filter on this kind refers to.
    pub fn filter_parent(self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Item | ResourceKind::Token => Some(ResourceKind::Collection),
            ResourceKind::Image => Some(ResourceKind::Item),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Kind {
                    kind: s.to_string(),
                    surface: "known".to_string(),
                }
                .into()
            })
    }
}

/// A generation of the management API, each exposing its own set of kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSurface {
    /// Current API: every kind.
    #[default]
    Craftar,
    /// Legacy API: collections, items, images, tokens and media.
    Catchoom,
}

impl ApiSurface {
    /// Returns the kinds this surface exposes.
    pub fn kinds(self) -> &'static [ResourceKind] {
        const CATCHOOM: &[ResourceKind] = &[
            ResourceKind::Collection,
            ResourceKind::Item,
            ResourceKind::Image,
            ResourceKind::Token,
            ResourceKind::Media,
        ];

        match self {
            ApiSurface::Craftar => &ResourceKind::ALL,
            ApiSurface::Catchoom => CATCHOOM,
        }
    }

    pub fn supports(self, kind: ResourceKind) -> bool {
        self.kinds().contains(&kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiSurface::Craftar => "craftar",
            ApiSurface::Catchoom => "catchoom",
        }
    }
}

impl fmt::Display for ApiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Item".parse::<ResourceKind>().is_err());
        assert!("ITEM".parse::<ResourceKind>().is_err());
        assert!("items".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn token_identifiers_are_shorter() {
        assert_eq!(ResourceKind::Token.identifier_len(), 16);
        assert_eq!(ResourceKind::Collection.identifier_len(), 32);
        assert_eq!(ResourceKind::Media.identifier_len(), 32);
    }

    #[test]
    fn filter_table() {
        assert_eq!(ResourceKind::Item.filter_param(), Some("collection__uuid"));
        assert_eq!(ResourceKind::Token.filter_param(), Some("collection__uuid"));
        assert_eq!(ResourceKind::Image.filter_param(), Some("item__uuid"));
        assert_eq!(ResourceKind::Collection.filter_param(), None);
        assert_eq!(ResourceKind::Tag.filter_param(), None);
    }

    #[test]
    fn legacy_surface_is_a_subset() {
        assert!(ApiSurface::Catchoom.supports(ResourceKind::Token));
        assert!(ApiSurface::Catchoom.supports(ResourceKind::Media));
        assert!(!ApiSurface::Catchoom.supports(ResourceKind::App));
        assert!(!ApiSurface::Catchoom.supports(ResourceKind::Bundle));
        for kind in ResourceKind::ALL {
            assert!(ApiSurface::Craftar.supports(kind));
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ResourceKind::Bundle).unwrap();
        assert_eq!(json, "\"bundle\"");
        let surface: ApiSurface = serde_json::from_str("\"catchoom\"").unwrap();
        assert_eq!(surface, ApiSurface::Catchoom);
    }
}
