//! Listing parameters: pagination and parent filters.

use std::num::NonZeroU32;

use super::{Identifier, ResourceKind};

/// Page selection for list operations.
///
/// `None` leaves the value to the server default. A present offset is sent
/// even when it is zero; a limit of zero cannot be expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<NonZeroU32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new(limit: Option<NonZeroU32>, offset: Option<u32>) -> Self {
        Self { limit, offset }
    }

    /// A page of `limit` records starting at `offset`.
    pub fn page(limit: NonZeroU32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// Restricts a listing to the children of one parent resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub parent_kind: ResourceKind,
    pub parent: Identifier,
}

impl Filter {
    pub fn new(parent_kind: ResourceKind, parent: Identifier) -> Self {
        Self {
            parent_kind,
            parent,
        }
    }

    /// Filter on a parent collection.
    pub fn collection(parent: Identifier) -> Self {
        Self::new(ResourceKind::Collection, parent)
    }

    /// Filter on a parent item.
    pub fn item(parent: Identifier) -> Self {
        Self::new(ResourceKind::Item, parent)
    }
}
