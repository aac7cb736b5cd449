//! Core craftar types.
//!
//! These types enforce the service's invariants at construction time, so a
//! malformed identifier or an unknown kind never reaches the network.

mod identifier;
pub mod image;
mod kind;
mod query;
mod relation;

pub use identifier::Identifier;
pub use self::image::ImageDescriptor;
pub use kind::{ApiSurface, ResourceKind};
pub use query::{Filter, Pagination};
pub use relation::RelationLink;
