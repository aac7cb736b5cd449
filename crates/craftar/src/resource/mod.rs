//! The resource-access core: validation, URL construction and response
//! normalization shared by every management operation.

mod record;
mod endpoint;
pub mod validate;

pub use record::{PLURAL_RELATIONS, ResourceRecord, SELF_LINK, SINGULAR_RELATIONS, normalize};
pub use endpoint::UrlBuilder;

/// Field map sent as the body of a create or update request.
pub type Payload = serde_json::Map<String, serde_json::Value>;
