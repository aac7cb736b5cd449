//! craftar - CraftAR visual recognition client library
//!
//! This library provides access to the two CraftAR APIs:
//!
//! - the **management API**, through [`ResourceClient`]: list, get, create,
//!   update and delete collections, items, reference images, tokens and the
//!   other resource kinds;
//! - the **recognition API**, through [`RecognitionClient`]: submit a query
//!   image and receive the matching items.
//!
//! Both clients take an immutable [`Config`] at construction and issue
//! exactly one request per call.
//!
//! # Example
//!
//! ```no_run
//! use craftar::{Config, NewItem, Pagination, ResourceClient};
//!
//! # async fn example() -> Result<(), craftar::Error> {
//! let client = ResourceClient::new(Config::default(), "my-api-key")?;
//!
//! for collection in client.list_collections(Pagination::default()).await? {
//!     println!("{:?}", collection.get_str("name"));
//! }
//!
//! if let Some(collection) = client.create_collection("posters").await? {
//!     println!("created {:?}", collection.uuid());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod imaging;
pub mod management;
pub mod recognition;
pub mod resource;
pub mod types;

// Re-export primary types at crate root for convenience
pub use client::ResourceClient;
pub use config::{Config, ServiceUrl};
pub use error::Error;
pub use http::Attachment;
pub use imaging::ImageOptions;
pub use management::{ItemChanges, NewItem};
pub use recognition::{RecognitionClient, SearchOptions};
pub use resource::{Payload, ResourceRecord};
pub use types::{
    ApiSurface, Filter, Identifier, ImageDescriptor, Pagination, RelationLink, ResourceKind,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
