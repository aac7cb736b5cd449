//! HTTP plumbing.
//!
//! This module provides the reqwest wrapper and the request body shapes
//! used by the management and recognition clients.

mod body;
mod client;

pub use body::Attachment;
pub(crate) use body::RequestBody;
pub(crate) use client::{HttpClient, Response};
