//! Management API client.

use std::num::NonZeroU32;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::Error;
use crate::http::{Attachment, HttpClient, RequestBody, Response};
use crate::resource::{Payload, ResourceRecord, UrlBuilder, normalize, validate};
use crate::types::{Filter, Identifier, Pagination, RelationLink, ResourceKind};

/// Envelope field holding the records of a list response.
const OBJECTS: &str = "objects";

/// Client for the management API.
///
/// Each operation validates its input, issues exactly one request and
/// normalizes what comes back. The client holds no mutable state, so it can
/// be cloned and shared freely.
///
/// # Example
///
/// ```no_run
/// use craftar::{Config, Filter, Identifier, Pagination, ResourceClient, ResourceKind};
///
/// # async fn example() -> Result<(), craftar::Error> {
/// let client = ResourceClient::new(Config::default(), "my-api-key")?;
///
/// let collection = Identifier::new(ResourceKind::Collection, "0123456789abcdef0123456789abcdef")?;
/// let items = client
///     .list(ResourceKind::Item, Pagination::default(), Some(&Filter::collection(collection)))
///     .await?;
///
/// for item in items {
///     println!("{:?}: {:?}", item.uuid(), item.get_str("name"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ResourceClient {
    http: HttpClient,
    config: Config,
    api_key: String,
}

impl ResourceClient {
    /// Create a client for the management API.
    pub fn new(config: Config, api_key: impl Into<String>) -> Result<Self, Error> {
        let http = HttpClient::new(&config.user_agent)?;
        Ok(Self {
            http,
            config,
            api_key: api_key.into(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Wire link to a resource, for use in request bodies.
    pub fn relation_link(&self, kind: ResourceKind, id: &Identifier) -> RelationLink {
        RelationLink::new(&self.config.management_api_version, kind, id)
    }

    fn urls(&self) -> UrlBuilder<'_> {
        UrlBuilder::new(
            &self.config.management_host,
            &self.config.management_api_version,
            &self.api_key,
        )
    }

    /// List one page of resources, optionally restricted to a parent.
    #[instrument(skip(self, filter), fields(%kind))]
    pub async fn list(
        &self,
        kind: ResourceKind,
        pagination: Pagination,
        filter: Option<&Filter>,
    ) -> Result<Vec<ResourceRecord>, Error> {
        validate::kind(self.config.surface, kind)?;
        debug!(?pagination, "Listing resources");

        let url = self.urls().build(kind, None, Some(&pagination), filter);
        let response = self.http.send(Method::GET, &url, RequestBody::Empty).await?;
        let status = response.code();

        let objects = match response.body {
            Some(Value::Object(mut envelope)) => envelope.remove(OBJECTS),
            _ => None,
        };

        let Some(Value::Array(objects)) = objects else {
            return Err(Error::UnexpectedResponse {
                status,
                reason: format!("list response has no '{OBJECTS}' array"),
            });
        };

        objects
            .into_iter()
            .map(|object| into_record(status, object))
            .collect()
    }

    /// List every resource of a kind, one page of `page_size` at a time.
    ///
    /// Stops at the first page shorter than `page_size`. Fails with
    /// `UnexpectedResponse` when a page exceeds the limit, repeats the first
    /// page, or the offset would overflow.
    #[instrument(skip(self, filter), fields(%kind))]
    pub async fn list_all(
        &self,
        kind: ResourceKind,
        page_size: NonZeroU32,
        filter: Option<&Filter>,
    ) -> Result<Vec<ResourceRecord>, Error> {
        let limit = page_size.get() as usize;
        let mut records = Vec::new();
        let mut offset = 0u32;

        loop {
            let page = self
                .list(kind, Pagination::page(page_size, offset), filter)
                .await?;
            let fetched = page.len();

            if fetched > limit {
                return Err(Error::UnexpectedResponse {
                    status: 200,
                    reason: format!(
                        "page at offset {offset} has {fetched} records, limit was {limit}"
                    ),
                });
            }

            if let (Some(first), Some(seen)) = (page.first(), records.first())
                && offset > 0
                && first == seen
            {
                return Err(Error::UnexpectedResponse {
                    status: 200,
                    reason: format!("page at offset {offset} repeats the first page"),
                });
            }

            records.extend(page);

            if fetched < limit {
                debug!(total = records.len(), "Reached last page");
                return Ok(records);
            }

            offset = offset.checked_add(page_size.get()).ok_or_else(|| {
                Error::UnexpectedResponse {
                    status: 200,
                    reason: "pagination offset overflowed".to_string(),
                }
            })?;
        }
    }

    /// Fetch a single resource.
    #[instrument(skip(self), fields(%kind, %id))]
    pub async fn get(&self, kind: ResourceKind, id: &Identifier) -> Result<ResourceRecord, Error> {
        validate::request(self.config.surface, kind, Some(id.as_str()), None)?;
        debug!("Getting resource");

        let url = self.urls().build(kind, Some(id), None, None);
        let response = self.http.send(Method::GET, &url, RequestBody::Empty).await?;
        let status = response.code();

        match response.body {
            Some(object) => into_record(status, object),
            None => Err(Error::UnexpectedResponse {
                status,
                reason: "empty body".to_string(),
            }),
        }
    }

    /// Create a resource from a JSON payload.
    ///
    /// Returns `None` when the service answers with anything but
    /// `201 Created`; the resource should then be treated as not created.
    #[instrument(skip(self, payload), fields(%kind))]
    pub async fn create(
        &self,
        kind: ResourceKind,
        payload: &Payload,
    ) -> Result<Option<ResourceRecord>, Error> {
        validate::request(self.config.surface, kind, None, Some(payload))?;
        debug!("Creating resource");

        let url = self.urls().build(kind, None, None, None);
        let response = self
            .http
            .send(Method::POST, &url, RequestBody::Json(payload))
            .await?;

        created(response)
    }

    /// Create a resource with an attached file.
    ///
    /// `form` is sent as form fields next to the file.
    #[instrument(skip(self, form, attachment), fields(%kind, file = attachment.file.file_name()))]
    pub async fn create_multipart(
        &self,
        kind: ResourceKind,
        form: &Payload,
        attachment: &Attachment,
    ) -> Result<Option<ResourceRecord>, Error> {
        validate::request(self.config.surface, kind, None, Some(form))?;
        debug!(len = attachment.file.len(), "Creating resource with attachment");

        let url = self.urls().build(kind, None, None, None);
        let response = self
            .http
            .send(Method::POST, &url, RequestBody::Multipart(form, attachment))
            .await?;

        created(response)
    }

    /// Update a resource. Returns `true` iff the service accepted it (202).
    #[instrument(skip(self, payload), fields(%kind, %id))]
    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &Identifier,
        payload: &Payload,
    ) -> Result<bool, Error> {
        validate::request(self.config.surface, kind, Some(id.as_str()), Some(payload))?;
        debug!("Updating resource");

        let url = self.urls().build(kind, Some(id), None, None);
        let response = self
            .http
            .send(Method::PUT, &url, RequestBody::Json(payload))
            .await?;

        Ok(response.status == StatusCode::ACCEPTED)
    }

    /// Replace a resource's attached file. Returns `true` iff accepted (202).
    #[instrument(skip(self, form, attachment), fields(%kind, %id))]
    pub async fn update_multipart(
        &self,
        kind: ResourceKind,
        id: &Identifier,
        form: &Payload,
        attachment: &Attachment,
    ) -> Result<bool, Error> {
        validate::request(self.config.surface, kind, Some(id.as_str()), Some(form))?;
        debug!(len = attachment.file.len(), "Updating resource attachment");

        let url = self.urls().build(kind, Some(id), None, None);
        let response = self
            .http
            .send(Method::PUT, &url, RequestBody::Multipart(form, attachment))
            .await?;

        Ok(response.status == StatusCode::ACCEPTED)
    }

    /// Delete a resource. Returns `true` iff the service answered 204.
    #[instrument(skip(self), fields(%kind, %id))]
    pub async fn delete(&self, kind: ResourceKind, id: &Identifier) -> Result<bool, Error> {
        validate::request(self.config.surface, kind, Some(id.as_str()), None)?;
        debug!("Deleting resource");

        let url = self.urls().build(kind, Some(id), None, None);
        let response = self
            .http
            .send(Method::DELETE, &url, RequestBody::Empty)
            .await?;

        Ok(response.status == StatusCode::NO_CONTENT)
    }
}

fn into_record(status: u16, object: Value) -> Result<ResourceRecord, Error> {
    match object {
        Value::Object(map) => Ok(normalize(map)),
        other => Err(Error::UnexpectedResponse {
            status,
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

fn created(response: Response) -> Result<Option<ResourceRecord>, Error> {
    if response.status != StatusCode::CREATED {
        debug!(status = response.code(), "Create not acknowledged with 201");
        return Ok(None);
    }

    let status = response.code();
    match response.body {
        Some(object) => into_record(status, object).map(Some),
        None => Err(Error::UnexpectedResponse {
            status,
            reason: "empty body".to_string(),
        }),
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("host", &self.config.management_host)
            .field("surface", &self.config.surface)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
