//! Per-resource convenience operations.
//!
//! Each method shapes its arguments into a payload and delegates to one of
//! the primitive [`ResourceClient`] operations. Parent resources are sent as
//! relation links; absent optional fields are left out of the payload.

use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

use crate::client::ResourceClient;
use crate::error::{Error, InvalidInputError};
use crate::http::Attachment;
use crate::resource::{Payload, ResourceRecord};
use crate::types::{Filter, Identifier, ImageDescriptor, Pagination, RelationLink, ResourceKind};

/// Form field carrying an uploaded file.
const FILE_FIELD: &str = "file";

/// A new item within a collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trackable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Fields to change on an existing item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trackable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

fn to_payload<T: Serialize>(value: &T) -> Result<Payload, Error> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(InvalidInputError::Other {
            message: format!("payload must serialize to an object, got {other}"),
        }
        .into()),
        Err(e) => Err(InvalidInputError::Other {
            message: format!("payload could not be serialized: {e}"),
        }
        .into()),
    }
}

fn link_field(key: &str, link: RelationLink) -> Payload {
    let mut payload = Payload::new();
    payload.insert(key.to_string(), json!(link.as_str()));
    payload
}

impl ResourceClient {
    // Collections

    pub async fn list_collections(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<ResourceRecord>, Error> {
        self.list(ResourceKind::Collection, pagination, None).await
    }

    pub async fn get_collection(&self, id: &Identifier) -> Result<ResourceRecord, Error> {
        self.get(ResourceKind::Collection, id).await
    }

    /// Create a collection. Names must be unique per account.
    pub async fn create_collection(&self, name: &str) -> Result<Option<ResourceRecord>, Error> {
        let payload = to_payload(&json!({ "name": name }))?;
        self.create(ResourceKind::Collection, &payload).await
    }

    pub async fn rename_collection(&self, id: &Identifier, name: &str) -> Result<bool, Error> {
        let payload = to_payload(&json!({ "name": name }))?;
        self.update(ResourceKind::Collection, id, &payload).await
    }

    pub async fn delete_collection(&self, id: &Identifier) -> Result<bool, Error> {
        self.delete(ResourceKind::Collection, id).await
    }

    // Items

    pub async fn list_items(
        &self,
        pagination: Pagination,
        collection: Option<&Identifier>,
    ) -> Result<Vec<ResourceRecord>, Error> {
        let filter = collection.cloned().map(Filter::collection);
        self.list(ResourceKind::Item, pagination, filter.as_ref())
            .await
    }

    pub async fn get_item(&self, id: &Identifier) -> Result<ResourceRecord, Error> {
        self.get(ResourceKind::Item, id).await
    }

    pub async fn create_item(
        &self,
        collection: &Identifier,
        item: &NewItem,
    ) -> Result<Option<ResourceRecord>, Error> {
        let mut payload = link_field(
            "collection",
            self.relation_link(ResourceKind::Collection, collection),
        );
        payload.extend(to_payload(item)?);
        self.create(ResourceKind::Item, &payload).await
    }

    /// Update an item. Fails with `EmptyPayload` if no field is set.
    pub async fn update_item(&self, id: &Identifier, changes: &ItemChanges) -> Result<bool, Error> {
        let payload = to_payload(changes)?;
        self.update(ResourceKind::Item, id, &payload).await
    }

    pub async fn delete_item(&self, id: &Identifier) -> Result<bool, Error> {
        self.delete(ResourceKind::Item, id).await
    }

    // Reference images

    pub async fn list_images(
        &self,
        pagination: Pagination,
        item: Option<&Identifier>,
    ) -> Result<Vec<ResourceRecord>, Error> {
        let filter = item.cloned().map(Filter::item);
        self.list(ResourceKind::Image, pagination, filter.as_ref())
            .await
    }

    pub async fn get_image(&self, id: &Identifier) -> Result<ResourceRecord, Error> {
        self.get(ResourceKind::Image, id).await
    }

    /// Upload a reference image for an item.
    pub async fn upload_image(
        &self,
        item: &Identifier,
        image: ImageDescriptor,
    ) -> Result<Option<ResourceRecord>, Error> {
        self.upload(ResourceKind::Image, item, image).await
    }

    /// Upload a reference image read from disk.
    pub async fn upload_image_from_path(
        &self,
        item: &Identifier,
        path: impl AsRef<Path>,
    ) -> Result<Option<ResourceRecord>, Error> {
        let image = ImageDescriptor::from_path(path).await?;
        self.upload_image(item, image).await
    }

    pub async fn delete_image(&self, id: &Identifier) -> Result<bool, Error> {
        self.delete(ResourceKind::Image, id).await
    }

    // Tokens

    pub async fn list_tokens(
        &self,
        pagination: Pagination,
        collection: Option<&Identifier>,
    ) -> Result<Vec<ResourceRecord>, Error> {
        let filter = collection.cloned().map(Filter::collection);
        self.list(ResourceKind::Token, pagination, filter.as_ref())
            .await
    }

    pub async fn create_token(
        &self,
        collection: &Identifier,
    ) -> Result<Option<ResourceRecord>, Error> {
        let payload = link_field(
            "collection",
            self.relation_link(ResourceKind::Collection, collection),
        );
        self.create(ResourceKind::Token, &payload).await
    }

    pub async fn delete_token(&self, token: &Identifier) -> Result<bool, Error> {
        self.delete(ResourceKind::Token, token).await
    }

    // Media

    pub async fn list_media(&self, pagination: Pagination) -> Result<Vec<ResourceRecord>, Error> {
        self.list(ResourceKind::Media, pagination, None).await
    }

    pub async fn get_media(&self, id: &Identifier) -> Result<ResourceRecord, Error> {
        self.get(ResourceKind::Media, id).await
    }

    /// Upload a media object for an item.
    pub async fn upload_media(
        &self,
        item: &Identifier,
        media: ImageDescriptor,
    ) -> Result<Option<ResourceRecord>, Error> {
        self.upload(ResourceKind::Media, item, media).await
    }

    /// Replace the file of an existing media object. Returns `true` iff the
    /// service accepted it.
    pub async fn replace_media(
        &self,
        id: &Identifier,
        item: &Identifier,
        media: ImageDescriptor,
    ) -> Result<bool, Error> {
        let form = link_field("item", self.relation_link(ResourceKind::Item, item));
        let attachment = Attachment::new(FILE_FIELD, media);
        self.update_multipart(ResourceKind::Media, id, &form, &attachment)
            .await
    }

    pub async fn delete_media(&self, id: &Identifier) -> Result<bool, Error> {
        self.delete(ResourceKind::Media, id).await
    }

    async fn upload(
        &self,
        kind: ResourceKind,
        item: &Identifier,
        file: ImageDescriptor,
    ) -> Result<Option<ResourceRecord>, Error> {
        let form = link_field("item", self.relation_link(ResourceKind::Item, item));
        let attachment = Attachment::new(FILE_FIELD, file);
        self.create_multipart(kind, &form, &attachment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_omits_absent_fields() {
        let payload = to_payload(&NewItem::named("poster")).unwrap();
        assert_eq!(Value::Object(payload), json!({"name": "poster"}));
    }

    #[test]
    fn new_item_keeps_present_fields() {
        let item = NewItem {
            trackable: Some(false),
            content: Some(json!({"type": "ar"})),
            url: Some("https://example.com".to_string()),
            ..NewItem::named("poster")
        };
        let payload = to_payload(&item).unwrap();
        assert_eq!(payload["trackable"], json!(false));
        assert_eq!(payload["content"], json!({"type": "ar"}));
        assert_eq!(payload["url"], json!("https://example.com"));
        assert!(!payload.contains_key("custom"));
    }

    #[test]
    fn empty_changes_serialize_to_empty_payload() {
        let payload = to_payload(&ItemChanges::default()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(to_payload(&json!(["a"])).is_err());
    }
}
