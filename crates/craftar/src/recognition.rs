//! Recognition API client.

use std::path::Path;

use reqwest::Method;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{Error, TransportError};
use crate::http::{Attachment, HttpClient, RequestBody, Response};
use crate::imaging::{self, ImageOptions};
use crate::resource::{Payload, validate};
use crate::types::{Identifier, ImageDescriptor, ResourceKind};

/// Form field carrying the query image.
const IMAGE_FIELD: &str = "image";

/// Options for a visual search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Embed each match's custom data.
    pub embed_custom: bool,
    /// Embed each match's tracking data.
    pub embed_tracking: bool,
    /// Return bounding boxes.
    pub bbox: bool,
    /// Application used to sign tracking data.
    pub app_id: Option<String>,
    pub strategy: String,
    pub version: Option<String>,
    /// Query image preparation.
    pub image: ImageOptions,
}

impl SearchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            embed_custom: false,
            embed_tracking: false,
            bbox: false,
            app_id: None,
            strategy: "none".to_string(),
            version: None,
            image: ImageOptions::from_config(config),
        }
    }

    fn form(&self, token: &Identifier) -> Payload {
        let mut form = Payload::new();
        form.insert("token".to_string(), json!(token.as_str()));
        form.insert("embed_custom".to_string(), json!(self.embed_custom));
        form.insert("embed_tracking".to_string(), json!(self.embed_tracking));
        form.insert("bbox".to_string(), json!(self.bbox));
        form.insert("app_id".to_string(), json!(self.app_id));
        form.insert("strategy".to_string(), json!(self.strategy));
        form.insert("version".to_string(), json!(self.version));
        form
    }
}

/// Client for the recognition API.
///
/// Responses are returned as decoded JSON, exactly as the service sent them.
///
/// # Example
///
/// ```no_run
/// use craftar::{Config, Identifier, RecognitionClient, ResourceKind, SearchOptions};
///
/// # async fn example() -> Result<(), craftar::Error> {
/// let config = Config::default();
/// let options = SearchOptions::from_config(&config);
/// let client = RecognitionClient::new(config)?;
///
/// let token = Identifier::new(ResourceKind::Token, "0123456789abcdef")?;
/// let results = client.search_path(&token, "query.jpg", &options).await?;
/// println!("{results}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecognitionClient {
    http: HttpClient,
    config: Config,
}

impl RecognitionClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = HttpClient::new(&config.user_agent)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Prepare a query image and run one visual search with it.
    #[instrument(skip(self, image, options), fields(file = image.file_name()))]
    pub async fn search(
        &self,
        token: &Identifier,
        image: ImageDescriptor,
        options: &SearchOptions,
    ) -> Result<Value, Error> {
        validate::identifier(ResourceKind::Token, token.as_str())?;

        let query = imaging::prepare(image, &options.image)?;
        debug!(len = query.len(), content_type = query.content_type(), "Sending search query");

        let form = options.form(token);
        let attachment = Attachment::new(IMAGE_FIELD, query);
        let url = self.config.recognition_url("search");
        let response = self
            .http
            .dispatch(Method::POST, &url, RequestBody::Multipart(&form, &attachment))
            .await?;

        verbatim(response)
    }

    /// Read a query image from disk, then search with it.
    pub async fn search_path(
        &self,
        token: &Identifier,
        path: impl AsRef<Path>,
        options: &SearchOptions,
    ) -> Result<Value, Error> {
        validate::identifier(ResourceKind::Token, token.as_str())?;
        let image = ImageDescriptor::from_path(path).await?;
        self.search(token, image, options).await
    }

    /// Request the bundle for an app version.
    #[instrument(skip(self))]
    pub async fn sync(
        &self,
        token: &Identifier,
        app_id: &str,
        version: &str,
        bundled: bool,
        tag: Option<&str>,
    ) -> Result<Value, Error> {
        validate::identifier(ResourceKind::Token, token.as_str())?;
        debug!("Sending sync request");

        let mut form = Payload::new();
        form.insert("token".to_string(), json!(token.as_str()));
        form.insert("app_id".to_string(), json!(app_id));
        form.insert("version".to_string(), json!(version));
        form.insert("bundled".to_string(), json!(bundled));
        form.insert("tag".to_string(), json!(tag));

        let url = self.config.recognition_url("sync");
        let response = self
            .http
            .dispatch(Method::POST, &url, RequestBody::Form(&form))
            .await?;

        verbatim(response)
    }
}

/// The decoded body, whatever the status; a status error only when there is
/// nothing to decode.
fn verbatim(response: Response) -> Result<Value, Error> {
    let status = response.code();
    match response.body {
        Some(body) => Ok(body),
        None if response.status.is_success() => Err(Error::UnexpectedResponse {
            status,
            reason: "response body is not JSON".to_string(),
        }),
        None => Err(TransportError::Status { status }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_form_encodes_flags_as_literals() {
        let mut options = SearchOptions::from_config(&Config::default());
        options.bbox = true;
        let token = Identifier::new(ResourceKind::Token, "0123456789abcdef").unwrap();

        let form = options.form(&token);
        assert_eq!(form["embed_custom"], json!(false));
        assert_eq!(form["bbox"], json!(true));
        assert_eq!(form["strategy"], json!("none"));
        assert_eq!(form["app_id"], Value::Null);
    }

    #[test]
    fn defaults_follow_config() {
        let config = Config::default().with_query_min_size(320);
        let options = SearchOptions::from_config(&config);
        assert_eq!(options.image.min_size, Some(320));
        assert!(options.image.desaturate);
    }
}
