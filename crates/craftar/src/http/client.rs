//! HTTP transport shared by the management and recognition clients.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::error::{ApiError, Error, TransportError};

use super::body::{RequestBody, form_pairs, multipart_form};

/// Field carrying a structured error in a response body.
pub(crate) const ERROR_MESSAGE: &str = "error_message";

/// A response whose status and body have been read.
#[derive(Debug)]
pub(crate) struct Response {
    pub status: StatusCode,
    /// Decoded JSON body; `None` when empty or not JSON.
    pub body: Option<Value>,
}

impl Response {
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }
}

/// One request per call, no retries.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Send a request and apply the service's error precedence.
    ///
    /// A body-level `error_message` wins over the status code, including on
    /// 2xx responses. Without one, any non-2xx status is an error.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: RequestBody<'_>,
    ) -> Result<Response, Error> {
        let response = self.dispatch(method, url, body).await?;
        interpret(response)
    }

    /// Send a request and return the status and decoded body as-is.
    #[instrument(skip(self, method, url, body), fields(method = %method, endpoint = redact(url)))]
    pub async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: RequestBody<'_>,
    ) -> Result<Response, Error> {
        debug!("Sending request");

        let request = self.client.request(method, url);
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(payload) => request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(serde_json::to_vec(payload).map_err(|e| TransportError::Http {
                    message: format!("failed to encode JSON body: {e}"),
                })?),
            RequestBody::Multipart(fields, attachment) => {
                request.multipart(multipart_form(fields, attachment)?)
            }
            RequestBody::Form(fields) => request.form(&form_pairs(fields)),
        };

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        trace!(%status, len = bytes.len(), "Response received");

        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice::<Value>(&bytes).ok()
        };

        Ok(Response { status, body })
    }
}

/// Apply the error precedence to a received response.
pub(crate) fn interpret(response: Response) -> Result<Response, Error> {
    if let Some(message) = error_message(response.body.as_ref()) {
        return Err(ApiError::new(response.code(), message).into());
    }

    if response.status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound {
            status: response.code(),
        });
    }

    if !response.status.is_success() {
        return Err(TransportError::Status {
            status: response.code(),
        }
        .into());
    }

    Ok(response)
}

fn error_message(body: Option<&Value>) -> Option<String> {
    match body?.get(ERROR_MESSAGE)? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// Strip the query string, which carries the API key.
fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Option<Value>) -> Response {
        Response {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn error_message_wins_over_success_status() {
        let result = interpret(response(200, Some(json!({"error_message": "quota exceeded"}))));
        match result {
            Err(Error::Api(e)) => {
                assert_eq!(e.status, 200);
                assert_eq!(e.message, "quota exceeded");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn error_message_wins_over_not_found() {
        let result = interpret(response(404, Some(json!({"error_message": "no such item"}))));
        assert!(matches!(result, Err(Error::Api(e)) if e.status == 404));
    }

    #[test]
    fn bare_not_found() {
        let result = interpret(response(404, None));
        assert!(matches!(result, Err(Error::NotFound { status: 404 })));
    }

    #[test]
    fn non_success_without_message_is_transport_error() {
        let result = interpret(response(500, Some(json!({"detail": "boom"}))));
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Status { status: 500 }))
        ));
    }

    #[test]
    fn success_passes_through() {
        let ok = interpret(response(204, None)).unwrap();
        assert_eq!(ok.code(), 204);
        assert!(ok.body.is_none());
    }

    #[test]
    fn redacts_query_string() {
        assert_eq!(
            redact("https://crs.catchoom.com/api/v0/item/?api_key=secret"),
            "https://crs.catchoom.com/api/v0/item/"
        );
        assert_eq!(redact("https://r.catchoom.com/v1/search"), "https://r.catchoom.com/v1/search");
    }
}
