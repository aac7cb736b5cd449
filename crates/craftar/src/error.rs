//! Error types for the craftar library.
//!
//! Input validation failures are raised locally before any request is
//! built. Everything else describes what the service or the transport
//! reported, or where the image pipeline stopped.

use std::fmt;
use thiserror::Error;

use crate::types::ResourceKind;

/// The unified error type for craftar operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-fixable input errors, detected before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The service returned a structured `error_message`, at any status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The addressed resource does not exist.
    #[error("resource not found (HTTP {status})")]
    NotFound { status: u16 },

    /// Network transport errors and non-2xx responses without a message.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A 2xx response whose body does not have the expected shape.
    #[error("unexpected response (HTTP {status}): {reason}")]
    UnexpectedResponse { status: u16, reason: String },

    /// Query image decode/convert/resize/encode failure.
    #[error("image processing error: {0}")]
    Image(#[from] ImageError),

    /// A source file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// The resource kind is not available on the configured API surface.
    #[error("resource kind '{kind}' is not supported by the {surface} API")]
    Kind { kind: String, surface: String },

    /// The identifier does not match its kind's hex pattern.
    #[error("invalid {kind} identifier '{value}': {reason}")]
    Identifier {
        kind: String,
        value: String,
        reason: String,
    },

    /// A create/update payload with no fields.
    #[error("payload for {kind} must not be empty")]
    EmptyPayload { kind: ResourceKind },

    /// Invalid service host URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

/// A structured error reported by the service in its response body.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code the error arrived with.
    pub status: u16,
    /// The body's `error_message` field.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-2xx status with no decodable error message.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// The image pipeline stage at which processing failed.
///
/// Grayscale conversion is infallible and has no stage here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStage {
    Decode,
    Resize,
    Encode,
}

impl fmt::Display for ImageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            ImageStage::Decode => "decode",
            ImageStage::Resize => "resize",
            ImageStage::Encode => "encode",
        };
        f.write_str(stage)
    }
}

/// Image pipeline failure, tagged with its stage.
#[derive(Debug, Error)]
#[error("{stage} failed: {message}")]
pub struct ImageError {
    pub stage: ImageStage,
    pub message: String,
}

impl ImageError {
    pub fn new(stage: ImageStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl Error {
    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            Error::NotFound { status } => Some(*status),
            Error::Transport(TransportError::Status { status }) => Some(*status),
            Error::UnexpectedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}
