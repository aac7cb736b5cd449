//! Client configuration.
//!
//! A [`Config`] is built once and handed to the clients by value. Nothing in
//! the library mutates it afterwards.

mod service_url;

use serde::{Deserialize, Serialize};

use crate::types::ApiSurface;

pub use service_url::ServiceUrl;

pub const DEFAULT_MANAGEMENT_HOST: &str = "https://crs.catchoom.com";
pub const DEFAULT_RECOGNITION_HOST: &str = "https://r.catchoom.com";
pub const DEFAULT_MANAGEMENT_API_VERSION: &str = "v0";
pub const DEFAULT_RECOGNITION_API_VERSION: &str = "v1";

/// JPEG quality for re-encoded query images; 75-85 works well.
pub const DEFAULT_IMAGE_QUALITY: u8 = 80;

/// Shorter side, in pixels, that query images are rescaled to.
pub const DEFAULT_QUERY_MIN_SIZE: u32 = 270;

/// Immutable settings shared by the management and recognition clients.
///
/// Every field has a default, so a partial JSON document deserializes into
/// a complete configuration.
///
/// # Example
///
/// ```
/// use craftar::{ApiSurface, Config, ServiceUrl};
///
/// let config = Config::default()
///     .with_surface(ApiSurface::Catchoom)
///     .with_management_host(ServiceUrl::new("https://crs.example.com").unwrap());
///
/// assert_eq!(config.management_api_version, "v0");
/// assert_eq!(config.image_quality, 80);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub management_host: ServiceUrl,
    pub management_api_version: String,
    pub recognition_host: ServiceUrl,
    pub recognition_api_version: String,
    /// API generation, which fixes the set of usable resource kinds.
    pub surface: ApiSurface,
    pub user_agent: String,
    pub image_quality: u8,
    pub query_min_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            management_host: ServiceUrl::new(DEFAULT_MANAGEMENT_HOST)
                .expect("default management host is a valid URL"),
            management_api_version: DEFAULT_MANAGEMENT_API_VERSION.to_string(),
            recognition_host: ServiceUrl::new(DEFAULT_RECOGNITION_HOST)
                .expect("default recognition host is a valid URL"),
            recognition_api_version: DEFAULT_RECOGNITION_API_VERSION.to_string(),
            surface: ApiSurface::default(),
            user_agent: concat!("craftar-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            image_quality: DEFAULT_IMAGE_QUALITY,
            query_min_size: DEFAULT_QUERY_MIN_SIZE,
        }
    }
}

impl Config {
    pub fn with_management_host(mut self, host: ServiceUrl) -> Self {
        self.management_host = host;
        self
    }

    pub fn with_recognition_host(mut self, host: ServiceUrl) -> Self {
        self.recognition_host = host;
        self
    }

    pub fn with_surface(mut self, surface: ApiSurface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_image_quality(mut self, quality: u8) -> Self {
        self.image_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_query_min_size(mut self, min_size: u32) -> Self {
        self.query_min_size = min_size;
        self
    }

    /// Returns the recognition endpoint URL for a method (`search`, `sync`).
    pub fn recognition_url(&self, method: &str) -> String {
        self.recognition_host
            .join(&format!("{}/{}", self.recognition_api_version, method))
    }
}
