//! Query image preparation.
//!
//! | Stage | Operation |
//! |---|---|
//! | **Decode** | `image::load_from_memory` |
//! | **Convert** | single-channel luminance (`to_luma8`) |
//! | **Resize** | shorter side to `min_size`, `FilterType::Nearest` |
//! | **Encode** | `JpegEncoder` at the configured quality |
//!
//! When neither conversion nor resizing is requested the source bytes are
//! returned untouched, without decoding.

mod calculations;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, ImageError, ImageStage};
use crate::types::ImageDescriptor;
use crate::types::image::JPEG;

pub use calculations::scaled_dimensions;

/// How a query image is transformed before it is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageOptions {
    /// Convert to grayscale. Color rarely improves recognition.
    pub desaturate: bool,
    /// Target for the shorter side; `None` or zero disables rescaling.
    pub min_size: Option<u32>,
    /// JPEG quality for re-encoded output.
    pub quality: u8,
    /// Report each transformation at info level instead of debug.
    pub verbose: bool,
}

impl ImageOptions {
    /// Defaults for recognition queries: grayscale, rescaled to the
    /// configured minimum size.
    pub fn from_config(config: &Config) -> Self {
        Self {
            desaturate: true,
            min_size: Some(config.query_min_size),
            quality: config.image_quality,
            verbose: false,
        }
    }

    /// Options that send the source image unchanged.
    pub fn passthrough() -> Self {
        Self {
            desaturate: false,
            min_size: None,
            quality: crate::config::DEFAULT_IMAGE_QUALITY,
            verbose: false,
        }
    }

    fn rescale_to(&self) -> Option<u32> {
        self.min_size.filter(|&size| size > 0)
    }

    /// True when the pipeline returns the source bytes as-is.
    pub fn is_passthrough(&self) -> bool {
        !self.desaturate && self.rescale_to().is_none()
    }
}

macro_rules! report {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Run the pipeline on encoded image bytes.
///
/// Returns the source unchanged on the pass-through path; otherwise the
/// transformed image encoded as JPEG.
pub fn normalize(source: Vec<u8>, options: &ImageOptions) -> Result<Vec<u8>, Error> {
    if options.is_passthrough() {
        report!(options.verbose, len = source.len(), "Sending original image");
        return Ok(source);
    }

    let mut image = image::load_from_memory(&source)
        .map_err(|e| ImageError::new(ImageStage::Decode, e.to_string()))?;

    if options.desaturate {
        image = DynamicImage::ImageLuma8(image.to_luma8());
        report!(options.verbose, "Grayscale conversion");
    }

    if let Some(min_size) = options.rescale_to() {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(ImageError::new(
                ImageStage::Resize,
                format!("cannot rescale a {width}x{height} image"),
            )
            .into());
        }

        let (new_width, new_height) = scaled_dimensions((width, height), min_size);
        image = image.resize_exact(new_width, new_height, FilterType::Nearest);
        report!(
            options.verbose,
            original = %format!("{width}x{height}"),
            query = %format!("{new_width}x{new_height}"),
            "Rescaled query image"
        );
    }

    let output = encode_jpeg(image, options.quality)?;
    report!(options.verbose, len = output.len(), quality = options.quality, "Encoded JPEG");
    Ok(output)
}

/// Run the pipeline on an in-memory image, keeping its metadata on the
/// pass-through path.
pub fn prepare(source: ImageDescriptor, options: &ImageOptions) -> Result<ImageDescriptor, Error> {
    if options.is_passthrough() {
        report!(options.verbose, len = source.len(), "Sending original image");
        return Ok(source);
    }

    let bytes = normalize(source.into_bytes(), options)?;
    Ok(ImageDescriptor::new(bytes, JPEG).with_file_name("query.jpg"))
}

/// JPEG stores only luminance or RGB; drop alpha and extra depth.
fn flatten_for_jpeg(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image,
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

fn encode_jpeg(image: DynamicImage, quality: u8) -> Result<Vec<u8>, Error> {
    let image = flatten_for_jpeg(image);
    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));
    image
        .write_with_encoder(encoder)
        .map_err(|e| ImageError::new(ImageStage::Encode, e.to_string()))?;
    Ok(output)
}
